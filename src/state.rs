use crate::client::ReadingApiClient;
use crate::config::Config;
use crate::models::AppData;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: ReadingApiClient,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(config: Config, client: ReadingApiClient, data: AppData) -> Self {
        Self {
            config: Arc::new(config),
            client,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
