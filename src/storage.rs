use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

/// Loads the persisted token, cache and goal. Anything unreadable starts empty.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!(
                    cached = data.cache.is_some(),
                    logged_in = data.token.is_some(),
                    "loaded state from {}",
                    path.display()
                );
                data
            }
            Err(err) => {
                error!("failed to parse state file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read state file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadingGoal;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("reading_stats_{}_{name}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_default() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.token.is_none());
        assert!(data.cache.is_none());
    }

    #[tokio::test]
    async fn persisted_state_round_trips() {
        let path = temp_path("round_trip");
        let data = AppData {
            token: Some("token".to_string()),
            cache: None,
            goal: Some(ReadingGoal {
                value: 5_000,
                month: "2024-05".to_string(),
            }),
        };
        persist_data(&path, &data).await.unwrap();

        let loaded = load_data(&path).await;
        assert_eq!(loaded.token.as_deref(), Some("token"));
        assert_eq!(loaded.goal, data.goal);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn corrupt_file_loads_default() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").await.unwrap();
        let data = load_data(&path).await;
        assert!(data.goal.is_none());
        let _ = fs::remove_file(&path).await;
    }
}
