use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/level", get(handlers::get_level))
        .route("/api/achievements", get(handlers::get_achievements))
        .route("/api/comparison", get(handlers::get_comparison))
        .route("/api/insights", get(handlers::get_insights))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/yearly", get(handlers::get_yearly))
        .route("/api/yearly/:year", get(handlers::get_yearly_report))
        .route("/api/goal", get(handlers::get_goal).put(handlers::put_goal))
        .route("/api/data", put(handlers::put_data))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/refresh", post(handlers::refresh_data))
        .with_state(state)
}
