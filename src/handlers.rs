use crate::cache::refresh;
use crate::errors::{AppError, ClientError, StatsError};
use crate::models::{
    AppData, CachedReading, GoalRequest, LoginRequest, ReadingData, ReadingDataResponse,
    ReadingGoal, RefreshResponse, SessionResponse,
};
use crate::state::AppState;
use crate::stats::achievements::{AchievementDefinition, AchievementProgress};
use crate::stats::comparison::Comparison;
use crate::stats::goal::{GoalProgress, goal_for_month, goal_progress, month_key};
use crate::stats::insights::PersonalInsights;
use crate::stats::level::LevelState;
use crate::stats::normalize::normalize;
use crate::stats::report::{
    HeatmapDay, YearBreakdown, YearlyReport, activity_heatmap, year_breakdown, yearly_report,
};
use crate::stats::{DerivedViews, build_stats_at};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct AchievementsResponse {
    pub categories: Vec<AchievementProgress>,
    pub most_notable: Option<AchievementDefinition>,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = today();
    let data = state.data.lock().await;
    let views = derive(&state, &data, today)?;
    let goal = goal_for_month(data.goal.as_ref(), today).map(|goal| goal_progress(goal, &views.monthly));
    Ok(Html(render_index(&views, goal.as_ref())))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DerivedViews>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(derive(&state, &data, today())?))
}

pub async fn get_level(State(state): State<AppState>) -> Result<Json<LevelState>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(derive(&state, &data, today())?.level))
}

pub async fn get_achievements(
    State(state): State<AppState>,
) -> Result<Json<AchievementsResponse>, AppError> {
    let data = state.data.lock().await;
    let views = derive(&state, &data, today())?;
    Ok(Json(AchievementsResponse {
        categories: views.achievements,
        most_notable: views.most_notable,
    }))
}

pub async fn get_comparison(State(state): State<AppState>) -> Result<Json<Comparison>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(derive(&state, &data, today())?.comparison))
}

pub async fn get_insights(State(state): State<AppState>) -> Result<Json<PersonalInsights>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(derive(&state, &data, today())?.insights))
}

pub async fn get_calendar(State(state): State<AppState>) -> Result<Json<Vec<HeatmapDay>>, AppError> {
    let today = today();
    let data = state.data.lock().await;
    let views = derive(&state, &data, today)?;
    Ok(Json(activity_heatmap(&views.calendar, today)))
}

pub async fn get_yearly(State(state): State<AppState>) -> Result<Json<Vec<YearBreakdown>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(year_breakdown(&derive(&state, &data, today())?.yearly)))
}

pub async fn get_yearly_report(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<YearlyReport>, AppError> {
    let data = state.data.lock().await;
    let views = derive(&state, &data, today())?;
    views
        .yearly
        .iter()
        .find(|record| record.year == year)
        .map(|record| Json(yearly_report(record)))
        .ok_or_else(|| AppError::not_found(format!("no reading data for {year}")))
}

pub async fn get_goal(State(state): State<AppState>) -> Result<Json<Option<GoalProgress>>, AppError> {
    let today = today();
    let data = state.data.lock().await;
    let Some(goal) = goal_for_month(data.goal.as_ref(), today) else {
        return Ok(Json(None));
    };
    let views = derive(&state, &data, today)?;
    Ok(Json(Some(goal_progress(goal, &views.monthly))))
}

pub async fn put_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Result<Json<GoalProgress>, AppError> {
    if payload.value == 0 {
        return Err(AppError::bad_request("goal must be a positive word count"));
    }

    let today = today();
    let mut data = state.data.lock().await;
    let goal = ReadingGoal {
        value: payload.value,
        month: month_key(today),
    };
    data.goal = Some(goal.clone());
    persist_data(&state.config.data_path, &data).await?;

    let views = derive(&state, &data, today)?;
    Ok(Json(goal_progress(&goal, &views.monthly)))
}

/// Replaces the cached response with one supplied by the caller.
pub async fn put_data(
    State(state): State<AppState>,
    Json(payload): Json<ReadingDataResponse>,
) -> Result<StatusCode, AppError> {
    normalize(&payload.data, None)?;

    let mut data = state.data.lock().await;
    data.cache = Some(CachedReading {
        response: payload,
        last_fetch: Utc::now(),
    });
    persist_data(&state.config.data_path, &data).await?;
    info!("imported reading data");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let token = state.client.login(&payload.user_id, &payload.password).await?;

    let mut data = state.data.lock().await;
    data.clear_session();
    data.token = Some(token.access_token);
    persist_data(&state.config.data_path, &data).await?;
    info!("logged in as {}", payload.user_id);

    Ok(Json(SessionResponse { logged_in: true }))
}

pub async fn logout(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.clear_session();
    persist_data(&state.config.data_path, &data).await?;
    Ok(Json(SessionResponse { logged_in: false }))
}

pub async fn refresh_data(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let (token, cache) = {
        let data = state.data.lock().await;
        let token = data
            .token
            .clone()
            .ok_or_else(|| AppError::unauthorized("not logged in"))?;
        (token, data.cache.clone())
    };

    let session = state.client.session(token.clone(), state.config.year_from);
    let outcome = refresh(&session, cache.as_ref(), Local::now(), state.config.cache_ttl).await;

    let mut data = state.data.lock().await;
    if data.token.as_deref() != Some(token.as_str()) {
        warn!("session changed during refresh, discarding result");
        return Err(AppError::unauthorized("session ended during refresh"));
    }
    match outcome {
        Ok(Some(updated)) => {
            let last_fetch = updated.last_fetch;
            data.cache = Some(updated);
            persist_data(&state.config.data_path, &data).await?;
            Ok(Json(RefreshResponse {
                refreshed: true,
                last_fetch: Some(last_fetch),
            }))
        }
        Ok(None) => Ok(Json(RefreshResponse {
            refreshed: false,
            last_fetch: data.cache.as_ref().map(|cache| cache.last_fetch),
        })),
        Err(err @ ClientError::Unauthorized(_)) => {
            warn!("token rejected, clearing session");
            data.clear_session();
            persist_data(&state.config.data_path, &data).await?;
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn derive(state: &AppState, data: &AppData, today: NaiveDate) -> Result<DerivedViews, StatsError> {
    let empty = ReadingData::new();
    let raw = data
        .cache
        .as_ref()
        .map_or(&empty, |cache| &cache.response.data);
    build_stats_at(today, raw, &state.config.stats)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
