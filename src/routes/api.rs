use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use nba_api::{PlayerRecord, TeamRecord};
use serde::Deserialize;
use serde_json::Value;

pub(crate) async fn teams(State(state): State<AppState>) -> AppResult<Json<Vec<TeamRecord>>> {
    let teams = state
        .api
        .try_fetch_all_teams()
        .await
        .map_err(|e| AppError::upstream("Failed to fetch teams", e))?;
    Ok(Json(teams))
}

pub(crate) async fn roster(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Json<Vec<PlayerRecord>> {
    Json(state.api.fetch_team_roster(&team_id).await)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictionQuery {
    team1: Option<String>,
    team2: Option<String>,
}

pub(crate) async fn prediction(
    State(state): State<AppState>,
    Query(query): Query<PredictionQuery>,
) -> AppResult<Json<Value>> {
    let present = |v: Option<String>| v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
    let (Some(team1), Some(team2)) = (present(query.team1), present(query.team2)) else {
        return Err(AppError::BadRequest(
            "Both team1 and team2 parameters are required".to_string(),
        ));
    };

    let prediction = state
        .predictions
        .predict(&team1, &team2)
        .await
        .map_err(|e| AppError::upstream("Failed to fetch prediction", e))?;
    Ok(Json(prediction))
}

pub(crate) async fn news(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let news = state
        .api
        .fetch_news()
        .await
        .map_err(|e| AppError::upstream("Failed to fetch NBA news", e))?;
    Ok(Json(news))
}
