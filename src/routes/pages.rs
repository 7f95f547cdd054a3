use crate::error::PageError;
use crate::render;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use chrono::{Local, NaiveDate};
use log::{error, warn};
use serde::Deserialize;

pub(crate) async fn home() -> Html<String> {
    Html(render::home_page())
}

pub(crate) async fn teams(State(state): State<AppState>) -> Html<String> {
    let teams = state.api.fetch_all_teams().await;
    Html(render::teams_page(&teams))
}

pub(crate) async fn team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Html<String> {
    let profile = state.api.fetch_team_profile(&team_id).await;
    Html(render::team_page(&profile))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoresQuery {
    date: Option<String>,
}

pub(crate) async fn scores(
    State(state): State<AppState>,
    Query(query): Query<ScoresQuery>,
) -> Result<Html<String>, PageError> {
    let date = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            warn!("rejected scores date {raw:?}");
            PageError::bad_request(format!("Invalid date {raw:?}, expected YYYY-MM-DD"))
        })?,
        None => Local::now().date_naive(),
    };

    let games = state.api.fetch_games_for_date(date).await;
    Ok(Html(render::scores_page(date, &games)))
}

pub(crate) async fn statistics(State(state): State<AppState>) -> Html<String> {
    match state.api.fetch_league_leaders().await {
        Ok(leaders) => Html(render::statistics_page(Ok(&leaders))),
        Err(e) => {
            error!("league leaders unavailable: {e}");
            Html(render::statistics_page(Err(
                "Unable to load statistics data. Please try again later.",
            )))
        }
    }
}

pub(crate) async fn game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let detail = state.api.fetch_game_detail(&game_id).await.map_err(|e| {
        error!("game {game_id} unavailable: {e}");
        PageError::not_found("Game not found")
    })?;
    Ok(Html(render::game_page(&detail)))
}

pub(crate) async fn not_found() -> PageError {
    PageError::not_found("Page not found")
}
