use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use courtside::{AppState, build_router};
use mockito::{Matcher, Mock, Server, ServerGuard};
use nba_api::client::{Season, SeasonType, SportradarApi};
use nba_api::prediction::PredictionClient;
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;

const KEY: &str = "route-key";

fn state_for(server: &ServerGuard, api_key: Option<&str>) -> AppState {
    let api = SportradarApi::new(api_key.map(str::to_owned))
        .with_base_url(server.url())
        .with_news_url(format!("{}/espn/news", server.url()))
        .with_season(Season::new(2024, SeasonType::Regular))
        .with_timeout(Duration::from_secs(2));
    let predictions = PredictionClient::new(format!("{}/ml", server.url()));
    AppState::new(api, predictions)
}

async fn get(state: AppState, uri: &str) -> Response {
    build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

async fn read_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

async fn read_json(response: Response) -> Value {
    serde_json::from_str(&read_body(response).await).expect("json")
}

async fn upstream(server: &mut ServerGuard, path: &str, status: usize, body: Value) -> Mock {
    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("api_key".into(), KEY.into()))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn health_reports_ok() {
    let server = Server::new_async().await;
    let response = get(state_for(&server, None), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cached_entries"], 0);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn home_page_links_sections() {
    let server = Server::new_async().await;
    let response = get(state_for(&server, None), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains("href=\"/teams\""));
    assert!(html.contains("href=\"/scores\""));
    assert!(html.contains("href=\"/statistics\""));
}

#[tokio::test]
async fn teams_page_falls_back_without_key() {
    let server = Server::new_async().await;
    let response = get(state_for(&server, None), "/teams").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains("Eastern Conference"));
    assert!(html.contains("Boston Celtics"));
    assert!(html.contains("/teams/583ecae2-fb46-11e1-82cb-f4ce4684ea4c"));
}

#[tokio::test]
async fn api_teams_is_500_when_upstream_fails() {
    let mut server = Server::new_async().await;
    let _hierarchy = upstream(&mut server, "/league/hierarchy.json", 500, json!({})).await;
    let _teams = upstream(&mut server, "/league/teams.json", 500, json!({})).await;

    let response = get(state_for(&server, Some(KEY)), "/api/teams").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Failed to fetch teams");
}

#[tokio::test]
async fn api_teams_returns_flattened_list() {
    let mut server = Server::new_async().await;
    let _hierarchy = upstream(
        &mut server,
        "/league/hierarchy.json",
        200,
        json!({"conferences": [{
            "name": "Western Conference",
            "divisions": [{"name": "Pacific", "teams": [
                {"id": "583ecae2-fb46-11e1-82cb-f4ce4684ea4c", "name": "Lakers",
                 "market": "Los Angeles", "alias": "LAL"}
            ]}]
        }]}),
    )
    .await;

    let response = get(state_for(&server, Some(KEY)), "/api/teams").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body[0]["fullName"], "Los Angeles Lakers");
    assert_eq!(body[0]["division"], "Pacific");
}

#[tokio::test]
async fn roster_endpoint_serves_mock_roster_when_profile_fails() {
    let server = Server::new_async().await;
    let response = get(state_for(&server, None), "/api/teams/miami-heat/roster").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(15));
}

#[tokio::test]
async fn team_page_renders_profile_and_roster() {
    let server = Server::new_async().await;
    let response =
        get(state_for(&server, None), "/teams/583eca2f-fb46-11e1-82cb-f4ce4684ea4c").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains("<title>Boston Celtics | Courtside</title>"));
    assert!(html.contains("TD Garden"));
    assert!(html.contains("Record: "));
    assert!(html.contains("<h2>Roster</h2>"));
}

#[tokio::test]
async fn team_page_fetches_the_profile_once() {
    let mut server = Server::new_async().await;
    let profile = server
        .mock("GET", "/teams/583eca2f-fb46-11e1-82cb-f4ce4684ea4c/profile.json")
        .match_query(Matcher::UrlEncoded("api_key".into(), KEY.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "583eca2f-fb46-11e1-82cb-f4ce4684ea4c",
                "name": "Celtics", "market": "Boston", "alias": "BOS",
                "players": [{"id": "p1", "full_name": "Jayson Tatum", "jersey_number": "0"}]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let _standings =
        upstream(&mut server, "/seasons/2024/REG/standings.json", 500, json!({})).await;

    let response =
        get(state_for(&server, Some(KEY)), "/teams/583eca2f-fb46-11e1-82cb-f4ce4684ea4c").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains("Jayson Tatum"));
    assert!(!html.contains("Record: "));
    profile.assert_async().await;
}

#[tokio::test]
async fn scores_rejects_malformed_date() {
    let server = Server::new_async().await;
    let response = get(state_for(&server, None), "/scores?date=14-03-2025").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_body(response).await.contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn scores_lists_games_for_requested_day() {
    let mut server = Server::new_async().await;
    let _schedule = upstream(
        &mut server,
        "/games/2024/REG/schedule.json",
        200,
        json!({"games": [
            {"id": "g-noon", "status": "scheduled", "scheduled": "2025-03-14T12:00:00+00:00",
             "home": {"name": "Boston Celtics", "alias": "BOS"},
             "away": {"name": "Miami Heat", "alias": "MIA"}},
            {"id": "g-week-later", "status": "scheduled", "scheduled": "2025-03-21T12:00:00+00:00",
             "home": {"name": "Utah Jazz"}, "away": {"name": "Phoenix Suns"}}
        ]}),
    )
    .await;

    let response = get(state_for(&server, Some(KEY)), "/scores?date=2025-03-14").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains("/game/g-noon"));
    assert!(!html.contains("g-week-later"));
    assert!(html.contains("/scores?date=2025-03-13"));
    assert!(html.contains("/scores?date=2025-03-15"));
}

#[tokio::test]
async fn game_page_is_404_when_summary_fails() {
    let mut server = Server::new_async().await;
    let _summary = upstream(&mut server, "/games/nope/summary.json", 404, json!({})).await;

    let response = get(state_for(&server, Some(KEY)), "/game/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(read_body(response).await.contains("Game not found"));
}

#[tokio::test]
async fn game_page_renders_box_score() {
    let mut server = Server::new_async().await;
    let _summary = upstream(
        &mut server,
        "/games/g1/summary.json",
        200,
        json!({
            "id": "g1", "status": "closed", "scheduled": "2025-03-14T23:30:00+00:00",
            "venue": {"name": "TD Garden", "city": "Boston", "state": "MA"},
            "home": {"name": "Celtics", "market": "Boston", "points": 118, "players": [{
                "full_name": "Jaylen Brown", "starter": true,
                "statistics": {"minutes": "35:02", "points": 27, "rebounds": 6, "assists": 4}
            }]},
            "away": {"name": "Heat", "market": "Miami", "points": 97}
        }),
    )
    .await;

    let response = get(state_for(&server, Some(KEY)), "/game/g1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains("<title>Miami Heat @ Boston Celtics | Courtside</title>"));
    assert!(html.contains("Jaylen Brown*"));
    assert!(html.contains("TD Garden, Boston, MA"));
}

#[tokio::test]
async fn statistics_shows_inline_error_when_leaders_fail() {
    let server = Server::new_async().await;
    let response = get(state_for(&server, None), "/statistics").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_body(response).await.contains("Unable to load statistics data"));
}

#[tokio::test]
async fn prediction_requires_both_teams() {
    let server = Server::new_async().await;
    let response = get(state_for(&server, None), "/api/prediction?team1=Boston%20Celtics").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Both team1 and team2 parameters are required");
}

#[tokio::test]
async fn prediction_proxies_and_reports_upstream_failure() {
    let mut server = Server::new_async().await;
    let _ok = server
        .mock("GET", "/ml/api/predict")
        .match_query(Matcher::UrlEncoded("teams".into(), "Boston Celtics,Miami Heat".into()))
        .with_status(200)
        .with_body(json!({"winner": "Boston Celtics"}).to_string())
        .create_async()
        .await;
    let _down = server
        .mock("GET", "/ml/api/predict")
        .match_query(Matcher::UrlEncoded("teams".into(), "a,b".into()))
        .with_status(500)
        .create_async()
        .await;
    let state = state_for(&server, None);

    let response = get(
        state.clone(),
        "/api/prediction?team1=Boston%20Celtics&team2=Miami%20Heat",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["winner"], "Boston Celtics");

    let response = get(state, "/api/prediction?team1=a&team2=b").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["error"], "Failed to fetch prediction");
}

#[tokio::test]
async fn news_failure_is_500() {
    let mut server = Server::new_async().await;
    let _news = server.mock("GET", "/espn/news").with_status(502).create_async().await;

    let response = get(state_for(&server, None), "/api/nba-news").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["error"], "Failed to fetch NBA news");
}

#[tokio::test]
async fn unknown_route_renders_404_page() {
    let server = Server::new_async().await;
    let response = get(state_for(&server, None), "/contactus").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(read_body(response).await.contains("Page not found"));
}
