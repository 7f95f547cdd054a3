use anyhow::Context;
use courtside::config::Config;
use courtside::{AppState, build_router, logging};
use log::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    // A missing .env is normal outside development.
    let _ = dotenvy::dotenv();
    logging::init();

    let config = Config::from_env().context("load configuration")?;
    if config.api_key.is_none() {
        warn!("SPORTRADAR_API_KEY is not set; pages will be served from fallback data");
    }
    let state = AppState::from_config(&config);
    info!(
        "season {}, cache ttl {}s, upstream timeout {}s",
        state.api.season(),
        config.cache_ttl.as_secs(),
        config.upstream_timeout.as_secs()
    );

    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!("courtside listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve http")?;

    info!("courtside stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("courtside {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "courtside - NBA teams, scores and league leaders

Usage:
  courtside
  courtside --help
  courtside --version

Environment (also read from .env):
  HOST                   Bind host (default 0.0.0.0)
  PORT                   Bind port (default 3000)
  SPORTRADAR_API_KEY     Sportradar NBA API key; without it fallback data is served
  SPORTRADAR_BASE_URL    Upstream base (default https://api.sportradar.com/nba/trial/v8/en)
  NBA_SEASON_YEAR        Pin the season start year (default follows the calendar)
  NBA_SEASON_TYPE        PRE, REG or PST (default REG)
  CACHE_TTL_SECS         Upstream response cache lifetime (default 3600)
  UPSTREAM_TIMEOUT_SECS  Per-request upstream timeout (default 10)
  REQUEST_TIMEOUT_SECS   Whole-request timeout (default 30)
  ML_API_URL             Prediction service (default http://localhost:5000)
  NBA_NEWS_URL           News feed (default ESPN NBA news)
  RUST_LOG               Log filter (default courtside=debug,nba_api=debug,tower_http=info)"
}
