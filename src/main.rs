use pitch_trends::{
    source::{HttpSource, PitchSource},
    storage::FileSource,
    AppState, Config, Session, SourceConfig,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let source: Arc<dyn PitchSource> = match &config.source {
        SourceConfig::Http(url) => {
            info!("reading pitches from {url}");
            Arc::new(HttpSource::new(url)?)
        }
        SourceConfig::File(path) => {
            info!("reading pitches from {}", path.display());
            Arc::new(FileSource::open(path).await)
        }
    };

    let state = AppState::new(source, Session::new(config.strike_chart));
    let app = pitch_trends::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
