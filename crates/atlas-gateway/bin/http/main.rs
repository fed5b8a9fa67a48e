mod cli;

use crate::cli::{StorageBackendArg, CLI};
use atlas_core::{CountryRepository, SummaryRenderer};
use atlas_gateway::app::App;
use atlas_gateway::state::AppState;
use atlas_refresh::{RefreshService, UniformMultiplier};
use atlas_render::{locate_font, NoopRenderer, PngSummaryRenderer};
use atlas_sources::{OpenErApiClient, RestCountriesClient};
use atlas_storage::{InMemoryCountryRepository, MySqlCountryRepository};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "atlas=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CLI::try_parse()?;

    info!(
        port = config.port,
        storage_backend = %config.storage,
        "starting atlas gateway"
    );

    let renderer = build_renderer(&config);

    match config.storage {
        StorageBackendArg::InMemory => {
            let repository = Arc::new(InMemoryCountryRepository::new());
            run_server(&config, repository, renderer).await
        }
        StorageBackendArg::Mysql => {
            let repository = MySqlCountryRepository::connect(&config.mysql_dsn()).await?;
            repository.ensure_schema().await?;
            run_server(&config, Arc::new(repository), renderer).await
        }
    }
}

fn build_renderer(config: &CLI) -> Arc<dyn SummaryRenderer> {
    let font_path = config.font_path.clone().or_else(locate_font);

    match font_path {
        Some(path) => match PngSummaryRenderer::new(&path, config.image_path.clone()) {
            Ok(renderer) => return Arc::new(renderer),
            Err(err) => {
                warn!(%err, font = %path.display(), "font rejected, summary image disabled");
            }
        },
        None => warn!("no usable font found, summary image disabled"),
    }

    Arc::new(NoopRenderer)
}

async fn run_server<R: CountryRepository>(
    config: &CLI,
    repository: Arc<R>,
    renderer: Arc<dyn SummaryRenderer>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mirror = RefreshService::new(
        RestCountriesClient::with_endpoint(config.countries_url.clone()),
        OpenErApiClient::with_endpoint(config.rates_url.clone()),
        Arc::clone(&repository),
        renderer,
        Arc::new(UniformMultiplier),
    );
    let state = AppState::new(Arc::new(mirror), repository, config.image_path.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");
    axum::serve(listener, App::router(state)).await?;

    Ok(())
}
