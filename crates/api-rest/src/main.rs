//! ICU intake REST API server binary.
//!
//! Resolves configuration from the environment once at startup, opens the
//! consult store, and serves the wizard endpoints with OpenAPI/Swagger
//! documentation at `/swagger-ui`.
//!
//! # Environment Variables
//! - `INTAKE_REST_ADDR`: server address (default: "0.0.0.0:3000")
//! - `CONSULT_DATA_DIR`: directory for consult storage (default: "./consult_data")

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::app;
use intake_core::{ConsultStore, ConsultWizard, CoreConfig, DEFAULT_CONSULT_DATA_DIR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("intake_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("INTAKE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let consult_data_dir =
        std::env::var("CONSULT_DATA_DIR").unwrap_or_else(|_| DEFAULT_CONSULT_DATA_DIR.into());

    tracing::info!("-- Starting ICU intake REST API on {}", addr);

    let cfg = Arc::new(CoreConfig::new(PathBuf::from(consult_data_dir)));
    let store = ConsultStore::open(cfg)?;
    let wizard = Arc::new(ConsultWizard::new(store));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(wizard)).await?;

    Ok(())
}
