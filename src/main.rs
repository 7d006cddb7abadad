use std::net::SocketAddr;
use std::sync::Arc;

use tera::Tera;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use barangay_surveys::http::{build_router, AppState};
use barangay_surveys::seed;
use barangay_surveys::store::SurveyStore;

const DEFAULT_DB_PATH: &str = "barangay_surveys.db";
const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const TEMPLATE_GLOB: &str = "templates/**/*.tera";

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with(tracing_subscriber::fmt::layer())
    .init();

  if let Err(err) = run().await {
    tracing::error!(error = %err, "startup failed");
    std::process::exit(1);
  }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
  let db_path = std::env::var("SURVEYS_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
  let store = SurveyStore::open(&db_path)?;
  tracing::info!(%db_path, "survey store ready");

  if std::env::args().any(|arg| arg == "--seed") {
    let report = seed::create_demo_data(&store)?;
    tracing::info!(
      surveys = report.surveys,
      questions = report.questions,
      "demo data created"
    );
    return Ok(());
  }

  let tera = Tera::new(TEMPLATE_GLOB)?;
  let state = Arc::new(AppState { store, tera });

  let addr: SocketAddr = std::env::var("SURVEYS_ADDR")
    .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
    .parse()?;
  let listener = tokio::net::TcpListener::bind(addr).await?;
  tracing::info!(%addr, "survey server listening");
  axum::serve(listener, build_router(state)).await?;
  Ok(())
}
