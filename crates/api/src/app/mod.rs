use std::sync::Arc;

use axum::{extract::Extension, Router};
use tower::ServiceBuilder;

use procura_directory::{DirectorySeed, InMemoryDirectory};
use procura_engine::ProcurementService;
use procura_store::InMemoryLedger;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared handler state: the service facade plus the directory for catalog
/// and project lookups done at the HTTP layer.
pub struct AppState {
    pub service: ProcurementService<InMemoryLedger>,
    pub directory: Arc<InMemoryDirectory>,
}

/// Build the full application router (same one the binary serves, reused by
/// black-box tests against an ephemeral port).
pub fn build_app(seed: DirectorySeed) -> Router {
    let directory = Arc::new(InMemoryDirectory::from_seed(seed));
    let ledger = Arc::new(InMemoryLedger::new());
    let service = ProcurementService::new(ledger, directory.clone(), directory.clone());

    let state = Arc::new(AppState { service, directory });

    routes::router().layer(ServiceBuilder::new().layer(Extension(state)))
}
