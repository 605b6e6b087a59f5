use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use procura_core::ProjectId;
use procura_directory::{CatalogLookup, ProjectLookup};

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new().route("/:project_id", get(get_catalog))
}

/// Orderable items for a project, for pre-filling order lines.
pub async fn get_catalog(
    Extension(state): Extension<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> axum::response::Response {
    let project_id: ProjectId = match project_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Some(project) = state.directory.project(project_id) else {
        return errors::domain_error_to_response(procura_core::DomainError::not_found(format!(
            "project {project_id}"
        )));
    };
    Json(dto::CatalogResponse {
        project_id,
        project_name: project.name,
        items: state.directory.items_for_project(project_id),
    })
    .into_response()
}
