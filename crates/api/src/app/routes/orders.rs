use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use procura_core::OrderId;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order).delete(delete_order))
        .route("/:id/approve", post(approve_order))
        .route("/:id/reject", post(reject_order))
        .route("/:id/close", post(close_order))
        .route("/:id/receipts", post(create_receipt).get(list_receipts))
        .route("/:id/reconciliation", get(get_reconciliation))
}

fn parse_order_id(raw: &str) -> Result<OrderId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

pub async fn create_order(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match state.service.create_order(draft) {
        Ok(order) => (
            StatusCode::CREATED,
            Json(dto::OrderResponse::from_order(&order)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    match state.service.list_orders() {
        Ok(orders) => {
            let body: Vec<dto::OrderResponse> =
                orders.iter().map(dto::OrderResponse::from_order).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.service.get_order(id) {
        Ok(order) => Json(dto::OrderResponse::from_order(&order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.service.delete_order(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn approve_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&state, &id, |s, id| s.service.approve_order(id))
}

pub async fn reject_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&state, &id, |s, id| s.service.reject_order(id))
}

pub async fn close_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&state, &id, |s, id| s.service.close_order(id))
}

fn transition<F>(state: &AppState, raw_id: &str, apply: F) -> axum::response::Response
where
    F: FnOnce(
        &AppState,
        OrderId,
    ) -> procura_core::DomainResult<procura_orders::PurchaseOrder>,
{
    let id = match parse_order_id(raw_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match apply(state, id) {
        Ok(order) => Json(dto::OrderResponse::from_order(&order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_receipt(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateReceiptRequest>,
) -> axum::response::Response {
    let id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.service.create_receipt(id, body.into_draft()) {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(dto::ReceiptResponse::from_receipt(&receipt)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_receipts(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.service.list_receipts(id) {
        Ok(receipts) => {
            let body: Vec<dto::ReceiptResponse> =
                receipts.iter().map(dto::ReceiptResponse::from_receipt).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_reconciliation(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let order = match state.service.get_order(id) {
        Ok(o) => o,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match state.service.reconcile_order(id) {
        Ok(summary) => Json(dto::ReconciliationResponse::new(&order, summary)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
