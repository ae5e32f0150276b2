use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stocktrack_core::{ItemId, PurchaseId};
use stocktrack_inventory::{NewPurchase, PurchaseRecord};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_purchases).post(create_purchase))
        .route("/period", get(purchases_between))
        .route("/item/:item_id", get(purchases_for_item))
        .route(
            "/:id",
            get(get_purchase).put(update_purchase).delete(delete_purchase),
        )
}

fn list_response(services: &AppServices, purchases: Vec<PurchaseRecord>) -> axum::response::Response {
    (StatusCode::OK, Json(dto::purchase_records(services.store(), &purchases))).into_response()
}

fn purchase_response(
    services: &AppServices,
    status: StatusCode,
    purchase: &PurchaseRecord,
) -> axum::response::Response {
    match dto::purchase_record(services.store(), purchase) {
        Some(record) => (status, Json(record)).into_response(),
        None => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("item {} not found", purchase.item_id),
        ),
    }
}

pub async fn list_purchases(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    list_response(&services, services.store().list_purchases())
}

pub async fn create_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewPurchase>,
) -> axum::response::Response {
    match services.store().create_purchase(body, services.now()) {
        Ok(p) => purchase_response(&services, StatusCode::CREATED, &p),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PurchaseId = match dto::parse_path(&id, "purchase id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().purchase(id) {
        Ok(p) => purchase_response(&services, StatusCode::OK, &p),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<NewPurchase>,
) -> axum::response::Response {
    let id: PurchaseId = match dto::parse_path(&id, "purchase id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().update_purchase(id, body, services.now()) {
        Ok(p) => purchase_response(&services, StatusCode::OK, &p),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PurchaseId = match dto::parse_path(&id, "purchase id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().delete_purchase(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn purchases_for_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(item_id): Path<String>,
) -> axum::response::Response {
    let item_id: ItemId = match dto::parse_path(&item_id, "item id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    list_response(&services, services.store().purchases_for_item(item_id))
}

pub async fn purchases_between(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::PeriodQuery>,
) -> axum::response::Response {
    let start = match dto::parse_period_bound(q.start.as_deref(), "start") {
        Ok(v) => v,
        Err(res) => return res,
    };
    let end = match dto::parse_period_bound(q.end.as_deref(), "end") {
        Ok(v) => v,
        Err(res) => return res,
    };
    list_response(&services, services.store().purchases_between(start, end))
}
