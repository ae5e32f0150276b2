use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stocktrack_core::{ItemId, StockId};
use stocktrack_inventory::{NewStockLot, StockLot};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_stocks).post(create_stock))
        .route("/alerts/low-stock", get(low_stock_alerts))
        .route("/alerts/low-stock/:item_id", get(low_stock_alerts_for_item))
        .route("/alerts/expiring", get(expiring_alerts))
        .route("/alerts/expired", get(expired_alerts))
        .route("/item/:item_id", get(stocks_for_item))
        .route("/item/:item_id/expiry-ordered", get(stocks_by_expiry))
        .route("/item/:item_id/total-quantity", get(total_quantity))
        .route("/:id", get(get_stock).put(update_stock).delete(delete_stock))
        .route("/:id/status", get(stock_status))
}

fn list_response(services: &AppServices, lots: Vec<StockLot>) -> axum::response::Response {
    (StatusCode::OK, Json(dto::stock_records(services.store(), &lots))).into_response()
}

fn lot_response(services: &AppServices, status: StatusCode, lot: &StockLot) -> axum::response::Response {
    match dto::stock_record(services.store(), lot) {
        Some(record) => (status, Json(record)).into_response(),
        None => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("item {} not found", lot.item_id),
        ),
    }
}

pub async fn list_stocks(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    list_response(&services, services.store().list_stocks())
}

pub async fn create_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewStockLot>,
) -> axum::response::Response {
    match services.store().create_stock(body, services.now()) {
        Ok(lot) => lot_response(&services, StatusCode::CREATED, &lot),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StockId = match dto::parse_path(&id, "stock id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().stock(id) {
        Ok(lot) => lot_response(&services, StatusCode::OK, &lot),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<NewStockLot>,
) -> axum::response::Response {
    let id: StockId = match dto::parse_path(&id, "stock id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().update_stock(id, body, services.now()) {
        Ok(lot) => lot_response(&services, StatusCode::OK, &lot),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StockId = match dto::parse_path(&id, "stock id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().delete_stock(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn stocks_for_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(item_id): Path<String>,
) -> axum::response::Response {
    let item_id: ItemId = match dto::parse_path(&item_id, "item id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    list_response(&services, services.store().stocks_for_item(item_id))
}

pub async fn stocks_by_expiry(
    Extension(services): Extension<Arc<AppServices>>,
    Path(item_id): Path<String>,
) -> axum::response::Response {
    let item_id: ItemId = match dto::parse_path(&item_id, "item id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    list_response(&services, services.store().stocks_by_expiry(item_id))
}

pub async fn total_quantity(
    Extension(services): Extension<Arc<AppServices>>,
    Path(item_id): Path<String>,
) -> axum::response::Response {
    let item_id: ItemId = match dto::parse_path(&item_id, "item id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().total_quantity(item_id) {
        Ok(total) => (StatusCode::OK, Json(total)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn low_stock_alerts(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    list_response(&services, services.store().low_stock_lots())
}

pub async fn low_stock_alerts_for_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(item_id): Path<String>,
) -> axum::response::Response {
    let item_id: ItemId = match dto::parse_path(&item_id, "item id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    list_response(&services, services.store().low_stock_lots_for_item(item_id))
}

pub async fn expiring_alerts(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::ExpiringQuery>,
) -> axum::response::Response {
    list_response(
        &services,
        services.store().expiring_lots(services.today(), q.days_ahead),
    )
}

pub async fn expired_alerts(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    list_response(&services, services.store().expired_lots(services.today()))
}

pub async fn stock_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StockId = match dto::parse_path(&id, "stock id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().stock_status(id, services.today()) {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
