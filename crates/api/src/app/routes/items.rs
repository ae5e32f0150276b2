use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stocktrack_core::{CategoryId, ItemId, StoreId};
use stocktrack_inventory::NewItem;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/alerts/low-stock", get(low_stock_items))
        .route("/category/:id", get(items_in_category))
        .route("/store/:id", get(items_at_store))
        .route("/expiry/:flag", get(items_by_expiry_flag))
        .route("/threshold/:n", get(items_with_threshold_below))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
        .route("/:id/summary", get(item_summary))
}

fn list_response(services: &AppServices, items: Vec<stocktrack_inventory::Item>) -> axum::response::Response {
    (StatusCode::OK, Json(dto::item_records(services.store(), &items))).into_response()
}

pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    list_response(&services, services.store().list_items())
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewItem>,
) -> axum::response::Response {
    match services.store().create_item(body, services.now()) {
        Ok(item) => (StatusCode::CREATED, Json(dto::item_record(services.store(), &item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match dto::parse_path(&id, "item id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().item(id) {
        Ok(item) => (StatusCode::OK, Json(dto::item_record(services.store(), &item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<NewItem>,
) -> axum::response::Response {
    let id: ItemId = match dto::parse_path(&id, "item id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().update_item(id, body, services.now()) {
        Ok(item) => (StatusCode::OK, Json(dto::item_record(services.store(), &item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match dto::parse_path(&id, "item id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().delete_item(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn items_in_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match dto::parse_path(&id, "category id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    list_response(&services, services.store().items_in_category(id))
}

/// `/items/store/null` lists the items bought nowhere in particular.
pub async fn items_at_store(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if id == "null" {
        return list_response(&services, services.store().items_without_store());
    }
    let id: StoreId = match dto::parse_path(&id, "store id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    list_response(&services, services.store().items_at_store(id))
}

pub async fn search_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::NameQuery>,
) -> axum::response::Response {
    list_response(&services, services.store().search_items(&q.name))
}

pub async fn items_by_expiry_flag(
    Extension(services): Extension<Arc<AppServices>>,
    Path(flag): Path<String>,
) -> axum::response::Response {
    let flag: bool = match flag.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("expected true or false, got {flag}"),
            );
        }
    };
    list_response(&services, services.store().items_by_expiry_flag(flag))
}

pub async fn items_with_threshold_below(
    Extension(services): Extension<Arc<AppServices>>,
    Path(n): Path<String>,
) -> axum::response::Response {
    let n: i64 = match n.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("threshold must be an integer, got {n}"),
            );
        }
    };
    list_response(&services, services.store().items_with_threshold_below(n))
}

pub async fn low_stock_items(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    list_response(&services, services.store().low_stock_items())
}

pub async fn item_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match dto::parse_path(&id, "item id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().item_summary(id, services.today()) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
