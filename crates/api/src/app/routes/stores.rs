use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stocktrack_core::StoreId;
use stocktrack_inventory::{NewStore, Store, StoreRecord};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_stores).post(create_store))
        .route("/search", get(search_stores))
        .route("/location", get(stores_by_location))
        .route("/name/:name", get(get_store_by_name))
        .route("/exists/:name", get(store_exists))
        .route("/:id", get(get_store).put(update_store).delete(delete_store))
}

fn records(stores: Vec<Store>) -> Vec<StoreRecord> {
    stores.iter().map(StoreRecord::from).collect()
}

pub async fn list_stores(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    (StatusCode::OK, Json(records(services.store().list_stores()))).into_response()
}

pub async fn create_store(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewStore>,
) -> axum::response::Response {
    match services.store().create_store(body, services.now()) {
        Ok(s) => (StatusCode::CREATED, Json(StoreRecord::from(&s))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_store(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StoreId = match dto::parse_path(&id, "store id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().store(id) {
        Ok(s) => (StatusCode::OK, Json(StoreRecord::from(&s))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_store(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<NewStore>,
) -> axum::response::Response {
    let id: StoreId = match dto::parse_path(&id, "store id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().update_store(id, body, services.now()) {
        Ok(s) => (StatusCode::OK, Json(StoreRecord::from(&s))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_store(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StoreId = match dto::parse_path(&id, "store id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().delete_store(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn search_stores(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::KeywordQuery>,
) -> axum::response::Response {
    (StatusCode::OK, Json(records(services.store().search_stores(&q.keyword)))).into_response()
}

pub async fn stores_by_location(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::LocationQuery>,
) -> axum::response::Response {
    (StatusCode::OK, Json(records(services.store().stores_by_location(&q.location)))).into_response()
}

pub async fn get_store_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.store().store_by_name(&name) {
        Ok(s) => (StatusCode::OK, Json(StoreRecord::from(&s))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn store_exists(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.store().store_exists(&name))).into_response()
}
