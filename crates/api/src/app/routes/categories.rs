use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stocktrack_core::CategoryId;
use stocktrack_inventory::{CategoryRecord, NewCategory};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/search", get(search_categories))
        .route("/name/:name", get(get_category_by_name))
        .route("/exists/:name", get(category_exists))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

pub async fn list_categories(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let out: Vec<CategoryRecord> = services
        .store()
        .list_categories()
        .iter()
        .map(CategoryRecord::from)
        .collect();
    (StatusCode::OK, Json(out)).into_response()
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewCategory>,
) -> axum::response::Response {
    match services.store().create_category(body, services.now()) {
        Ok(c) => (StatusCode::CREATED, Json(CategoryRecord::from(&c))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match dto::parse_path(&id, "category id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().category(id) {
        Ok(c) => (StatusCode::OK, Json(CategoryRecord::from(&c))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<NewCategory>,
) -> axum::response::Response {
    let id: CategoryId = match dto::parse_path(&id, "category id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().update_category(id, body, services.now()) {
        Ok(c) => (StatusCode::OK, Json(CategoryRecord::from(&c))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match dto::parse_path(&id, "category id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.store().delete_category(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn search_categories(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::KeywordQuery>,
) -> axum::response::Response {
    let out: Vec<CategoryRecord> = services
        .store()
        .search_categories(&q.keyword)
        .iter()
        .map(CategoryRecord::from)
        .collect();
    (StatusCode::OK, Json(out)).into_response()
}

pub async fn get_category_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.store().category_by_name(&name) {
        Ok(c) => (StatusCode::OK, Json(CategoryRecord::from(&c))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn category_exists(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.store().category_exists(&name))).into_response()
}
