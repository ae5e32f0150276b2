use axum::Router;

pub mod categories;
pub mod items;
pub mod purchases;
pub mod stocks;
pub mod stores;
pub mod system;

/// Router for every resource endpoint.
pub fn router() -> Router {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/stores", stores::router())
        .nest("/items", items::router())
        .nest("/stocks", stocks::router())
        .nest("/purchaseHistories", purchases::router())
}
