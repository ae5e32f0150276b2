use axum::{http::Request, middleware::Next, response::Response};

/// Log every request once it has been answered; client errors at `warn`.
pub async fn trace_requests(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let res = next.run(req).await;
    let status = res.status();

    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), "request failed");
    } else if status.is_client_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), "request rejected");
    } else {
        tracing::debug!(%method, %path, status = status.as_u16(), "request served");
    }
    res
}
