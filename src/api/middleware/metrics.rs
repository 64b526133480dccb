//! HTTP metrics middleware

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use super::logging::matched_path;
use crate::infrastructure::observability::record_http_request;

/// Path label used for requests that matched no route, to bound cardinality
const UNMATCHED_PATH: &str = "unmatched";

/// Record request count and latency, labelled by route template
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = route_label(&request);

    let response = next.run(request).await;

    record_http_request(
        method.as_str(),
        &path,
        response.status().as_u16(),
        start.elapsed(),
    );

    response
}

fn route_label(request: &Request<Body>) -> String {
    if request.extensions().get::<axum::extract::MatchedPath>().is_some() {
        matched_path(request)
    } else {
        UNMATCHED_PATH.to_string()
    }
}
