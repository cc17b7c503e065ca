// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::IntoResponse;
use log::{debug, error};

use crate::api::{ErrorCode, HttpError};

pub(super) async fn default_headers(
    request: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let mut response = next.run(request).await;
    let version: &str = env!("CARGO_PKG_VERSION");
    let server = HeaderValue::from_str(&format!("BaladeStore {}", version))
        .map_err(|err| HttpError::new(ErrorCode::InternalServerError, &err.to_string()))?;
    response.headers_mut().insert("Server", server);

    let tokens: Vec<&str> = version.splitn(3, '.').collect();
    let api_version = HeaderValue::from_str(&tokens[..2.min(tokens.len())].join("."))
        .map_err(|err| HttpError::new(ErrorCode::InternalServerError, &err.to_string()))?;
    response.headers_mut().insert("x-balade-api", api_version);
    Ok(response)
}

pub(super) async fn print_statuses(
    request: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let Some(path_and_query) = request.uri().path_and_query() else {
        return Err(HttpError::new(
            ErrorCode::BadRequest,
            "Failed to get path and query",
        ));
    };

    let msg = format!("{} {}", request.method(), path_and_query);

    let response = next.run(request).await;
    let err_msg = match response.headers().get("x-balade-error") {
        Some(msg) => String::from_utf8_lossy(msg.as_bytes()).to_string(),
        None => String::new(),
    };

    if response.status().as_u16() >= 500 {
        error!("{} [{}] {}", msg, response.status(), err_msg);
    } else {
        debug!("{} [{}] {}", msg, response.status(), err_msg);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{middleware::from_fn, Router};
    use rstest::rstest;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/ok", get(|| async { StatusCode::OK }))
            .route(
                "/fail",
                get(|| async { HttpError::new(ErrorCode::InternalServerError, "Connection lost") }),
            )
            .layer(from_fn(default_headers))
            .layer(from_fn(print_statuses))
    }

    #[rstest]
    #[tokio::test]
    async fn test_default_headers() {
        let resp = app()
            .oneshot(Request::get("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("server").unwrap(),
            &format!("BaladeStore {}", env!("CARGO_PKG_VERSION"))
        );

        let version: Vec<&str> = env!("CARGO_PKG_VERSION").split('.').collect();
        assert_eq!(
            resp.headers().get("x-balade-api").unwrap(),
            &format!("{}.{}", version[0], version[1])
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_print_statuses_passes_errors_through() {
        let resp = app()
            .oneshot(Request::get("/fail").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().get("x-balade-error").is_some());
    }
}
