// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1
//
mod balade;
mod middleware;
mod server;

use crate::cfg::Cfg;
use crate::storage::ManageBalades;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{middleware::from_fn, Router};
use balade::create_balade_api_routes;
pub use balade_base::error::ErrorCode;
use balade_base::error::BaladeError;
use hyper::http::HeaderValue;
use log::{error, warn};
use middleware::{default_headers, print_statuses};
use serde::de::StdError;
use server::create_server_api_routes;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared state of the HTTP handlers.
pub struct Components {
    pub store: Arc<dyn ManageBalades>,
    pub cfg: Cfg,
}

#[derive(PartialEq, Clone)]
pub struct HttpError(BaladeError);

impl HttpError {
    pub fn new(status: ErrorCode, message: &str) -> Self {
        HttpError(BaladeError::new(status, message))
    }

    pub fn status(&self) -> ErrorCode {
        self.0.status
    }

    pub fn message(&self) -> &str {
        &self.0.message
    }

    pub fn into_inner(self) -> BaladeError {
        self.0
    }
}

impl Debug for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        None
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let err = self.into_inner();
        let body = serde_json::json!({ "error": err.message }).to_string();

        let http_code = if (err.status as i16) < 0 {
            warn!("Invalid status code: {}", err.status);
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::from_u16(err.status as u16).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        };

        let err_msg = if let Ok(header_value) = HeaderValue::from_str(&err.message) {
            header_value
        } else {
            error!("Invalid error message: {}", err.message);
            HeaderValue::from_static("Unparsable message")
        };

        let mut resp = (http_code, body).into_response();
        resp.headers_mut().insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );
        resp.headers_mut().insert("x-balade-error", err_msg);
        resp
    }
}

impl From<BaladeError> for HttpError {
    fn from(err: BaladeError) -> Self {
        HttpError(err)
    }
}

impl From<HttpError> for BaladeError {
    fn from(err: HttpError) -> BaladeError {
        err.0
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::new(ErrorCode::BadRequest, &format!("Invalid JSON: {}", err))
    }
}

pub struct AxumAppBuilder {
    components: Arc<Components>,
}

impl AxumAppBuilder {
    pub fn new(components: Arc<Components>) -> Self {
        AxumAppBuilder { components }
    }

    pub fn build(self) -> Router {
        let cfg = &self.components.cfg;
        let routes = create_server_api_routes().merge(create_balade_api_routes());
        let cors = Self::configure_cors(&cfg.cors_allow_origin);

        let base_path = cfg.api_base_path.trim_end_matches('/');
        let router = if base_path.is_empty() {
            Router::new().merge(routes)
        } else {
            Router::new().nest(base_path, routes)
        };

        router
            .layer(from_fn(default_headers))
            .layer(from_fn(print_statuses))
            .layer(cors)
            .with_state(self.components)
    }

    fn configure_cors(cors_allow_origin: &Vec<String>) -> CorsLayer {
        let cors_layer = CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any);

        if cors_allow_origin.contains(&"*".to_string()) {
            cors_layer.allow_origin(Any)
        } else {
            let parsed_origins: Vec<HeaderValue> = cors_allow_origin
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(origin) => Some(origin),
                    Err(_) => {
                        error!("Invalid CORS origin '{}' is ignored", origin);
                        None
                    }
                })
                .collect();
            cors_layer.allow_origin(parsed_origins)
        }
    }
}
