// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use std::sync::Arc;

use axum::routing::get;
use balade_macros::IntoResponse;

use crate::api::Components;

#[derive(IntoResponse)]
pub(super) struct GreetingAxum(&'static str);

// GET /
async fn greeting() -> GreetingAxum {
    GreetingAxum("Bonjour")
}

pub(super) fn create_server_api_routes() -> axum::Router<Arc<Components>> {
    axum::Router::new().route("/", get(greeting))
}
