// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

mod create;
mod filter;
mod get;
mod list;
mod remove;
mod search;
mod stats;
mod update;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::FromRequest;
use axum::http::Request;
use axum::routing::{delete, get, post, put};
use bytes::Bytes;
use log::error;
use serde::de::DeserializeOwned;

use crate::api::{Components, ErrorCode, HttpError};
use balade_base::bad_request;
use balade_base::error::BaladeError;
use balade_base::msg::balade_api::{
    Balade, BaladeCount, BaladeList, CategoryList, StatusMessage, Synthesis,
};
use balade_macros::{IntoResponse, Twin};

#[derive(IntoResponse, Twin)]
pub(super) struct BaladeAxum(Balade);

#[derive(IntoResponse, Twin)]
pub(super) struct BaladeListAxum(BaladeList);

#[derive(IntoResponse, Twin)]
pub(super) struct BaladeCountAxum(BaladeCount);

#[derive(IntoResponse, Twin)]
pub(super) struct SynthesisAxum(Synthesis);

#[derive(IntoResponse, Twin)]
pub(super) struct CategoryListAxum(CategoryList);

#[derive(IntoResponse, Twin)]
pub(super) struct StatusMessageAxum(StatusMessage);

/// JSON request body, an empty body is the default value.
pub(super) struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Bytes: FromRequest<S>,
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = HttpError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|_| HttpError::from(bad_request!("Invalid body")))?;

        if body.is_empty() {
            return Ok(JsonBody(T::default()));
        }

        let value: T = serde_json::from_slice(&body)?;
        Ok(JsonBody(value))
    }
}

/// Log a store failure and answer with a generic message.
pub(super) fn store_error(message: &str) -> impl FnOnce(BaladeError) -> HttpError + '_ {
    move |err| {
        error!("{}: {}", message, err);
        HttpError::new(ErrorCode::InternalServerError, message)
    }
}

pub(super) fn not_found(message: &str) -> HttpError {
    HttpError::new(ErrorCode::NotFound, message)
}

pub(super) fn create_balade_api_routes() -> axum::Router<Arc<Components>> {
    axum::Router::new()
        .route("/all", get(list::all))
        .route("/id/{id}", get(get::by_id))
        .route("/search/{search}", get(search::search))
        .route("/site-internet", get(filter::with_website))
        .route("/mot-cle", get(filter::with_many_keywords))
        .route("/publie/{annee}", get(filter::published_in))
        .route(
            "/arrondissement/{num_arrondissement}",
            get(stats::count_in_arrondissement),
        )
        .route("/synthese", get(stats::synthesis))
        .route("/categories", get(stats::categories))
        .route("/add", post(create::add))
        .route("/add-mot-cle/{id}", put(update::add_keyword))
        .route("/update-one/{id}", put(update::update_one))
        .route("/update-many/{search}", put(update::update_many))
        .route("/delete/{id}", delete(remove::remove))
}
