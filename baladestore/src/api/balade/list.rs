// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::api::balade::{store_error, BaladeListAxum};
use crate::api::{Components, HttpError};
use crate::storage::filter::Filter;
use axum::extract::State;
use balade_base::msg::balade_api::BaladeList;
use std::sync::Arc;

// GET /all
pub(super) async fn all(
    State(components): State<Arc<Components>>,
) -> Result<BaladeListAxum, HttpError> {
    let balades = components
        .store
        .find(&Filter::All, None)
        .await
        .map_err(store_error("Erreur lors de la récupération des balades."))?;
    Ok(BaladeList(balades).into())
}
