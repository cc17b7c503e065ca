// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::api::balade::{not_found, store_error, BaladeListAxum};
use crate::api::{Components, HttpError};
use crate::storage::field::Field;
use crate::storage::filter::Filter;
use axum::extract::{Path, State};
use balade_base::msg::balade_api::BaladeList;
use std::sync::Arc;

const SEARCH_ERROR: &str = "Erreur lors de la recherche des balades.";

// GET /search/:search
pub(super) async fn search(
    State(components): State<Arc<Components>>,
    Path(search): Path<String>,
) -> Result<BaladeListAxum, HttpError> {
    let term = search.to_lowercase();
    let filter = Filter::Or(vec![
        Filter::matches(Field::NomPoi, &term).map_err(store_error(SEARCH_ERROR))?,
        Filter::matches(Field::TexteIntro, &term).map_err(store_error(SEARCH_ERROR))?,
    ]);

    let balades = components
        .store
        .find(&filter, None)
        .await
        .map_err(store_error(SEARCH_ERROR))?;

    if balades.is_empty() {
        return Err(not_found("Aucune balade correspondante trouvée."));
    }
    Ok(BaladeList(balades).into())
}
