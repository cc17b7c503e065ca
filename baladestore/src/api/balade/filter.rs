// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::api::balade::{not_found, store_error, BaladeListAxum};
use crate::api::{Components, HttpError};
use crate::storage::field::Field;
use crate::storage::filter::{Filter, Sort};
use axum::extract::{Path, State};
use balade_base::msg::balade_api::BaladeList;
use std::sync::Arc;

/// Balades with more keywords than this are returned by GET /mot-cle
const MANY_KEYWORDS: usize = 5;

// GET /site-internet
pub(super) async fn with_website(
    State(components): State<Arc<Components>>,
) -> Result<BaladeListAxum, HttpError> {
    let balades = components
        .store
        .find(&Filter::NotNull(Field::UrlSite), None)
        .await
        .map_err(store_error(
            "Erreur lors de la récupération des balades avec site internet.",
        ))?;

    if balades.is_empty() {
        return Err(not_found("Aucune balade avec site internet trouvé."));
    }
    Ok(BaladeList(balades).into())
}

// GET /mot-cle
pub(super) async fn with_many_keywords(
    State(components): State<Arc<Components>>,
) -> Result<BaladeListAxum, HttpError> {
    let filter = Filter::And(vec![
        Filter::NotNull(Field::MotCle),
        Filter::SizeGreaterThan {
            field: Field::MotCle,
            size: MANY_KEYWORDS,
        },
    ]);

    let balades = components
        .store
        .find(&filter, None)
        .await
        .map_err(store_error(
            "Erreur lors de la récupération des balades avec plus de 5 mots-clés.",
        ))?;

    if balades.is_empty() {
        return Err(not_found("Aucune balade avec plus de 5 mots-clés trouvé."));
    }
    Ok(BaladeList(balades).into())
}

// GET /publie/:annee
//
// An empty result is not an error here.
pub(super) async fn published_in(
    State(components): State<Arc<Components>>,
    Path(annee): Path<String>,
) -> Result<BaladeListAxum, HttpError> {
    const PUBLISHED_ERROR: &str = "Erreur lors de la récupération des balades publiées.";

    let filter =
        Filter::matches(Field::DateSaisie, &annee).map_err(store_error(PUBLISHED_ERROR))?;
    let balades = components
        .store
        .find(&filter, Some(Sort::ascending(Field::DateSaisie)))
        .await
        .map_err(store_error(PUBLISHED_ERROR))?;
    Ok(BaladeList(balades).into())
}
