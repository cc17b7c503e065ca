// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::api::balade::{store_error, BaladeCountAxum, CategoryListAxum, SynthesisAxum};
use crate::api::{Components, HttpError};
use crate::storage::field::Field;
use crate::storage::filter::Filter;
use axum::extract::{Path, State};
use balade_base::msg::balade_api::{BaladeCount, CategoryList, Synthesis};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key of the group of balades without a postal code
const MISSING_KEY: &str = "null";

// GET /arrondissement/:num_arrondissement
pub(super) async fn count_in_arrondissement(
    State(components): State<Arc<Components>>,
    Path(num_arrondissement): Path<String>,
) -> Result<BaladeCountAxum, HttpError> {
    let count = components
        .store
        .count(&Filter::equals(Field::CodePostal, &num_arrondissement))
        .await
        .map_err(store_error(&format!(
            "Erreur lors du comptage des balades pour l'arrondissement {}.",
            num_arrondissement
        )))?;
    Ok(BaladeCount { count }.into())
}

// GET /synthese
pub(super) async fn synthesis(
    State(components): State<Arc<Components>>,
) -> Result<SynthesisAxum, HttpError> {
    let groups = components
        .store
        .count_by(Field::CodePostal)
        .await
        .map_err(store_error(
            "Erreur lors de la récupération du résumé par arrondissement.",
        ))?;

    let mut synthesis = BTreeMap::new();
    for (code_postal, count) in groups {
        let key = code_postal.unwrap_or_else(|| MISSING_KEY.to_string());
        *synthesis.entry(key).or_insert(0) += count;
    }
    Ok(Synthesis(synthesis).into())
}

// GET /categories
pub(super) async fn categories(
    State(components): State<Arc<Components>>,
) -> Result<CategoryListAxum, HttpError> {
    let categories = components
        .store
        .distinct(Field::Categorie)
        .await
        .map_err(store_error(
            "Erreur lors de la récupération des catégories de balades.",
        ))?;
    Ok(CategoryList(categories).into())
}
