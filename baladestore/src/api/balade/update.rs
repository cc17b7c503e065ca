// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::api::balade::{not_found, store_error, BaladeAxum, JsonBody, StatusMessageAxum};
use crate::api::{Components, ErrorCode, HttpError};
use crate::storage::field::{Field, FieldValue};
use crate::storage::filter::Filter;
use crate::storage::update::Update;
use axum::extract::{Path, State};
use balade_base::msg::balade_api::{BaladeUpdate, KeywordUpdate, NameUpdate, StatusMessage};
use std::sync::Arc;

// PUT /add-mot-cle/:id
//
// Read then write without a lock: concurrent appends to the same balade may lose one keyword.
pub(super) async fn add_keyword(
    State(components): State<Arc<Components>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<KeywordUpdate>,
) -> Result<BaladeAxum, HttpError> {
    const KEYWORD_ERROR: &str = "Erreur lors de l'ajout du mot clé.";

    let mot_cle = match body.mot_cle {
        Some(mot_cle) if !mot_cle.is_empty() => mot_cle,
        _ => {
            return Err(HttpError::new(
                ErrorCode::BadRequest,
                "Le mot clé est obligatoire.",
            ))
        }
    };

    let Some(balade) = components
        .store
        .find_by_id(&id)
        .await
        .map_err(store_error(KEYWORD_ERROR))?
    else {
        return Err(not_found("Balade non trouvée."));
    };

    if balade.mot_cle.contains(&mot_cle) {
        return Err(HttpError::new(
            ErrorCode::BadRequest,
            "Le mot clé existe déjà.",
        ));
    }

    let mut keywords = balade.mot_cle;
    keywords.push(mot_cle);
    let updated = components
        .store
        .find_by_id_and_update(&id, &Update::new().set(Field::MotCle, FieldValue::List(keywords)))
        .await
        .map_err(store_error(KEYWORD_ERROR))?;

    match updated {
        Some(balade) => Ok(balade.into()),
        None => Err(not_found("Balade non trouvée.")),
    }
}

// PUT /update-one/:id
pub(super) async fn update_one(
    State(components): State<Arc<Components>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<BaladeUpdate>,
) -> Result<BaladeAxum, HttpError> {
    let updated = components
        .store
        .find_by_id_and_update(&id, &Update::from(body))
        .await
        .map_err(store_error("Erreur lors de la mise à jour de la balade."))?;

    match updated {
        Some(balade) => Ok(balade.into()),
        None => Err(not_found("Balade non trouvée.")),
    }
}

// PUT /update-many/:search
pub(super) async fn update_many(
    State(components): State<Arc<Components>>,
    Path(search): Path<String>,
    JsonBody(body): JsonBody<NameUpdate>,
) -> Result<StatusMessageAxum, HttpError> {
    const UPDATE_ERROR: &str = "Erreur lors de la mise à jour des balades.";

    let nom_poi = match body.nom_poi {
        Some(nom_poi) if !nom_poi.is_empty() => nom_poi,
        _ => {
            return Err(HttpError::new(
                ErrorCode::BadRequest,
                "Le nom_poi est obligatoire.",
            ))
        }
    };

    let filter =
        Filter::matches(Field::TexteDescription, &search).map_err(store_error(UPDATE_ERROR))?;
    let result = components
        .store
        .update_many(&filter, &Update::new().set_text(Field::NomPoi, &nom_poi))
        .await
        .map_err(store_error(UPDATE_ERROR))?;

    if result.matched == 0 {
        return Err(not_found("Aucune balade à mettre à jour."));
    }
    Ok(StatusMessage::new("Balades mises à jour avec succès.").into())
}
