// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::api::balade::{not_found, store_error, StatusMessageAxum};
use crate::api::{Components, HttpError};
use axum::extract::{Path, State};
use balade_base::msg::balade_api::StatusMessage;
use std::sync::Arc;

// DELETE /delete/:id
pub(super) async fn remove(
    State(components): State<Arc<Components>>,
    Path(id): Path<String>,
) -> Result<StatusMessageAxum, HttpError> {
    let removed = components
        .store
        .find_by_id_and_delete(&id)
        .await
        .map_err(store_error("Erreur lors de la suppression de la balade."))?;

    match removed {
        Some(_) => Ok(StatusMessage::new("Balade supprimée avec succès.").into()),
        None => Err(not_found("Balade non trouvée.")),
    }
}
