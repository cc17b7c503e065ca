// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::api::balade::{not_found, store_error, BaladeAxum};
use crate::api::{Components, HttpError};
use axum::extract::{Path, State};
use std::sync::Arc;

// GET /id/:id
pub(super) async fn by_id(
    State(components): State<Arc<Components>>,
    Path(id): Path<String>,
) -> Result<BaladeAxum, HttpError> {
    let balade = components
        .store
        .find_by_id(&id)
        .await
        .map_err(store_error("Erreur lors de la récupération de la balade."))?;

    match balade {
        Some(balade) => Ok(balade.into()),
        None => Err(not_found("Balade non trouvée.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{components, failing_components, id_of};
    use crate::api::ErrorCode;
    use crate::storage::object_id::ObjectId;
    use balade_base::msg::balade_api::Balade;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn test_by_id(#[future] components: Arc<Components>) {
        let components = components.await;
        let id = id_of(&components, "Musée du Louvre").await;

        let balade: Balade = by_id(State(components), Path(id.clone()))
            .await
            .unwrap()
            .into();
        assert_eq!(balade.id, id);
        assert_eq!(balade.adresse, Some("Rue de Rivoli".to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_by_id_not_found(#[future] components: Arc<Components>) {
        let err = by_id(State(components.await), Path(ObjectId::new().to_string()))
            .await
            .err()
            .unwrap();
        assert_eq!(err, HttpError::new(ErrorCode::NotFound, "Balade non trouvée."));
    }

    #[rstest]
    #[tokio::test]
    async fn test_by_id_malformed(#[future] components: Arc<Components>) {
        let err = by_id(State(components.await), Path("pas-un-id".to_string()))
            .await
            .err()
            .unwrap();
        assert_eq!(
            err,
            HttpError::new(
                ErrorCode::InternalServerError,
                "Erreur lors de la récupération de la balade."
            )
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_by_id_store_error(failing_components: Arc<Components>) {
        let err = by_id(State(failing_components), Path(ObjectId::new().to_string()))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), ErrorCode::InternalServerError);
    }
}
