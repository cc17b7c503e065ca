// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::api::balade::{store_error, BaladeAxum, JsonBody};
use crate::api::{Components, ErrorCode, HttpError};
use axum::extract::State;
use balade_base::msg::balade_api::NewBalade;
use std::sync::Arc;

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |value| value.trim().is_empty())
}

// POST /add
pub(super) async fn add(
    State(components): State<Arc<Components>>,
    JsonBody(new_balade): JsonBody<NewBalade>,
) -> Result<BaladeAxum, HttpError> {
    if is_blank(&new_balade.nom_poi)
        || is_blank(&new_balade.adresse)
        || is_blank(&new_balade.categorie)
    {
        return Err(HttpError::new(
            ErrorCode::BadRequest,
            "Les champs 'nom_poi', 'adresse' et 'categorie' sont obligatoires.",
        ));
    }

    let balade = components
        .store
        .insert_one(new_balade.into())
        .await
        .map_err(store_error("Erreur lors de l'ajout de la balade."))?;
    Ok(balade.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{components, failing_components};
    use balade_base::msg::balade_api::Balade;
    use rstest::rstest;

    fn tour_eiffel() -> NewBalade {
        NewBalade {
            nom_poi: Some("Tour Eiffel".to_string()),
            adresse: Some("Champ de Mars".to_string()),
            categorie: Some("Monument".to_string()),
            mot_cle: Some(vec!["vue".to_string()]),
            ..NewBalade::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_add(#[future] components: Arc<Components>) {
        let components = components.await;
        let balade: Balade = add(State(components.clone()), JsonBody(tour_eiffel()))
            .await
            .unwrap()
            .into();

        assert_eq!(balade.id.len(), 24);
        assert_eq!(balade.nom_poi, Some("Tour Eiffel".to_string()));
        assert_eq!(balade.adresse, Some("Champ de Mars".to_string()));
        assert_eq!(balade.mot_cle, vec!["vue"]);
        assert_eq!(
            components.store.find_by_id(&balade.id).await.unwrap(),
            Some(balade)
        );
    }

    #[rstest]
    #[case(NewBalade { nom_poi: None, ..tour_eiffel() })]
    #[case(NewBalade { adresse: Some("".to_string()), ..tour_eiffel() })]
    #[case(NewBalade { categorie: Some("  ".to_string()), ..tour_eiffel() })]
    #[case(NewBalade::default())]
    #[tokio::test]
    async fn test_add_missing_fields(
        #[future] components: Arc<Components>,
        #[case] new_balade: NewBalade,
    ) {
        let err = add(State(components.await), JsonBody(new_balade))
            .await
            .err()
            .unwrap();
        assert_eq!(
            err,
            HttpError::new(
                ErrorCode::BadRequest,
                "Les champs 'nom_poi', 'adresse' et 'categorie' sont obligatoires."
            )
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_store_error(failing_components: Arc<Components>) {
        let err = add(State(failing_components), JsonBody(tour_eiffel()))
            .await
            .err()
            .unwrap();
        assert_eq!(
            err,
            HttpError::new(
                ErrorCode::InternalServerError,
                "Erreur lors de l'ajout de la balade."
            )
        );
    }
}
