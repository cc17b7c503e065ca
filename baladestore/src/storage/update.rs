// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::storage::field::{Document, Field, FieldValue};
use balade_base::error::BaladeError;
use balade_base::msg::balade_api::{Balade, BaladeUpdate};

/// Ordered list of field assignments applied to matched documents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update {
    assignments: Vec<(Field, Option<FieldValue>)>,
}

/// Outcome of an update over many documents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UpdateResult {
    /// Number of documents selected by the filter
    pub matched: u64,
    /// Number of documents whose content actually changed
    pub modified: u64,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: Field, value: FieldValue) -> Self {
        self.assignments.push((field, Some(value)));
        self
    }

    pub fn set_text(self, field: Field, value: &str) -> Self {
        self.set(field, FieldValue::Text(value.to_string()))
    }

    pub fn clear(mut self, field: Field) -> Self {
        self.assignments.push((field, None));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Apply all assignments, returns true if the balade changed.
    pub fn apply(&self, balade: &mut Balade) -> Result<bool, BaladeError> {
        let mut changed = false;
        for (field, value) in &self.assignments {
            changed |= balade.set(*field, value.clone())?;
        }
        Ok(changed)
    }
}

impl From<BaladeUpdate> for Update {
    fn from(body: BaladeUpdate) -> Self {
        let mut update = Update::new();
        let texts = [
            (Field::NomPoi, body.nom_poi),
            (Field::Adresse, body.adresse),
            (Field::Categorie, body.categorie),
            (Field::TexteIntro, body.texte_intro),
            (Field::TexteDescription, body.texte_description),
            (Field::UrlSite, body.url_site),
            (Field::CodePostal, body.code_postal),
            (Field::DateSaisie, body.date_saisie),
        ];

        for (field, value) in texts {
            update = match value {
                Some(Some(text)) => update.set(field, FieldValue::Text(text)),
                Some(None) => update.clear(field),
                None => update,
            };
        }

        match body.mot_cle {
            Some(Some(list)) => update.set(Field::MotCle, FieldValue::List(list)),
            Some(None) => update.clear(Field::MotCle),
            None => update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_apply() {
        let mut balade = Balade {
            nom_poi: Some("Ancien".to_string()),
            url_site: Some("https://example.com".to_string()),
            ..Balade::default()
        };

        let update = Update::new()
            .set_text(Field::NomPoi, "Nouveau")
            .clear(Field::UrlSite);
        assert!(update.apply(&mut balade).unwrap());
        assert_eq!(balade.nom_poi, Some("Nouveau".to_string()));
        assert_eq!(balade.url_site, None);

        assert!(!update.apply(&mut balade).unwrap(), "nothing changes twice");
    }

    #[rstest]
    fn test_from_body() {
        let body = BaladeUpdate {
            adresse: Some(Some("Champ de Mars".to_string())),
            url_site: Some(None),
            mot_cle: Some(Some(vec!["vue".to_string()])),
            ..BaladeUpdate::default()
        };

        let update = Update::from(body);
        assert_eq!(
            update,
            Update::new()
                .set_text(Field::Adresse, "Champ de Mars")
                .clear(Field::UrlSite)
                .set(Field::MotCle, FieldValue::List(vec!["vue".to_string()]))
        );
    }

    #[rstest]
    fn test_empty_body() {
        assert!(Update::from(BaladeUpdate::default()).is_empty());
    }
}
