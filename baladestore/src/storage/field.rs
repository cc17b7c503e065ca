// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use balade_base::error::BaladeError;
use balade_base::internal_server_error;
use balade_base::msg::balade_api::Balade;
use std::fmt::{Display, Formatter};

/// Queryable fields of a balade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    NomPoi,
    Adresse,
    Categorie,
    TexteIntro,
    TexteDescription,
    UrlSite,
    CodePostal,
    DateSaisie,
    MotCle,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::NomPoi => "nom_poi",
            Field::Adresse => "adresse",
            Field::Categorie => "categorie",
            Field::TexteIntro => "texte_intro",
            Field::TexteDescription => "texte_description",
            Field::UrlSite => "url_site",
            Field::CodePostal => "code_postal",
            Field::DateSaisie => "date_saisie",
            Field::MotCle => "mot_cle",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Borrowed view of a field in a stored balade.
///
/// The variant order is the sort order: missing values come first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldRef<'a> {
    Missing,
    Text(&'a str),
    List(&'a [String]),
}

/// Owned value assigned to a field by an update.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

/// Field access for stored documents.
pub trait Document {
    fn get(&self, field: Field) -> FieldRef<'_>;

    /// Assign a value to the field, `None` clears it.
    ///
    /// Returns true if the stored value changed.
    fn set(&mut self, field: Field, value: Option<FieldValue>) -> Result<bool, BaladeError>;
}

fn text_slot(balade: &mut Balade, field: Field) -> Option<&mut Option<String>> {
    match field {
        Field::NomPoi => Some(&mut balade.nom_poi),
        Field::Adresse => Some(&mut balade.adresse),
        Field::Categorie => Some(&mut balade.categorie),
        Field::TexteIntro => Some(&mut balade.texte_intro),
        Field::TexteDescription => Some(&mut balade.texte_description),
        Field::UrlSite => Some(&mut balade.url_site),
        Field::CodePostal => Some(&mut balade.code_postal),
        Field::DateSaisie => Some(&mut balade.date_saisie),
        Field::MotCle => None,
    }
}

impl Document for Balade {
    fn get(&self, field: Field) -> FieldRef<'_> {
        let text = match field {
            Field::NomPoi => &self.nom_poi,
            Field::Adresse => &self.adresse,
            Field::Categorie => &self.categorie,
            Field::TexteIntro => &self.texte_intro,
            Field::TexteDescription => &self.texte_description,
            Field::UrlSite => &self.url_site,
            Field::CodePostal => &self.code_postal,
            Field::DateSaisie => &self.date_saisie,
            Field::MotCle => return FieldRef::List(&self.mot_cle),
        };

        match text {
            Some(text) => FieldRef::Text(text),
            None => FieldRef::Missing,
        }
    }

    fn set(&mut self, field: Field, value: Option<FieldValue>) -> Result<bool, BaladeError> {
        if field == Field::MotCle {
            let list = match value {
                Some(FieldValue::List(list)) => list,
                None => vec![],
                Some(FieldValue::Text(_)) => {
                    return Err(internal_server_error!("Field '{}' expects a list", field))
                }
            };
            let changed = self.mot_cle != list;
            self.mot_cle = list;
            return Ok(changed);
        }

        let text = match value {
            Some(FieldValue::Text(text)) => Some(text),
            None => None,
            Some(FieldValue::List(_)) => {
                return Err(internal_server_error!("Field '{}' expects a string", field))
            }
        };

        let Some(slot) = text_slot(self, field) else {
            return Err(internal_server_error!("Field '{}' is not a string", field));
        };
        let changed = *slot != text;
        *slot = text;
        Ok(changed)
    }
}
