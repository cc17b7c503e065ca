// Copyright 2026 ReductSoftware UG
// This Source Code Form is subject to the terms of the Mozilla Public
//    License, v. 2.0. If a copy of the MPL was not distributed with this
//    file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A walking-tour point of interest
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct Balade {
    /// Identifier generated by the store (24 hex characters)
    #[serde(rename = "_id")]
    pub id: String,
    /// Name of the point of interest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom_poi: Option<String>,
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texte_intro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texte_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_site: Option<String>,
    /// Postal code, identifies the arrondissement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_postal: Option<String>,
    /// Entry date, free text containing the year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_saisie: Option<String>,
    /// Keywords, unique within a record
    #[serde(default)]
    pub mot_cle: Vec<String>,
}

/// Body of POST /add
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct NewBalade {
    pub nom_poi: Option<String>,
    pub adresse: Option<String>,
    pub categorie: Option<String>,
    pub texte_intro: Option<String>,
    pub texte_description: Option<String>,
    pub url_site: Option<String>,
    pub code_postal: Option<String>,
    pub date_saisie: Option<String>,
    pub mot_cle: Option<Vec<String>>,
}

impl From<NewBalade> for Balade {
    fn from(new: NewBalade) -> Self {
        Balade {
            id: String::new(),
            nom_poi: new.nom_poi,
            adresse: new.adresse,
            categorie: new.categorie,
            texte_intro: new.texte_intro,
            texte_description: new.texte_description,
            url_site: new.url_site,
            code_postal: new.code_postal,
            date_saisie: new.date_saisie,
            mot_cle: new.mot_cle.unwrap_or_default(),
        }
    }
}

/// Body of PUT /update-one/:id
///
/// Every field has three states: absent (keep the stored value),
/// `null` (clear it) or a value (replace it).
#[derive(Deserialize, Default, Clone, Debug, PartialEq)]
pub struct BaladeUpdate {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub nom_poi: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub adresse: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub categorie: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub texte_intro: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub texte_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub url_site: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub code_postal: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub date_saisie: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub mot_cle: Option<Option<Vec<String>>>,
}

fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Body of PUT /add-mot-cle/:id
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct KeywordUpdate {
    pub mot_cle: Option<String>,
}

/// Body of PUT /update-many/:search
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct NameUpdate {
    pub nom_poi: Option<String>,
}

/// List of balades, serialized as a plain JSON array
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct BaladeList(pub Vec<Balade>);

/// Number of balades matching a query
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct BaladeCount {
    pub count: u64,
}

/// Number of balades per postal code
///
/// Records without a postal code are counted under the `null` key.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct Synthesis(pub BTreeMap<String, u64>);

/// Unique categories
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct CategoryList(pub Vec<String>);

/// Human readable outcome of a mutation
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: &str) -> Self {
        StatusMessage {
            message: message.to_string(),
        }
    }
}
