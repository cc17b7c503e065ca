// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::storage::field::{Document, Field, FieldRef};
use balade_base::error::BaladeError;
use balade_base::internal_server_error;
use balade_base::msg::balade_api::Balade;
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;

/// Selection of documents in a collection.
#[derive(Clone, Debug)]
pub enum Filter {
    /// Every document
    All,
    /// Text matches the regular expression; for lists, any element matches
    Matches { field: Field, regex: Regex },
    /// Text equals the value; for lists, any element equals
    Equals { field: Field, value: String },
    /// Field is present and not null
    NotNull(Field),
    /// List has more than `size` elements
    SizeGreaterThan { field: Field, size: usize },
    Or(Vec<Filter>),
    And(Vec<Filter>),
}

impl Filter {
    /// Case-insensitive regular expression match on a field.
    ///
    /// An invalid pattern is an error of the store, like any other malformed query.
    pub fn matches(field: Field, pattern: &str) -> Result<Filter, BaladeError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| internal_server_error!("Invalid regular expression: {}", err))?;
        Ok(Filter::Matches { field, regex })
    }

    pub fn equals(field: Field, value: &str) -> Filter {
        Filter::Equals {
            field,
            value: value.to_string(),
        }
    }

    /// Check if the balade is selected by the filter.
    pub fn apply(&self, balade: &Balade) -> bool {
        match self {
            Filter::All => true,
            Filter::Matches { field, regex } => match balade.get(*field) {
                FieldRef::Missing => false,
                FieldRef::Text(text) => regex.is_match(text),
                FieldRef::List(list) => list.iter().any(|item| regex.is_match(item)),
            },
            Filter::Equals { field, value } => match balade.get(*field) {
                FieldRef::Missing => false,
                FieldRef::Text(text) => text == value,
                FieldRef::List(list) => list.iter().any(|item| item == value),
            },
            Filter::NotNull(field) => balade.get(*field) != FieldRef::Missing,
            Filter::SizeGreaterThan { field, size } => match balade.get(*field) {
                FieldRef::List(list) => list.len() > *size,
                _ => false,
            },
            Filter::Or(filters) => filters.iter().any(|filter| filter.apply(balade)),
            Filter::And(filters) => filters.iter().all(|filter| filter.apply(balade)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Sort specification for find results.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sort {
    pub field: Field,
    pub order: Order,
}

impl Sort {
    pub fn ascending(field: Field) -> Self {
        Sort {
            field,
            order: Order::Ascending,
        }
    }

    pub fn descending(field: Field) -> Self {
        Sort {
            field,
            order: Order::Descending,
        }
    }

    /// Compare two balades, documents without the field come first in ascending order.
    pub fn compare(&self, a: &Balade, b: &Balade) -> Ordering {
        let ordering = a.get(self.field).cmp(&b.get(self.field));
        match self.order {
            Order::Ascending => ordering,
            Order::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balade_base::error::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn balade() -> Balade {
        Balade {
            id: "65a1b2c3d4e5f6a7b8c9d0e1".to_string(),
            nom_poi: Some("Tour Eiffel".to_string()),
            texte_intro: Some("La dame de fer".to_string()),
            code_postal: Some("75007".to_string()),
            mot_cle: vec!["monument".to_string(), "vue".to_string()],
            ..Balade::default()
        }
    }

    #[rstest]
    #[case(Field::NomPoi, "eiffel", true)]
    #[case(Field::NomPoi, "EIFFEL", true)]
    #[case(Field::NomPoi, "^tour", true)]
    #[case(Field::NomPoi, "louvre", false)]
    #[case(Field::UrlSite, ".*", false)]
    #[case(Field::MotCle, "VUE", true)]
    #[case(Field::MotCle, "parc", false)]
    fn test_matches(
        balade: Balade,
        #[case] field: Field,
        #[case] pattern: &str,
        #[case] expected: bool,
    ) {
        let filter = Filter::matches(field, pattern).unwrap();
        assert_eq!(filter.apply(&balade), expected);
    }

    #[rstest]
    fn test_invalid_pattern() {
        let err = Filter::matches(Field::NomPoi, "(").err().unwrap();
        assert_eq!(err.status(), ErrorCode::InternalServerError);
    }

    #[rstest]
    #[case(Filter::equals(Field::CodePostal, "75007"), true)]
    #[case(Filter::equals(Field::CodePostal, "7500"), false)]
    #[case(Filter::equals(Field::MotCle, "vue"), true)]
    #[case(Filter::NotNull(Field::NomPoi), true)]
    #[case(Filter::NotNull(Field::UrlSite), false)]
    #[case(Filter::SizeGreaterThan { field: Field::MotCle, size: 1 }, true)]
    #[case(Filter::SizeGreaterThan { field: Field::MotCle, size: 2 }, false)]
    #[case(Filter::SizeGreaterThan { field: Field::NomPoi, size: 0 }, false)]
    #[case(Filter::All, true)]
    fn test_apply(balade: Balade, #[case] filter: Filter, #[case] expected: bool) {
        assert_eq!(filter.apply(&balade), expected);
    }

    #[rstest]
    fn test_or_and(balade: Balade) {
        let eiffel = Filter::matches(Field::NomPoi, "eiffel").unwrap();
        let fer = Filter::matches(Field::TexteIntro, "fer").unwrap();
        let louvre = Filter::matches(Field::TexteIntro, "louvre").unwrap();

        assert!(Filter::Or(vec![louvre.clone(), fer.clone()]).apply(&balade));
        assert!(!Filter::And(vec![louvre.clone(), eiffel.clone()]).apply(&balade));
        assert!(Filter::And(vec![eiffel, fer]).apply(&balade));
        assert!(!Filter::Or(vec![]).apply(&balade));
    }

    #[rstest]
    fn test_sort() {
        let with_date = |date: Option<&str>| Balade {
            date_saisie: date.map(str::to_string),
            ..Balade::default()
        };
        let mut balades = vec![
            with_date(Some("2021-03-01")),
            with_date(None),
            with_date(Some("2019-10-12")),
        ];

        let sort = Sort::ascending(Field::DateSaisie);
        balades.sort_by(|a, b| sort.compare(a, b));
        let dates: Vec<_> = balades.iter().map(|b| b.date_saisie.clone()).collect();
        assert_eq!(
            dates,
            vec![
                None,
                Some("2019-10-12".to_string()),
                Some("2021-03-01".to_string())
            ]
        );

        let sort = Sort::descending(Field::DateSaisie);
        balades.sort_by(|a, b| sort.compare(a, b));
        assert_eq!(balades[2].date_saisie, None);
    }
}
