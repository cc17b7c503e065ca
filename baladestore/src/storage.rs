// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

pub mod collection;
pub mod field;
pub mod filter;
pub mod object_id;
mod snapshot;
pub mod update;

use crate::storage::field::Field;
use crate::storage::filter::{Filter, Sort};
use crate::storage::update::{Update, UpdateResult};
use async_trait::async_trait;
use balade_base::error::BaladeError;
use balade_base::msg::balade_api::Balade;
use std::collections::BTreeMap;

/// Document store holding the balade collection.
///
/// Identifiers are passed as strings: a malformed identifier is an error
/// of the store, not a missing document.
#[async_trait]
pub trait ManageBalades: Send + Sync {
    /// Insert a new balade, the identifier is generated by the store.
    async fn insert_one(&self, balade: Balade) -> Result<Balade, BaladeError>;

    async fn find(&self, filter: &Filter, sort: Option<Sort>) -> Result<Vec<Balade>, BaladeError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Balade>, BaladeError>;

    /// Apply the update and return the document after it.
    async fn find_by_id_and_update(
        &self,
        id: &str,
        update: &Update,
    ) -> Result<Option<Balade>, BaladeError>;

    /// Remove the document and return it.
    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Balade>, BaladeError>;

    async fn update_many(&self, filter: &Filter, update: &Update)
        -> Result<UpdateResult, BaladeError>;

    async fn count(&self, filter: &Filter) -> Result<u64, BaladeError>;

    /// Sorted unique values of a field, list elements are counted separately.
    async fn distinct(&self, field: Field) -> Result<Vec<String>, BaladeError>;

    /// Number of documents per value of a field, `None` groups missing values.
    async fn count_by(&self, field: Field) -> Result<BTreeMap<Option<String>, u64>, BaladeError>;

    /// Write pending changes to disk.
    async fn sync_fs(&self) -> Result<(), BaladeError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        pub Store {}

        #[async_trait]
        impl ManageBalades for Store {
            async fn insert_one(&self, balade: Balade) -> Result<Balade, BaladeError>;
            async fn find(&self, filter: &Filter, sort: Option<Sort>) -> Result<Vec<Balade>, BaladeError>;
            async fn find_by_id(&self, id: &str) -> Result<Option<Balade>, BaladeError>;
            async fn find_by_id_and_update(&self, id: &str, update: &Update) -> Result<Option<Balade>, BaladeError>;
            async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Balade>, BaladeError>;
            async fn update_many(&self, filter: &Filter, update: &Update) -> Result<UpdateResult, BaladeError>;
            async fn count(&self, filter: &Filter) -> Result<u64, BaladeError>;
            async fn distinct(&self, field: Field) -> Result<Vec<String>, BaladeError>;
            async fn count_by(&self, field: Field) -> Result<BTreeMap<Option<String>, u64>, BaladeError>;
            async fn sync_fs(&self) -> Result<(), BaladeError>;
        }
    }
}
