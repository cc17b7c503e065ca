// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::core::sync::AsyncRwLock;
use crate::storage::field::{Document, Field, FieldRef};
use crate::storage::filter::{Filter, Sort};
use crate::storage::object_id::ObjectId;
use crate::storage::snapshot::Snapshot;
use crate::storage::update::{Update, UpdateResult};
use crate::storage::ManageBalades;
use async_trait::async_trait;
use balade_base::error::BaladeError;
use balade_base::msg::balade_api::Balade;
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

type Documents = BTreeMap<ObjectId, Balade>;

/// In-memory collection of balades with optional snapshot persistence.
///
/// Documents are kept in identifier order, which is the insertion order
/// as long as the identifier counter doesn't wrap (see [`ObjectId`]).
pub struct BaladeCollection {
    docs: AsyncRwLock<Documents>,
    snapshot: Option<Snapshot>,
    write_through: bool,
    dirty: AtomicBool,
}

pub struct BaladeCollectionBuilder {
    data_path: Option<PathBuf>,
    sync_interval: Duration,
}

impl BaladeCollectionBuilder {
    /// Directory of the snapshot file, the collection lives only in memory without it.
    pub fn with_data_path(mut self, data_path: Option<PathBuf>) -> Self {
        self.data_path = data_path;
        self
    }

    /// Zero interval writes every mutation through to the snapshot.
    pub fn with_sync_interval(mut self, sync_interval: Duration) -> Self {
        self.sync_interval = sync_interval;
        self
    }

    pub async fn build(self) -> Result<BaladeCollection, BaladeError> {
        let snapshot = self.data_path.as_deref().map(Snapshot::new);
        let docs = match &snapshot {
            Some(snapshot) => {
                let docs = snapshot.load().await?;
                info!("Loaded {} balades from {:?}", docs.len(), snapshot.path());
                docs
            }
            None => {
                info!("No data path, balades are kept in memory only");
                Documents::new()
            }
        };

        Ok(BaladeCollection {
            docs: AsyncRwLock::new(docs),
            snapshot,
            write_through: self.sync_interval.is_zero(),
            dirty: AtomicBool::new(false),
        })
    }
}

impl BaladeCollection {
    pub fn builder() -> BaladeCollectionBuilder {
        BaladeCollectionBuilder {
            data_path: None,
            sync_interval: Duration::from_secs(1),
        }
    }

    /// Apply the changes with the write lock held, `None` removes the document.
    ///
    /// The changes are reverted when the snapshot can't be written through.
    async fn commit(
        &self,
        docs: &mut Documents,
        changes: Vec<(ObjectId, Option<Balade>)>,
    ) -> Result<(), BaladeError> {
        let previous: Vec<_> = changes
            .into_iter()
            .map(|(id, change)| {
                let old = match change {
                    Some(balade) => docs.insert(id, balade),
                    None => docs.remove(&id),
                };
                (id, old)
            })
            .collect();

        if let Err(err) = self.mark_changed(docs).await {
            for (id, old) in previous.into_iter().rev() {
                match old {
                    Some(balade) => docs.insert(id, balade),
                    None => docs.remove(&id),
                };
            }
            return Err(err);
        }
        Ok(())
    }

    async fn mark_changed(&self, docs: &Documents) -> Result<(), BaladeError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };

        if self.write_through {
            snapshot.save(docs).await
        } else {
            self.dirty.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn group_key(value: FieldRef<'_>) -> Option<String> {
        match value {
            FieldRef::Missing => None,
            FieldRef::Text(text) => Some(text.to_string()),
            // lists are grouped by their whole content
            FieldRef::List(list) => Some(list.join(",")),
        }
    }
}

#[async_trait]
impl ManageBalades for BaladeCollection {
    async fn insert_one(&self, mut balade: Balade) -> Result<Balade, BaladeError> {
        let id = ObjectId::new();
        balade.id = id.to_string();

        let mut docs = self.docs.write().await?;
        self.commit(&mut docs, vec![(id, Some(balade.clone()))]).await?;
        debug!("Balade '{}' is inserted", id);
        Ok(balade)
    }

    async fn find(&self, filter: &Filter, sort: Option<Sort>) -> Result<Vec<Balade>, BaladeError> {
        let docs = self.docs.read().await?;
        let mut found: Vec<Balade> = docs
            .values()
            .filter(|balade| filter.apply(balade))
            .cloned()
            .collect();

        if let Some(sort) = sort {
            found.sort_by(|a, b| sort.compare(a, b));
        }
        Ok(found)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Balade>, BaladeError> {
        let id: ObjectId = id.parse()?;
        let docs = self.docs.read().await?;
        Ok(docs.get(&id).cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        update: &Update,
    ) -> Result<Option<Balade>, BaladeError> {
        let id: ObjectId = id.parse()?;
        let mut docs = self.docs.write().await?;
        let Some(current) = docs.get(&id) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        if update.apply(&mut updated)? {
            self.commit(&mut docs, vec![(id, Some(updated.clone()))]).await?;
            debug!("Balade '{}' is updated", id);
        }
        Ok(Some(updated))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Balade>, BaladeError> {
        let id: ObjectId = id.parse()?;
        let mut docs = self.docs.write().await?;
        let Some(removed) = docs.get(&id).cloned() else {
            return Ok(None);
        };

        self.commit(&mut docs, vec![(id, None)]).await?;
        debug!("Balade '{}' is removed", id);
        Ok(Some(removed))
    }

    async fn update_many(
        &self,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateResult, BaladeError> {
        let mut docs = self.docs.write().await?;
        let mut result = UpdateResult::default();
        let mut changes = Vec::new();
        for (id, balade) in docs.iter().filter(|(_, balade)| filter.apply(balade)) {
            result.matched += 1;
            let mut updated = balade.clone();
            if update.apply(&mut updated)? {
                changes.push((*id, Some(updated)));
            }
        }

        result.modified = changes.len() as u64;
        if !changes.is_empty() {
            self.commit(&mut docs, changes).await?;
        }
        debug!(
            "{} balades matched, {} modified",
            result.matched, result.modified
        );
        Ok(result)
    }

    async fn count(&self, filter: &Filter) -> Result<u64, BaladeError> {
        let docs = self.docs.read().await?;
        Ok(docs.values().filter(|balade| filter.apply(balade)).count() as u64)
    }

    async fn distinct(&self, field: Field) -> Result<Vec<String>, BaladeError> {
        let docs = self.docs.read().await?;
        let mut values = BTreeSet::new();
        for balade in docs.values() {
            match balade.get(field) {
                FieldRef::Missing => {}
                FieldRef::Text(text) => {
                    values.insert(text.to_string());
                }
                FieldRef::List(list) => values.extend(list.iter().cloned()),
            }
        }
        Ok(values.into_iter().collect())
    }

    async fn count_by(&self, field: Field) -> Result<BTreeMap<Option<String>, u64>, BaladeError> {
        let docs = self.docs.read().await?;
        let mut groups = BTreeMap::new();
        for balade in docs.values() {
            *groups.entry(Self::group_key(balade.get(field))).or_insert(0) += 1;
        }
        Ok(groups)
    }

    async fn sync_fs(&self) -> Result<(), BaladeError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };

        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        let docs = self.docs.read().await?;
        if let Err(err) = snapshot.save(&docs).await {
            self.dirty.store(true, Ordering::SeqCst);
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::field::FieldValue;
    use crate::storage::snapshot::SNAPSHOT_FILE;
    use assert_matches::assert_matches;
    use balade_base::error::ErrorCode;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn balade(nom: &str, code_postal: Option<&str>, categorie: &str) -> Balade {
        Balade {
            nom_poi: Some(nom.to_string()),
            code_postal: code_postal.map(str::to_string),
            categorie: Some(categorie.to_string()),
            ..Balade::default()
        }
    }

    #[fixture]
    async fn collection() -> BaladeCollection {
        let collection = BaladeCollection::builder().build().await.unwrap();
        for balade in [
            balade("Louvre", Some("75001"), "Musée"),
            balade("Palais Royal", Some("75001"), "Jardin"),
            balade("Bourse", Some("75002"), "Monument"),
            balade("Sans adresse", None, "Monument"),
        ] {
            collection.insert_one(balade).await.unwrap();
        }
        collection
    }

    #[fixture]
    fn dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_assigns_id(#[future] collection: BaladeCollection) {
        let collection = collection.await;
        let inserted = collection
            .insert_one(balade("Tour Eiffel", Some("75007"), "Monument"))
            .await
            .unwrap();

        assert_eq!(inserted.id.len(), 24);
        assert_eq!(
            collection.find_by_id(&inserted.id).await.unwrap(),
            Some(inserted)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_find_keeps_insertion_order(#[future] collection: BaladeCollection) {
        let all = collection.await.find(&Filter::All, None).await.unwrap();
        let names: Vec<_> = all.iter().map(|b| b.nom_poi.clone().unwrap()).collect();
        assert_eq!(names, vec!["Louvre", "Palais Royal", "Bourse", "Sans adresse"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_find_sorted(#[future] collection: BaladeCollection) {
        let sorted = collection
            .await
            .find(&Filter::All, Some(Sort::descending(Field::NomPoi)))
            .await
            .unwrap();
        assert_eq!(sorted[0].nom_poi, Some("Sans adresse".to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_find_by_id_malformed(#[future] collection: BaladeCollection) {
        let err = collection.await.find_by_id("42").await.err().unwrap();
        assert_eq!(err.status(), ErrorCode::InternalServerError);
    }

    #[rstest]
    #[tokio::test]
    async fn test_find_by_id_absent(#[future] collection: BaladeCollection) {
        let id = ObjectId::new().to_string();
        assert_matches!(collection.await.find_by_id(&id).await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_by_id(#[future] collection: BaladeCollection) {
        let collection = collection.await;
        let id = collection.find(&Filter::All, None).await.unwrap()[0].id.clone();

        let updated = collection
            .find_by_id_and_update(&id, &Update::new().set_text(Field::UrlSite, "https://louvre.fr"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.url_site, Some("https://louvre.fr".to_string()));
        assert_eq!(updated.nom_poi, Some("Louvre".to_string()));

        let absent = ObjectId::new().to_string();
        assert_eq!(
            collection
                .find_by_id_and_update(&absent, &Update::new())
                .await
                .unwrap(),
            None
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_by_id(#[future] collection: BaladeCollection) {
        let collection = collection.await;
        let id = collection.find(&Filter::All, None).await.unwrap()[0].id.clone();

        assert!(collection.find_by_id_and_delete(&id).await.unwrap().is_some());
        assert!(collection.find_by_id_and_delete(&id).await.unwrap().is_none());
        assert_eq!(collection.count(&Filter::All).await.unwrap(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_many(#[future] collection: BaladeCollection) {
        let collection = collection.await;
        let filter = Filter::equals(Field::CodePostal, "75001");
        let update = Update::new().set_text(Field::Categorie, "Jardin");

        let result = collection.update_many(&filter, &update).await.unwrap();
        assert_eq!(
            result,
            UpdateResult {
                matched: 2,
                modified: 1
            }
        );
        assert_eq!(collection.distinct(Field::Categorie).await.unwrap(), vec!["Jardin", "Monument"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_count(#[future] collection: BaladeCollection) {
        let collection = collection.await;
        assert_eq!(
            collection
                .count(&Filter::equals(Field::CodePostal, "75001"))
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            collection
                .count(&Filter::equals(Field::CodePostal, "75020"))
                .await
                .unwrap(),
            0
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_distinct_flattens_lists(#[future] collection: BaladeCollection) {
        let collection = collection.await;
        let id = collection.find(&Filter::All, None).await.unwrap()[0].id.clone();
        collection
            .find_by_id_and_update(
                &id,
                &Update::new().set(
                    Field::MotCle,
                    FieldValue::List(vec!["vue".to_string(), "art".to_string()]),
                ),
            )
            .await
            .unwrap();

        assert_eq!(collection.distinct(Field::MotCle).await.unwrap(), vec!["art", "vue"]);
        assert_eq!(
            collection.distinct(Field::Categorie).await.unwrap(),
            vec!["Jardin", "Monument", "Musée"]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_count_by(#[future] collection: BaladeCollection) {
        let groups = collection.await.count_by(Field::CodePostal).await.unwrap();
        assert_eq!(
            groups,
            BTreeMap::from([
                (None, 1),
                (Some("75001".to_string()), 2),
                (Some("75002".to_string()), 1),
            ])
        );
        assert_eq!(groups.values().sum::<u64>(), 4);
    }

    #[rstest]
    #[tokio::test]
    async fn test_persist_with_sync(dir: TempDir) {
        let collection = BaladeCollection::builder()
            .with_data_path(Some(dir.path().to_path_buf()))
            .with_sync_interval(Duration::from_secs(60))
            .build()
            .await
            .unwrap();
        let inserted = collection
            .insert_one(balade("Louvre", Some("75001"), "Musée"))
            .await
            .unwrap();
        assert!(!dir.path().join("balades.json").exists());

        collection.sync_fs().await.unwrap();
        assert!(dir.path().join("balades.json").exists());

        let reopened = BaladeCollection::builder()
            .with_data_path(Some(dir.path().to_path_buf()))
            .build()
            .await
            .unwrap();
        assert_eq!(reopened.find_by_id(&inserted.id).await.unwrap(), Some(inserted));
    }

    #[rstest]
    #[tokio::test]
    async fn test_persist_write_through(dir: TempDir) {
        let collection = BaladeCollection::builder()
            .with_data_path(Some(dir.path().to_path_buf()))
            .with_sync_interval(Duration::ZERO)
            .build()
            .await
            .unwrap();
        let inserted = collection
            .insert_one(balade("Louvre", Some("75001"), "Musée"))
            .await
            .unwrap();
        collection.find_by_id_and_delete(&inserted.id).await.unwrap();

        let reopened = BaladeCollection::builder()
            .with_data_path(Some(dir.path().to_path_buf()))
            .build()
            .await
            .unwrap();
        assert_eq!(reopened.count(&Filter::All).await.unwrap(), 0);
        assert!(dir.path().join("balades.json").exists());
    }

    #[rstest]
    #[tokio::test]
    async fn test_write_through_failure_keeps_state(dir: TempDir) {
        let collection = BaladeCollection::builder()
            .with_data_path(Some(dir.path().to_path_buf()))
            .with_sync_interval(Duration::ZERO)
            .build()
            .await
            .unwrap();
        let kept = collection
            .insert_one(balade("Louvre", Some("75001"), "Musée"))
            .await
            .unwrap();

        // a directory in place of the snapshot makes every save fail
        let path = dir.path().join(SNAPSHOT_FILE);
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir_all(path.join("blocker")).unwrap();

        assert_matches!(
            collection
                .insert_one(balade("Bourse", Some("75002"), "Monument"))
                .await,
            Err(err) if err.status() == ErrorCode::InternalServerError
        );
        assert_eq!(collection.count(&Filter::All).await.unwrap(), 1);

        assert!(collection
            .find_by_id_and_update(&kept.id, &Update::new().set_text(Field::UrlSite, "https://louvre.fr"))
            .await
            .is_err());
        assert!(collection
            .update_many(&Filter::All, &Update::new().set_text(Field::Categorie, "Jardin"))
            .await
            .is_err());
        assert!(collection.find_by_id_and_delete(&kept.id).await.is_err());

        assert_eq!(collection.find(&Filter::All, None).await.unwrap(), vec![kept]);
        assert!(!collection.dirty.load(Ordering::SeqCst));
    }
}
