// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::storage::object_id::ObjectId;
use balade_base::error::BaladeError;
use balade_base::msg::balade_api::Balade;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub(super) const SNAPSHOT_FILE: &str = "balades.json";

/// JSON file holding the whole collection.
///
/// The file is replaced atomically: the new content is written next to it
/// and renamed over the old one.
pub(super) struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(data_path: &Path) -> Self {
        Snapshot {
            path: data_path.join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection, a missing file is an empty collection.
    pub async fn load(&self) -> Result<BTreeMap<ObjectId, Balade>, BaladeError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {:?}, starting empty", self.path);
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(err.into()),
        };

        let balades: Vec<Balade> = serde_json::from_slice(&content)?;
        let mut docs = BTreeMap::new();
        for balade in balades {
            let id: ObjectId = balade.id.parse()?;
            if docs.insert(id, balade).is_some() {
                warn!("Duplicate balade '{}' in {:?}, keeping the last one", id, self.path);
            }
        }
        Ok(docs)
    }

    pub async fn save(&self, docs: &BTreeMap<ObjectId, Balade>) -> Result<(), BaladeError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_vec(&docs.values().collect::<Vec<_>>())?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        debug!("Saved {} balades to {:?}", docs.len(), self.path);
        Ok(())
    }
}
