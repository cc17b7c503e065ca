// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use crate::cfg::CfgParser;
use crate::core::env::{Env, GetEnv};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SYNC_INTERVAL_SECS: u64 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    /// Directory of the snapshot, `None` keeps the collection in memory
    pub data_path: Option<PathBuf>,
    /// Zero writes every change through
    pub sync_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_path: None,
            sync_interval: Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
        }
    }
}

impl<EnvGetter: GetEnv> CfgParser<EnvGetter> {
    pub(super) fn parse_store_config(env: &mut Env<EnvGetter>) -> StoreConfig {
        StoreConfig {
            data_path: env
                .get_optional::<String>("BS_DATA_PATH")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            sync_interval: Duration::from_secs(
                env.get_optional::<u64>("BS_SYNC_INTERVAL")
                    .unwrap_or(DEFAULT_SYNC_INTERVAL_SECS),
            ),
        }
    }
}
