// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

pub mod store;

use crate::api::Components;
use crate::cfg::store::StoreConfig;
use crate::core::env::{Env, GetEnv};
use crate::storage::collection::BaladeCollection;
use balade_base::error::BaladeError;
use log::warn;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 1235;

/// Service configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Cfg {
    pub log_level: String,
    pub host: String,
    pub port: u16,
    pub api_base_path: String,
    pub cert_path: Option<PathBuf>,
    pub cert_key_path: Option<PathBuf>,
    pub cors_allow_origin: Vec<String>,
    pub store_conf: StoreConfig,
}

impl Default for Cfg {
    fn default() -> Self {
        Cfg {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_base_path: "/".to_string(),
            cert_path: None,
            cert_key_path: None,
            cors_allow_origin: vec!["*".to_string()],
            store_conf: StoreConfig::default(),
        }
    }
}

impl Cfg {
    pub fn tls_enabled(&self) -> bool {
        self.cert_path.is_some() && self.cert_key_path.is_some()
    }
}

/// Reads the configuration from environment variables and assembles the components.
pub struct CfgParser<EnvGetter: GetEnv> {
    pub cfg: Cfg,
    env: Env<EnvGetter>,
    version: String,
}

impl<EnvGetter: GetEnv> CfgParser<EnvGetter> {
    pub fn from_env(getter: EnvGetter, version: &str) -> Self {
        let mut env = Env::new(getter);
        let mut cfg = Cfg {
            log_level: env.get("BS_LOG_LEVEL", DEFAULT_LOG_LEVEL.to_string()),
            host: env.get("BS_HOST", DEFAULT_HOST.to_string()),
            port: env.get("BS_PORT", DEFAULT_PORT),
            api_base_path: Self::normalize_base_path(env.get("BS_API_BASE_PATH", "/".to_string())),
            cert_path: Self::parse_path(env.get_masked("BS_CERT_PATH", String::new())),
            cert_key_path: Self::parse_path(env.get_masked("BS_CERT_KEY_PATH", String::new())),
            cors_allow_origin: Self::parse_cors_allow_origin(
                env.get("BS_CORS_ALLOW_ORIGIN", "*".to_string()),
            ),
            store_conf: Self::parse_store_config(&mut env),
        };

        if cfg.cert_path.is_some() != cfg.cert_key_path.is_some() {
            warn!("BS_CERT_PATH and BS_CERT_KEY_PATH must be set together, TLS is disabled");
            cfg.cert_path = None;
            cfg.cert_key_path = None;
        }

        CfgParser {
            cfg,
            env,
            version: version.to_string(),
        }
    }

    /// Open the store and build the components shared by the HTTP handlers.
    pub async fn build(&self) -> Result<Components, BaladeError> {
        let store = BaladeCollection::builder()
            .with_data_path(self.cfg.store_conf.data_path.clone())
            .with_sync_interval(self.cfg.store_conf.sync_interval)
            .build()
            .await?;

        Ok(Components {
            store: Arc::new(store),
            cfg: self.cfg.clone(),
        })
    }

    fn normalize_base_path(mut path: String) -> String {
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        if !path.ends_with('/') {
            path.push('/');
        }
        path
    }

    fn parse_path(path: String) -> Option<PathBuf> {
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }

    fn parse_cors_allow_origin(origins: String) -> Vec<String> {
        origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

impl<EnvGetter: GetEnv> Display for CfgParser<EnvGetter> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BaladeStore {}\n{}", self.version, self.env.message())
    }
}
