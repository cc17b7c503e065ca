// Copyright 2026 ReductSoftware UG
// This Source Code Form is subject to the terms of the Mozilla Public
//    License, v. 2.0. If a copy of the MPL was not distributed with this
//    file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::prelude::{DateTime, Utc};
use log::{info, Level, Log, Metadata, Record};
use std::collections::BTreeMap;
use std::sync::{LazyLock, PoisonError, RwLock};

static LOGGER: Logger = Logger;

/// Process-wide logger writing one line per record to stdout.
pub struct Logger;

static PATHS: LazyLock<RwLock<BTreeMap<String, Level>>> =
    LazyLock::new(|| RwLock::new(BTreeMap::new()));

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let paths = PATHS.read().unwrap_or_else(PoisonError::into_inner);
        let target = metadata.target().replace("::", "/");
        // Check paths in reverse order (most specific first)
        for (path, level) in paths.iter().rev() {
            if path.is_empty() || target.starts_with(path.as_str()) {
                return metadata.level() <= *level;
            }
        }
        false
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now: DateTime<Utc> = Utc::now();
        let file = match record.file() {
            // Absolute path to crate, remove path to registry
            Some(file) => match file.split_once("src/") {
                Some((_, file)) => file,
                None => file,
            },
            None => "(unknown)",
        };

        let package_name = match record.target().split_once(':') {
            Some((package_name, _)) => package_name,
            None => record.target(),
        };

        println!(
            "{} ({:>5}) [{}] -- {}/{}:{} {}",
            now.format("%Y-%m-%d %H:%M:%S.%3f"),
            thread_id::get() % 100000,
            record.level(),
            package_name,
            file,
            record.line().unwrap_or(0),
            record.args(),
        );
    }

    fn flush(&self) {}
}

impl Logger {
    /// Initialize the logger.
    ///
    /// # Arguments
    ///
    /// * `levels` - Comma separated list of `LEVEL` or `path=LEVEL` items.
    ///   A level can be one of TRACE, DEBUG, INFO, WARN, ERROR.
    pub fn init(levels: &str) {
        let mut max_level = Level::Error;
        let mut parsed = BTreeMap::new();
        parsed.insert(String::new(), Level::Info); // default level

        let mut invalid = vec![];
        for item in levels.split(',').filter(|item| !item.trim().is_empty()) {
            let (path, level) = match item.split_once('=') {
                Some((path, level)) => (path.trim(), level.trim()),
                // for case INFO,path=DEBUG
                None => ("", item.trim()),
            };

            let level = match level.to_uppercase().as_str() {
                "TRACE" => Level::Trace,
                "DEBUG" => Level::Debug,
                "INFO" => Level::Info,
                "WARN" => Level::Warn,
                "ERROR" => Level::Error,
                _ => {
                    invalid.push(level.to_string());
                    Level::Info
                }
            };

            max_level = std::cmp::max(max_level, level);
            parsed.insert(path.to_string(), level);
        }

        max_level = std::cmp::max(max_level, parsed[""]);
        *PATHS.write().unwrap_or_else(PoisonError::into_inner) = parsed;

        log::set_logger(&LOGGER).ok();
        log::set_max_level(max_level.to_level_filter());

        for level in invalid {
            info!("Invalid log level: {}, defaulting to INFO", level);
        }
    }
}
