// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use std::env::VarError;
use std::fmt::Display;
use std::str::FromStr;

/// Source of environment variables.
pub trait GetEnv {
    fn get(&self, key: &str) -> Result<String, VarError>;
}

/// Reads variables from the process environment.
#[derive(Default)]
pub struct StdEnvGetter {}

impl GetEnv for StdEnvGetter {
    fn get(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }
}

/// A helper class to read environment variables.
///
/// It keeps a report of every value that was read, so the effective
/// configuration can be printed at startup.
pub struct Env<EnvGetter: GetEnv> {
    getter: EnvGetter,
    message: String,
}

impl<EnvGetter: GetEnv> Env<EnvGetter> {
    /// Create a new environment.
    pub fn new(getter: EnvGetter) -> Env<EnvGetter> {
        Env {
            getter,
            message: String::new(),
        }
    }

    /// Get a value from the environment.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to get.
    /// * `default_value` - The default value to return if the key is not found or invalid.
    ///
    /// # Returns
    ///
    /// The value of the environment variable.
    pub fn get<T: FromStr + Display>(&mut self, key: &str, default_value: T) -> T {
        self.get_impl(key, default_value, false)
    }

    /// Same as [`Env::get`] but the value is masked in the report.
    pub fn get_masked<T: FromStr + Display>(&mut self, key: &str, default_value: T) -> T {
        self.get_impl(key, default_value, true)
    }

    /// Get a value from the environment if it is set and valid.
    pub fn get_optional<T: FromStr + Display>(&mut self, key: &str) -> Option<T> {
        let value = self.getter.get(key).ok()?;
        match value.parse::<T>() {
            Ok(parsed) => {
                self.message.push_str(&format!("\t{} = {}\n", key, parsed));
                Some(parsed)
            }
            Err(_) => {
                self.message
                    .push_str(&format!("\t{} = {} (invalid, ignored)\n", key, value));
                None
            }
        }
    }

    fn get_impl<T: FromStr + Display>(&mut self, key: &str, default_value: T, masked: bool) -> T {
        let mut additional = "";
        let value: T = match self.getter.get(key) {
            Ok(value) => match value.parse() {
                Ok(value) => value,
                Err(_) => {
                    additional = " (invalid)";
                    default_value
                }
            },
            Err(_) => {
                additional = " (default)";
                default_value
            }
        };

        let shown = value.to_string();
        let shown = if masked {
            "*".repeat(shown.len())
        } else {
            shown
        };
        self.message
            .push_str(&format!("\t{} = {}{}\n", key, shown, additional));
        value
    }

    /// Get pretty printed message.
    pub fn message(&self) -> &String {
        &self.message
    }
}
