// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use balade_base::error::BaladeError;
use balade_base::internal_server_error;
use std::time::Duration;
use tokio::sync::{RwLockReadGuard, RwLockWriteGuard};
use tokio::time::timeout;

pub const RWLOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// An async read-write lock with embedded timeouts.
///
/// A lock that can't be acquired in time is reported as an internal error
/// instead of blocking the request forever.
pub struct AsyncRwLock<T> {
    inner: tokio::sync::RwLock<T>,
    timeout: Duration,
}

impl<T> AsyncRwLock<T> {
    pub fn new(data: T) -> Self {
        Self::with_timeout(data, RWLOCK_TIMEOUT)
    }

    pub fn with_timeout(data: T, timeout: Duration) -> Self {
        Self {
            inner: tokio::sync::RwLock::new(data),
            timeout,
        }
    }

    pub async fn read(&self) -> Result<RwLockReadGuard<'_, T>, BaladeError> {
        timeout(self.timeout, self.inner.read())
            .await
            .map_err(|_| internal_server_error!("Failed to acquire async read lock within timeout"))
    }

    pub async fn write(&self) -> Result<RwLockWriteGuard<'_, T>, BaladeError> {
        timeout(self.timeout, self.inner.write())
            .await
            .map_err(|_| internal_server_error!("Failed to acquire async write lock within timeout"))
    }
}
