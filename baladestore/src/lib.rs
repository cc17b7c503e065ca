// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1
pub mod api;
pub mod cfg;
pub mod core;
pub mod launcher;
pub mod storage;
