// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    backend::{BackendClient, BackendError},
    config::AppConfig,
};

/// Shared application state: the immutable configuration and the outbound
/// client built from it. No mutable state is shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: BackendClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, BackendError> {
        let config = Arc::new(config);
        let backend = BackendClient::new(&config)?;
        Ok(Self { config, backend })
    }
}
