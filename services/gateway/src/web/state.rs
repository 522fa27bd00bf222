//! services/gateway/src/web/state.rs
//!
//! Defines the state shared by every request handler.

use crate::config::Config;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Proxy handlers are stateless per request; the only shared pieces are the
/// immutable configuration and the pooled HTTP client.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}
