use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::content::gateway::ContentGateway;
use crate::content::live::LiveDocument;
use crate::editor::AdminConsole;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ContentGateway>,
    /// What the public endpoints serve. Replaced only by a commit.
    pub live: Arc<LiveDocument>,
    /// The one admin session. Held only briefly; never across a remote save.
    pub console: Arc<Mutex<AdminConsole>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        gateway: ContentGateway,
        live: LiveDocument,
        console: AdminConsole,
        config: Config,
    ) -> Self {
        Self {
            gateway: Arc::new(gateway),
            live: Arc::new(live),
            console: Arc::new(Mutex::new(console)),
            config: Arc::new(config),
        }
    }
}
