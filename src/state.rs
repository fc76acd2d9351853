//! Shared application state handed to every handler.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{HistoryService, LinkService, StatsService};
use crate::codegen::{CodeGenerator, HashMode};
use crate::config::Config;
use crate::domain::click_event::ClickEvent;
use crate::domain::history::{DEFAULT_HISTORY_CAPACITY, UrlHistory};
use crate::infrastructure::persistence::{PgLinkRepository, PgStatsRepository};

/// Settings the services are built from.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub base_url: String,
    pub hash_mode: HashMode,
    pub history_capacity: usize,
    pub behind_proxy: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            hash_mode: HashMode::Strong,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            behind_proxy: false,
        }
    }
}

impl From<&Config> for ServiceOptions {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            hash_mode: config.codegen_hash,
            history_capacity: config.history_capacity,
            behind_proxy: config.behind_proxy,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub stats_service: Arc<StatsService<PgLinkRepository, PgStatsRepository>>,
    pub history_service: Arc<HistoryService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub hash_mode: HashMode,
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        pool: Arc<PgPool>,
        click_sender: mpsc::Sender<ClickEvent>,
        options: ServiceOptions,
    ) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(Arc::clone(&pool)));
        let stats_repository = Arc::new(PgStatsRepository::new(Arc::clone(&pool)));
        let history = Arc::new(UrlHistory::new(options.history_capacity));

        let link_service = Arc::new(LinkService::new(
            Arc::clone(&link_repository),
            CodeGenerator::new(options.hash_mode),
            Arc::clone(&history),
            options.base_url,
        ));
        let stats_service = Arc::new(StatsService::new(link_repository, stats_repository));
        let history_service = Arc::new(HistoryService::new(history));

        Self {
            pool,
            link_service,
            stats_service,
            history_service,
            click_sender,
            hash_mode: options.hash_mode,
            behind_proxy: options.behind_proxy,
        }
    }
}
