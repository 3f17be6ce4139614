use crate::error::Result as ServerErrorResult;

use ps_config::Config;
use ps_core::{HistoryStore, PostStore};
use ps_db::{HistoryRepository, PostRepository};
use ps_history::{ExportSettings, SessionToJson};

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

/// URL path under which export files are served.
pub const EXPORTS_PATH: &str = "/exports";

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub export: ExportSettings,
}

impl AppState {
    /// State with the export directory resolved from config.
    pub fn new(pool: SqlitePool, config: Config) -> ServerErrorResult<Self> {
        let dir = config.export_dir()?;
        Ok(Self::with_export_dir(pool, config, dir))
    }

    pub fn with_export_dir(pool: SqlitePool, config: Config, dir: PathBuf) -> Self {
        let export = ExportSettings {
            dir,
            base_url: format!("{}{}", config.site.url.trim_end_matches('/'), EXPORTS_PATH),
            site_name: config.site.name.clone(),
            site_url: config.site.url.clone(),
        };

        Self {
            pool,
            config: Arc::new(config),
            export,
        }
    }

    pub fn history_repository(&self) -> HistoryRepository {
        HistoryRepository::new(self.pool.clone())
    }

    pub fn session_to_json(&self) -> SessionToJson {
        let store: Arc<dyn HistoryStore> = Arc::new(self.history_repository());
        let posts: Arc<dyn PostStore> = Arc::new(PostRepository::new(self.pool.clone()));

        SessionToJson::new(store, self.export.clone()).with_posts(posts)
    }
}
