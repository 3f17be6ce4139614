//! Export of a history container as a JSON document.

use crate::error::{ExportError, ExportResult};
use crate::log_details::decode_details;
use crate::session_document::{
    ContainerDocument, ContainerMetadata, ContainerStatistics, ExportMetadata, HistorySummary,
    LogDocument, SessionDocument,
};

use ps_core::{DETAIL_TIMESTAMP_FORMAT, HistoryRecord, HistoryStore, PostStore};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::Utc;
use log::{debug, info, warn};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// File name prefix of every export; cleanup only touches matching files.
pub const EXPORT_FILE_PREFIX: &str = "ps-session-";

const EXPORT_FILE_SUFFIX: &str = ".json";
const RANDOM_SUFFIX_LEN: usize = 12;
const GENERATED_BY: &str = "Postsmith";

const HTACCESS: &str = "# Session exports are served only through the API\n\
<FilesMatch \"\\.json$\">\n\
    Require all denied\n\
</FilesMatch>\n";

/// Where exports are written and how they are described.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub dir: PathBuf,
    /// Public base URL under which `dir` is exposed.
    pub base_url: String,
    pub site_name: String,
    pub site_url: String,
}

/// Location of a written export.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportFile {
    pub path: PathBuf,
    pub url: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CleanupReport {
    pub deleted: usize,
    pub errors: Vec<String>,
}

pub struct SessionToJson {
    store: Arc<dyn HistoryStore>,
    posts: Option<Arc<dyn PostStore>>,
    settings: ExportSettings,
}

impl SessionToJson {
    pub fn new(store: Arc<dyn HistoryStore>, settings: ExportSettings) -> Self {
        Self {
            store,
            posts: None,
            settings,
        }
    }

    /// Include a snapshot of the generated post when one exists.
    pub fn with_posts(mut self, posts: Arc<dyn PostStore>) -> Self {
        self.posts = Some(posts);
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub async fn generate_session_json(&self, history_id: i64) -> ExportResult<SessionDocument> {
        let record = self
            .store
            .get_by_id(history_id)
            .await?
            .ok_or_else(|| ExportError::not_found(history_id))?;

        let post = match (&self.posts, record.post_id) {
            (Some(posts), Some(post_id)) => posts.get_post(post_id).await.unwrap_or_else(|e| {
                warn!("Post {} unavailable for export: {}", post_id, e);
                None
            }),
            _ => None,
        };

        Ok(SessionDocument {
            metadata: self.export_metadata(),
            post_id: record.post_id,
            post,
            history: summarize(&record),
            history_containers: vec![container_document(&record)],
        })
    }

    pub async fn generate_json_string(&self, history_id: i64, pretty: bool) -> ExportResult<String> {
        let document = self.generate_session_json(history_id).await?;
        let json = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    /// Write the document to a fresh, randomly named file in the export
    /// directory and return where it landed.
    pub async fn generate_json_to_tempfile(
        &self,
        history_id: i64,
        pretty: bool,
    ) -> ExportResult<ExportFile> {
        let json = self.generate_json_string(history_id, pretty).await?;

        let dir = &self.settings.dir;
        ensure_export_dir(dir).await?;

        let file_name = export_file_name(history_id);
        let path = dir.join(&file_name);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| ExportError::write(&path, e))?;
        write_or_discard(&mut file, &path, json.as_bytes()).await?;
        drop(file);

        restrict_permissions(&path).await;

        let url = format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            file_name
        );
        info!("Exported history {} to {}", history_id, path.display());

        Ok(ExportFile {
            path,
            url,
            size: json.len() as u64,
        })
    }

    fn export_metadata(&self) -> ExportMetadata {
        ExportMetadata {
            generated_at: Utc::now().format(DETAIL_TIMESTAMP_FORMAT).to_string(),
            generated_by: GENERATED_BY.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            site_name: self.settings.site_name.clone(),
            site_url: self.settings.site_url.clone(),
        }
    }
}

fn summarize(record: &HistoryRecord) -> HistorySummary {
    HistorySummary {
        id: record.id,
        uuid: record.uuid.clone(),
        post_id: record.post_id,
        template_id: record.template_id,
        status: record.status,
        prompt: record.prompt.clone(),
        generated_title: record.generated_title.clone(),
        generated_content: record.generated_content.clone(),
        error_message: record.error_message.clone(),
        created_at: record.created_at,
        completed_at: record.completed_at,
    }
}

fn container_document(record: &HistoryRecord) -> ContainerDocument {
    let logs: Vec<LogDocument> = record
        .logs
        .iter()
        .map(|log| LogDocument {
            id: log.id,
            log_type: log.log_type.clone(),
            history_type_id: log.history_type_id,
            history_type_label: log.history_type_label().to_string(),
            timestamp: log.timestamp,
            details: decode_details(log),
        })
        .collect();
    let statistics = ContainerStatistics::from_logs(&logs);

    ContainerDocument {
        uuid: record.uuid.clone(),
        kind: record.kind.clone(),
        status: record.status,
        created_at: record.created_at,
        completed_at: record.completed_at,
        metadata: ContainerMetadata {
            template_id: record.template_id,
            post_id: record.post_id,
            author_id: record.author_id,
            topic_id: record.topic_id,
            creation_method: record.creation_method.clone(),
        },
        logs,
        statistics,
    }
}

fn export_file_name(history_id: i64) -> String {
    let stamp = Utc::now().format("%Y%m%d-%H%M%S");
    let random: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();

    format!("{EXPORT_FILE_PREFIX}{history_id}-{stamp}-{random}{EXPORT_FILE_SUFFIX}")
}

/// Create the export directory and its deny rule on first use.
async fn ensure_export_dir(dir: &Path) -> ExportResult<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ExportError::mkdir(dir, e))?;

    let htaccess = dir.join(".htaccess");
    if !tokio::fs::try_exists(&htaccess).await.unwrap_or(false) {
        tokio::fs::write(&htaccess, HTACCESS)
            .await
            .map_err(|e| ExportError::write(&htaccess, e))?;
        debug!("Created {}", htaccess.display());
    }

    Ok(())
}

/// Write `bytes` through `writer`; on failure the file at `path` is removed
/// so no partial export is left behind.
pub(crate) async fn write_or_discard<W>(writer: &mut W, path: &Path, bytes: &[u8]) -> ExportResult<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match writer.write_all(bytes).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };

    let Err(e) = written else {
        return Ok(());
    };

    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial export {}", path.display()),
        Err(remove) if remove.kind() == std::io::ErrorKind::NotFound => {}
        Err(remove) => warn!(
            "Failed to remove partial export {}: {}",
            path.display(),
            remove
        ),
    }

    Err(ExportError::write(path, e))
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::Permissions::from_mode(0o644);
    if let Err(e) = tokio::fs::set_permissions(path, permissions).await {
        warn!("Failed to set permissions on {}: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) {}

fn is_export_file(name: &str) -> bool {
    name.starts_with(EXPORT_FILE_PREFIX) && name.ends_with(EXPORT_FILE_SUFFIX)
}

/// Delete exports in `dir` strictly older than `max_age`.
///
/// Only `ps-session-*.json` files are considered. Failures are collected
/// per file; a missing directory yields an empty report.
pub async fn cleanup_old_exports(dir: &Path, max_age: Duration) -> CleanupReport {
    let mut report = CleanupReport::default();

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return report,
        Err(e) => {
            report.errors.push(format!("{}: {}", dir.display(), e));
            return report;
        }
    };

    let now = SystemTime::now();

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                report.errors.push(format!("{}: {}", dir.display(), e));
                break;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_export_file(&name) {
            continue;
        }

        let path = entry.path();
        let modified = match entry.metadata().await.and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                report.errors.push(format!("{}: {}", path.display(), e));
                continue;
            }
        };

        // Files with a future mtime count as fresh.
        let age = now.duration_since(modified).unwrap_or_default();
        if age <= max_age {
            continue;
        }

        match tokio::fs::remove_file(&path).await {
            Ok(()) => report.deleted += 1,
            Err(e) => report.errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    if report.deleted > 0 {
        info!(
            "Removed {} expired session export(s) from {}",
            report.deleted,
            dir.display()
        );
    }

    report
}
