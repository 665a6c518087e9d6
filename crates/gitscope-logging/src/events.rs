use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Structured log events for the history/layout pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    RepoOpened {
        path: PathBuf,
        branches: usize,
        current_branch: Option<String>,
    },
    PageLoaded {
        page: usize,
        commits: usize,
        total_loaded: usize,
    },
    LayoutComputed {
        commits: usize,
        lanes: usize,
        columns: usize,
        curves: usize,
    },
    RefsUnresolved {
        count: usize,
    },
    ContextDiscarded {
        reason: String,
    },
    ErrorEncountered {
        error: String,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for gitscope events - handles both console output and file logging
pub struct Logger {
    format: LogFormat,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            file_writer: Some(Mutex::new(file)),
        })
    }

    pub fn log(&self, event: &LogEvent) {
        // File output is always JSON lines, whatever the console format.
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn log_json(&self, event: &LogEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::RepoOpened {
                path,
                branches,
                current_branch,
            } => {
                let branch = current_branch.as_deref().unwrap_or("(detached)");
                let _ = writeln!(
                    stderr,
                    "{} {} {} {}",
                    "▶".bright_cyan(),
                    path.display().to_string().bold(),
                    format!("on {}", branch).bright_cyan(),
                    format!("({} branches)", branches).dimmed()
                );
            }
            LogEvent::PageLoaded {
                page,
                commits,
                total_loaded,
            } => {
                let _ = writeln!(
                    stderr,
                    "  {} page {}: {} commits ({} loaded)",
                    "↓".dimmed(),
                    page,
                    commits,
                    total_loaded
                );
            }
            LogEvent::LayoutComputed {
                commits,
                lanes,
                columns,
                curves,
            } => {
                let _ = writeln!(
                    stderr,
                    "  {} {} commits in {} lanes across {} columns, {} curves",
                    "✓".bright_green(),
                    commits,
                    lanes,
                    columns,
                    curves
                );
            }
            LogEvent::RefsUnresolved { count } => {
                let _ = writeln!(
                    stderr,
                    "  {} {} ref(s) not plotted",
                    "⚠".bright_yellow(),
                    count
                );
            }
            LogEvent::ContextDiscarded { reason } => {
                let _ = writeln!(stderr, "  {} context discarded: {}", "↺".dimmed(), reason);
            }
            LogEvent::ErrorEncountered { error } => {
                let _ = writeln!(stderr, "{} {}", "✗".bright_red(), error.bright_red());
            }
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let msg = match event {
            LogEvent::RepoOpened { path, .. } => {
                format!("[{}] repo:open {}", timestamp, path.display())
            }
            LogEvent::PageLoaded {
                page,
                commits,
                total_loaded,
            } => format!(
                "[{}] page:{} +{} total={}",
                timestamp, page, commits, total_loaded
            ),
            LogEvent::LayoutComputed {
                commits, columns, ..
            } => format!("[{}] layout:{} cols={}", timestamp, commits, columns),
            LogEvent::RefsUnresolved { count } => {
                format!("[{}] refs:unresolved:{}", timestamp, count)
            }
            LogEvent::ContextDiscarded { reason } => {
                format!("[{}] context:discard {}", timestamp, reason)
            }
            LogEvent::ErrorEncountered { error } => format!("[{}] error:{}", timestamp, error),
        };
        let _ = writeln!(stderr, "{}", msg);
    }
}
