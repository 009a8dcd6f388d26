use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::error;

/// Append-only failure-trace sink shared by every component.
///
/// Recording never fails: if the log file itself cannot be written, the entry
/// degrades to a tracing event and is otherwise dropped.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped entry with the full error chain.
    pub fn record(&self, context: &str, err: &anyhow::Error) {
        let mut entry = String::new();
        let _ = writeln!(
            entry,
            "--- {} | {context}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        for (depth, cause) in err.chain().enumerate() {
            let _ = writeln!(entry, "{:indent$}{cause}", "", indent = depth * 2);
        }

        error!(context, error = %err, "recorded failure");
        if let Err(io_err) = self.append(&entry) {
            error!(path = %self.path.display(), %io_err, "error log unwritable, entry dropped");
        }
    }

    /// Dialog text pointing the user at the log file for details.
    pub fn dialog_message(&self, summary: &str) -> String {
        format!("{summary} (details logged to {})", self.path.display())
    }

    fn append(&self, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())
    }
}
