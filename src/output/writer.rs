use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{RebaseError, Result};
use crate::models::RuleFile;

/// Render the rule file as Prometheus rule YAML.
pub fn render_rule_file(rule_file: &RuleFile) -> Result<String> {
    Ok(serde_yaml::to_string(rule_file)?)
}

/// Serialize `rule_file` and replace `path` with it atomically.
///
/// The document is written to a sibling temporary file, synced, then
/// renamed over `path`. On failure the temporary file is removed and any
/// existing file at `path` is left untouched.
pub fn write_rule_file(rule_file: &RuleFile, path: &Path) -> Result<()> {
    let rendered = render_rule_file(rule_file)?;
    let tmp_path = temporary_path(path);

    if let Err(source) = write_and_sync(&tmp_path, rendered.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(RebaseError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(RebaseError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(
        event_name = "rebase.file.written",
        event_domain = "output",
        path = %path.display(),
        groups = rule_file.groups.len(),
        bytes = rendered.len(),
        "wrote rule file"
    );
    Ok(())
}

fn write_and_sync(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
