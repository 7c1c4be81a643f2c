//! JSON directory writer
//!
//! Each candidate's results land in `<dir>/<id>_<name>.json` as a single
//! pretty-printed object mapping URL keys to page text.

use crate::input::Candidate;
use crate::output::{OutputError, OutputHandler, OutputResult};
use crate::state::ResultMap;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Runs of characters that may not appear in a file name
static UNSAFE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\-]+").expect("file name regex is valid")
});

/// Builds the artifact file name for a candidate
///
/// The name is trimmed, spaces become `_`, every run of characters other than
/// word characters and `-` collapses to one `_`, and edge underscores go.
///
/// # Examples
///
/// ```
/// use homepage_harvest::output::safe_filename;
///
/// assert_eq!(safe_filename("101", " Jane  O'Doe "), "101_Jane__O_Doe.json");
/// assert_eq!(safe_filename("7", "Zoë Müller-Lüdenscheidt"), "7_Zoë_Müller-Lüdenscheidt.json");
/// ```
pub fn safe_filename(person_id: &str, person_name: &str) -> String {
    let name = person_name.trim().replace(' ', "_");
    let name = UNSAFE_RUN.replace_all(&name, "_");
    format!("{}_{}.json", person_id, name.trim_matches('_'))
}

/// Writes one JSON file per candidate into a directory
#[derive(Debug, Clone)]
pub struct JsonDirectoryOutput {
    dir: PathBuf,
}

impl JsonDirectoryOutput {
    /// Creates a writer for `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> OutputResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The directory results are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputHandler for JsonDirectoryOutput {
    fn output_path(&self, candidate: &Candidate) -> PathBuf {
        self.dir.join(safe_filename(
            &candidate.person_id,
            candidate.display_name(),
        ))
    }

    fn write(&self, candidate: &Candidate, results: &ResultMap) -> OutputResult<PathBuf> {
        let path = self.output_path(candidate);
        let json = serde_json::to_string_pretty(results)?;

        fs::write(&path, json).map_err(|source| OutputError::Write {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!("Wrote {} entries to {}", results.len(), path.display());
        Ok(path)
    }
}
