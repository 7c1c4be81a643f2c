use crate::input::existing_ids;
use crate::{HarvestError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Display name used when a candidate has none
const UNKNOWN_NAME: &str = "unknown";

/// One row of the candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Stable identifier, never blank
    pub person_id: String,

    /// Display name as given in the list
    pub person_name: Option<String>,

    /// Raw homepage URL as given in the list
    pub homepage_url: Option<String>,
}

impl Candidate {
    /// Display name, falling back to `unknown`
    pub fn display_name(&self) -> &str {
        match self.person_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_NAME,
        }
    }
}

/// Raw CSV row; columns other than these are ignored
#[derive(Debug, Deserialize)]
struct CandidateRow {
    person_id: Option<String>,
    person_name: Option<String>,
    homepage_url: Option<String>,
}

impl CandidateRow {
    fn into_candidate(self) -> Option<Candidate> {
        let person_id = self.person_id?.trim().to_string();
        if person_id.is_empty() {
            return None;
        }

        Some(Candidate {
            person_id,
            person_name: self.person_name,
            homepage_url: self.homepage_url,
        })
    }
}

/// Reads every candidate with a non-blank `person_id`, in file order
///
/// Rows shorter than the header are accepted; their trailing columns read as
/// missing.
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let wrap = |source: csv::Error| HarvestError::Candidates {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(wrap)?;
    let mut candidates = Vec::new();

    for row in reader.deserialize::<CandidateRow>() {
        if let Some(candidate) = row.map_err(wrap)?.into_candidate() {
            candidates.push(candidate);
        }
    }

    tracing::debug!("Read {} candidates from {}", candidates.len(), path.display());
    Ok(candidates)
}

/// Drops candidates whose id is already done and applies the optional limit
pub fn select_missing(
    candidates: Vec<Candidate>,
    done: &HashSet<String>,
    limit: Option<usize>,
) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|candidate| !done.contains(&candidate.person_id))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Loads the candidates that have no output file in any of `json_dirs`
///
/// # Arguments
///
/// * `candidates_csv` - CSV with `person_id`, `person_name`, `homepage_url` columns
/// * `json_dirs` - Directories holding previously written results
/// * `limit` - Maximum number of candidates returned
pub fn load_missing_candidates(
    candidates_csv: &Path,
    json_dirs: &[PathBuf],
    limit: Option<usize>,
) -> Result<Vec<Candidate>> {
    let done = existing_ids(json_dirs)?;
    let candidates = load_candidates(candidates_csv)?;
    let total = candidates.len();

    let missing = select_missing(candidates, &done, limit);
    tracing::info!(
        "{} of {} candidates have no output yet ({} ids already done)",
        missing.len(),
        total,
        done.len()
    );

    Ok(missing)
}
