use crate::Result;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Collects the ids of candidates that already have a result file
///
/// Every `*.json` file in each existing directory contributes the part of its
/// name before the first `_`. Directories that do not exist are ignored.
pub fn existing_ids(dirs: &[PathBuf]) -> Result<HashSet<String>> {
    let mut ids = HashSet::new();

    for dir in dirs {
        if !dir.is_dir() {
            tracing::trace!("Result directory {} does not exist", dir.display());
            continue;
        }

        for entry in fs::read_dir(dir)? {
            let file_name = entry?.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if !file_name.ends_with(".json") {
                continue;
            }

            let id = file_name.split('_').next().unwrap_or_default();
            if !id.is_empty() {
                ids.insert(id.to_string());
            }
        }
    }

    Ok(ids)
}
