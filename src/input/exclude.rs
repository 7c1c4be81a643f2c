use std::fs;
use std::io;
use std::path::Path;

/// Reads exclusion patterns, one per line
///
/// Blank lines and lines starting with `#` are ignored. A file that does not
/// exist yields no patterns.
pub fn load_exclude_list(path: &Path) -> io::Result<Vec<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("Exclude file {} not found, ignoring", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    Ok(content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_exclude_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# skip archives").unwrap();
        writeln!(file, "/archive/").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "  \\?page=\\d+  ").unwrap();

        let patterns = load_exclude_list(file.path()).unwrap();
        assert_eq!(patterns, vec!["/archive/".to_string(), "\\?page=\\d+".to_string()]);
    }

    #[test]
    fn test_missing_file_yields_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let patterns = load_exclude_list(&dir.path().join("absent.txt")).unwrap();
        assert!(patterns.is_empty());
    }
}
