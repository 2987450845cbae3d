//! Gitignore-aware discovery of C# sources using the `ignore` crate.
//!
//! - Native `.gitignore` support at all levels
//! - Custom `.changetrackignore` file support
//! - Only `.cs` files are collected
//! - Files are read in parallel with rayon

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::ScanError;
use crate::parser::CodeSource;

/// Project level ignore file, same syntax as `.gitignore`.
pub const IGNORE_FILE_NAME: &str = ".changetrackignore";

const SOURCE_EXTENSION: &str = "cs";

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Information about a discovered source file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScannedFile {
    /// Path relative to the scan root (the file name for a single file).
    pub path: String,

    /// File size in bytes.
    pub size_bytes: u64,
}

/// Result of scanning a directory.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScanResult {
    /// Discovered files, sorted by path.
    pub files: Vec<ScannedFile>,

    /// Number of non-C# files that were skipped.
    pub skipped_count: usize,

    /// Time taken for the scan in milliseconds.
    pub duration_ms: f64,
}

impl ScanResult {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Scan a directory for C# source files.
///
/// A path naming a single file is accepted as is, whatever its extension.
pub fn scan_directory(root: &Path) -> Result<ScanResult, ScanError> {
    let start = Instant::now();

    if !root.exists() {
        return Err(ScanError::MissingRoot {
            path: root.display().to_string(),
        });
    }

    if root.is_file() {
        let size_bytes = fs::metadata(root)
            .map_err(|source| ScanError::Io {
                path: root.display().to_string(),
                source,
            })?
            .len();
        let path = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());
        return Ok(ScanResult {
            files: vec![ScannedFile { path, size_bytes }],
            skipped_count: 0,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false) // Include hidden files, let gitignore handle it
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILE_NAME);

    let mut skipped_count = 0;
    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !is_source_file(path) {
            skipped_count += 1;
            continue;
        }
        let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(ScannedFile {
            path: relative_path(root, path),
            size_bytes,
        });
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        root = %root.display(),
        files = files.len(),
        skipped_count,
        duration_ms,
        "Scanned sources"
    );
    Ok(ScanResult {
        files,
        skipped_count,
        duration_ms,
    })
}

/// Discover and read every C# source below `root` (or `root` itself when it
/// is a file). Sources keep the scan's relative paths.
pub fn load_sources(root: &Path) -> Result<Vec<CodeSource>, ScanError> {
    let scan = scan_directory(root)?;
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };

    scan.files
        .par_iter()
        .map(|file| {
            let full_path = base.join(&file.path);
            fs::read_to_string(&full_path)
                .map(|contents| CodeSource::new(file.path.as_str(), contents))
                .map_err(|source| ScanError::Io {
                    path: full_path.display().to_string(),
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path)
            .unwrap()
            .write_all(contents.as_bytes())
            .unwrap();
    }

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Service.cs", "public class Service {}\n");
        write(dir.path(), "Models/Order.cs", "public class Order {}\n");
        write(dir.path(), "README.md", "# Test\n");
        write(dir.path(), "obj/Generated.cs", "class Generated {}\n");
        write(dir.path(), ".gitignore", "obj/\n");
        dir
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("Order.cs")));
        assert!(is_source_file(Path::new("Order.CS")));
        assert!(!is_source_file(Path::new("Order.csproj")));
        assert!(!is_source_file(Path::new("README")));
    }

    #[test]
    fn test_scan_directory_basic() {
        let dir = create_test_dir();
        let result = scan_directory(dir.path()).unwrap();

        let paths: Vec<&str> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["Models/Order.cs", "Service.cs"]);
        assert!(result.skipped_count >= 1);
    }

    #[test]
    fn test_project_ignore_file() {
        let dir = create_test_dir();
        write(dir.path(), IGNORE_FILE_NAME, "Models/\n");

        let result = scan_directory(dir.path()).unwrap();
        let paths: Vec<&str> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["Service.cs"]);
    }

    #[test]
    fn test_scan_single_file() {
        let dir = create_test_dir();
        let result = scan_directory(&dir.path().join("Service.cs")).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.files[0].path, "Service.cs");
    }

    #[test]
    fn test_scan_directory_nonexistent() {
        let result = scan_directory(Path::new("/nonexistent/path/that/does/not/exist"));
        assert!(matches!(result, Err(ScanError::MissingRoot { .. })));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        let result = scan_directory(dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_load_sources() {
        let dir = create_test_dir();
        let sources = load_sources(dir.path()).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1].path, "Service.cs");
        assert_eq!(sources[1].contents, "public class Service {}\n");

        let single = load_sources(&dir.path().join("Models/Order.cs")).unwrap();
        assert_eq!(single[0].path, "Order.cs");
    }
}
