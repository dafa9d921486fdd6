use anyhow::Result;
use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// File scanner discovering declaration-forest files.
///
/// The `FileScanner` recursively walks a project directory collecting the
/// `.json` forest files the external syntax-tree builder emitted. Hidden
/// directories (those starting with `.`) and `target` are skipped. A root
/// pointing directly at a forest file is accepted as-is.
///
/// # Example
///
/// ```no_run
/// use openapi_from_declarations::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./forest-out"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} forest files", result.forest_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
}

/// Result of a directory scan.
pub struct ScanResult {
    /// Paths of all discovered forest files
    pub forest_files: Vec<PathBuf>,
    /// Warnings for entries that could not be accessed
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a scanner rooted at the given path.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Scans the directory tree and collects all `.json` files.
    ///
    /// Inaccessible entries are recorded as warnings and scanning continues;
    /// only a completely inaccessible root is an error.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut forest_files = Vec::new();
        let mut warnings = Vec::new();

        if self.root_path.is_file() {
            return Ok(ScanResult {
                forest_files: vec![self.root_path.clone()],
                warnings,
            });
        }

        for entry in WalkDir::new(&self.root_path)
            .into_iter()
            .filter_entry(|e| {
                // Don't filter the root directory itself
                if e.path() == self.root_path {
                    return true;
                }

                let file_name = e.file_name().to_string_lossy();
                let is_hidden = file_name.starts_with('.');
                let is_target = file_name == "target";

                !is_hidden && !is_target
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();

                    if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                        forest_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Ok(ScanResult {
            forest_files,
            warnings,
        })
    }
}
