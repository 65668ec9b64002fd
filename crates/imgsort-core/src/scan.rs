use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::SorterError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_file: bool,
}

impl Entry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: true,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: false,
        }
    }
}

#[derive(Debug)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug)]
pub struct Listing {
    pub entries: Vec<Entry>,
    pub warnings: Vec<ScanWarning>,
}

/// List the immediate children of `source` without descending into subfolders.
pub fn list_entries(source: &Path) -> Result<Listing, SorterError> {
    if source.as_os_str().is_empty() {
        return Err(SorterError::MissingSource);
    }
    let meta = match fs::metadata(source) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(SorterError::EmptySource {
                path: source.to_path_buf(),
            })
        }
        Err(source_err) => {
            return Err(SorterError::Io {
                path: source.to_path_buf(),
                source: source_err,
            })
        }
    };
    if !meta.is_dir() {
        return Err(SorterError::NotADirectory {
            path: source.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    let mut warnings = Vec::new();
    let walker = WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source_err) => {
                // The folder itself failing to open is fatal; a single unreadable child is not.
                if source_err.depth() == 0 {
                    return Err(SorterError::Walk {
                        path: source.to_path_buf(),
                        source: source_err,
                    });
                }
                warnings.push(ScanWarning {
                    path: source_err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| source.to_path_buf()),
                    message: format!("{source_err}"),
                });
                continue;
            }
        };

        let Some(name) = entry.file_name().to_str() else {
            warnings.push(ScanWarning {
                path: entry.path().to_path_buf(),
                message: "file name is not valid UTF-8, skipped".to_string(),
            });
            continue;
        };
        entries.push(Entry {
            name: name.to_string(),
            is_file: entry.file_type().is_file(),
        });
    }

    Ok(Listing { entries, warnings })
}
