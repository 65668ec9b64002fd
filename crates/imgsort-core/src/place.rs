use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::group::Groups;
use crate::name::folder_name_problem;

pub trait ProgressObserver {
    fn inc(&self, delta: u64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FolderStatus {
    Created,
    Existing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    AlreadyExists,
}

#[derive(Debug)]
pub struct PlaceWarning {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct PlaceReport {
    pub folders_created: usize,
    pub folders_existing: usize,
    pub copied: usize,
    /// Files skipped because the destination was already there.
    pub existing: usize,
    pub warnings: Vec<PlaceWarning>,
}

/// Create one folder per base name under `source` and copy its files in.
///
/// Failures are per key or per file and never stop the run; they end up in
/// [`PlaceReport::warnings`].
pub fn place_groups(
    source: &Path,
    groups: &Groups,
    progress: Option<&dyn ProgressObserver>,
) -> PlaceReport {
    let mut report = PlaceReport::default();

    for (key, files) in groups {
        let dest_folder = source.join(key);
        if let Some(problem) = folder_name_problem(key) {
            report.warnings.push(PlaceWarning {
                path: dest_folder,
                message: format!("{problem}, {} file(s) not copied", files.len()),
            });
            advance(progress, files.len());
            continue;
        }

        match ensure_folder(&dest_folder) {
            Ok(FolderStatus::Created) => {
                tracing::debug!("Folder '{key}' created.");
                report.folders_created += 1;
            }
            Ok(FolderStatus::Existing) => {
                tracing::debug!("Folder '{key}' already exists.");
                report.folders_existing += 1;
            }
            Err(err) => {
                report.warnings.push(PlaceWarning {
                    path: dest_folder,
                    message: format!("failed to create folder: {err}"),
                });
                advance(progress, files.len());
                continue;
            }
        }

        for file_name in files {
            let from = source.join(file_name);
            let to = dest_folder.join(file_name);
            tracing::debug!("Copying '{file_name}' to '{}'.", dest_folder.display());
            match copy_new(&from, &to) {
                Ok(CopyOutcome::Copied) => {
                    tracing::debug!("Image '{file_name}' copied to '{}'.", to.display());
                    report.copied += 1;
                }
                Ok(CopyOutcome::AlreadyExists) => {
                    tracing::debug!("Image already exists: '{file_name}'.");
                    report.existing += 1;
                }
                Err(err) => report.warnings.push(PlaceWarning {
                    path: from,
                    message: format!("failed to copy into {}: {err}", dest_folder.display()),
                }),
            }
            advance(progress, 1);
        }
    }

    report
}

/// Create `path` as a directory unless a directory is already there.
pub fn ensure_folder(path: &Path) -> io::Result<FolderStatus> {
    match fs::create_dir(path) {
        Ok(()) => Ok(FolderStatus::Created),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            if path.is_dir() {
                Ok(FolderStatus::Existing)
            } else {
                Err(io::Error::new(
                    ErrorKind::AlreadyExists,
                    "path exists but is not a folder",
                ))
            }
        }
        Err(err) => Err(err),
    }
}

/// Copy the bytes of `from` to `to` without ever overwriting `to`.
///
/// Only content is copied; `to` gets default permissions. A partially
/// written destination is removed when the copy fails.
pub fn copy_new(from: &Path, to: &Path) -> io::Result<CopyOutcome> {
    let mut reader = File::open(from)?;
    let mut writer = match OpenOptions::new().write(true).create_new(true).open(to) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            return Ok(CopyOutcome::AlreadyExists)
        }
        Err(err) => return Err(err),
    };

    let copied = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());
    if let Err(err) = copied {
        drop(writer);
        let _ = fs::remove_file(to);
        return Err(err);
    }
    Ok(CopyOutcome::Copied)
}

fn advance(progress: Option<&dyn ProgressObserver>, delta: usize) {
    if let Some(progress) = progress {
        progress.inc(delta as u64);
    }
}
