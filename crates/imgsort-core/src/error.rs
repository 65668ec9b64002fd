use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum SorterError {
    #[error("source folder path is required")]
    MissingSource,
    #[error("given path is not a folder: {path}")]
    NotADirectory { path: PathBuf },
    #[error("the given path doesn't exist or is empty: {path}")]
    EmptySource { path: PathBuf },
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
