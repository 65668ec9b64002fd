use std::path::{Path, PathBuf};

pub const TRACE_ON: &str = "trace-on";

#[derive(Clone, Debug)]
pub struct OrganizerConfig {
    pub source: PathBuf,
    pub trace: bool,
}

impl OrganizerConfig {
    pub fn new(source: impl AsRef<Path>) -> Self {
        Self {
            source: expand_tilde(source.as_ref()),
            trace: false,
        }
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Only the exact literal `trace-on` switches tracing on.
    pub fn with_trace_flag(self, flag: Option<&str>) -> Self {
        self.with_trace(flag == Some(TRACE_ON))
    }
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if path_str == "~" || path_str.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            let suffix = path_str.trim_start_matches('~');
            return home.join(suffix.trim_start_matches('/'));
        }
    }
    path.to_path_buf()
}
