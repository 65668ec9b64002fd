use serde::Serialize;

use crate::config::OrganizerConfig;
use crate::error::SorterError;
use crate::group::{group_entries, Grouping};
use crate::place::{place_groups, PlaceReport, ProgressObserver};
use crate::scan::{list_entries, ScanWarning};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub loaded: usize,
    pub existing: usize,
}

impl RunSummary {
    pub fn new_images(&self) -> usize {
        self.loaded.saturating_sub(self.existing)
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub summary: RunSummary,
    pub scan_warnings: Vec<ScanWarning>,
    pub placement: PlaceReport,
}

impl RunReport {
    /// True when any entry was skipped while listing or placing.
    pub fn has_failures(&self) -> bool {
        !self.scan_warnings.is_empty() || !self.placement.warnings.is_empty()
    }
}

/// Prepared run: the source is listed and grouped, nothing is written yet.
pub struct Organizer {
    pub config: OrganizerConfig,
    pub grouping: Grouping,
    pub scan_warnings: Vec<ScanWarning>,
}

impl Organizer {
    /// Validate and group the source folder. Any error here is fatal.
    pub fn prepare(config: OrganizerConfig) -> Result<Self, SorterError> {
        let listing = list_entries(&config.source)?;
        let grouping = group_entries(&config.source, &listing.entries)?;
        tracing::debug!(
            loaded = grouping.loaded,
            groups = grouping.groups.len(),
            "source grouped"
        );
        Ok(Self {
            config,
            grouping,
            scan_warnings: listing.warnings,
        })
    }

    pub fn run(self, progress: Option<&dyn ProgressObserver>) -> RunReport {
        let placement = place_groups(&self.config.source, &self.grouping.groups, progress);
        RunReport {
            summary: RunSummary {
                loaded: self.grouping.loaded,
                existing: placement.existing,
            },
            scan_warnings: self.scan_warnings,
            placement,
        }
    }
}

pub fn organize(
    config: OrganizerConfig,
    progress: Option<&dyn ProgressObserver>,
) -> Result<RunReport, SorterError> {
    Ok(Organizer::prepare(config)?.run(progress))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{RunReport, RunSummary};
    use crate::place::PlaceReport;
    use crate::scan::ScanWarning;

    #[test]
    fn new_images_is_loaded_minus_existing() {
        let summary = RunSummary {
            loaded: 5,
            existing: 2,
        };
        assert_eq!(summary.new_images(), 3);
    }

    #[test]
    fn summary_serializes_counts() {
        let summary = RunSummary {
            loaded: 3,
            existing: 3,
        };
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(value["loaded"], 3);
        assert_eq!(value["existing"], 3);
    }

    #[test]
    fn scan_warnings_count_as_failures() {
        let mut report = RunReport {
            summary: RunSummary::default(),
            scan_warnings: Vec::new(),
            placement: PlaceReport::default(),
        };
        assert!(!report.has_failures());

        report.scan_warnings.push(ScanWarning {
            path: PathBuf::from("/photos/link.jpg"),
            message: "broken link".to_string(),
        });
        assert!(report.has_failures());
    }
}
