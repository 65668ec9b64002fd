pub mod config;
pub mod error;
pub mod group;
pub mod name;
pub mod organize;
pub mod place;
pub mod scan;

pub use config::{expand_tilde, OrganizerConfig, TRACE_ON};
pub use error::SorterError;
pub use group::{group_entries, Grouping, Groups};
pub use name::{base_name, folder_name_problem};
pub use organize::{organize, Organizer, RunReport, RunSummary};
pub use place::{
    copy_new, ensure_folder, place_groups, CopyOutcome, FolderStatus, PlaceReport, PlaceWarning,
    ProgressObserver,
};
pub use scan::{list_entries, Entry, Listing, ScanWarning};
