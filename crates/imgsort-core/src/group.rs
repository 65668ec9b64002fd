use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::SorterError;
use crate::name::base_name;
use crate::scan::Entry;

pub type Groups = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Default)]
pub struct Grouping {
    pub groups: Groups,
    /// Number of file entries that were grouped.
    pub loaded: usize,
}

impl Grouping {
    pub fn file_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }
}

/// Bucket every file entry by its base name. Directories are ignored.
///
/// Fails when there are no entries at all; `source` only names the folder in
/// that error.
pub fn group_entries(source: &Path, entries: &[Entry]) -> Result<Grouping, SorterError> {
    if entries.is_empty() {
        return Err(SorterError::EmptySource {
            path: source.to_path_buf(),
        });
    }

    let mut grouping = Grouping::default();
    for entry in entries {
        if !entry.is_file {
            continue;
        }
        let key = base_name(&entry.name);
        tracing::trace!(file = %entry.name, base = %key, "grouped");
        grouping
            .groups
            .entry(key)
            .or_default()
            .insert(entry.name.clone());
        grouping.loaded += 1;
    }
    Ok(grouping)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::Path;

    use super::{group_entries, Grouping};
    use crate::error::SorterError;
    use crate::scan::Entry;

    fn group(entries: &[Entry]) -> Grouping {
        group_entries(Path::new("/photos"), entries).expect("non-empty input")
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn group_entries_buckets_copies_together() {
        let grouping = group(&[
            Entry::file("cat.jpg"),
            Entry::file("cat (1).jpg"),
            Entry::file("dog.png"),
        ]);

        assert_eq!(grouping.loaded, 3);
        assert_eq!(grouping.groups.len(), 2);
        assert_eq!(grouping.groups["cat"], set(&["cat.jpg", "cat (1).jpg"]));
        assert_eq!(grouping.groups["dog"], set(&["dog.png"]));
    }

    #[test]
    fn group_entries_skips_directories() {
        let grouping = group(&[Entry::dir("sub"), Entry::file("sub.jpg")]);
        assert_eq!(grouping.loaded, 1);
        assert_eq!(grouping.groups["sub"], set(&["sub.jpg"]));
        assert!(grouping.groups.values().all(|files| !files.contains("sub")));
    }

    #[test]
    fn group_entries_only_directories_yields_empty_grouping() {
        let grouping = group(&[Entry::dir("a"), Entry::dir("b")]);
        assert_eq!(grouping.loaded, 0);
        assert!(grouping.groups.is_empty());
    }

    #[test]
    fn group_entries_rejects_empty_input() {
        let err = group_entries(Path::new("/photos"), &[]).expect_err("empty listing");
        assert!(matches!(err, SorterError::EmptySource { .. }));
    }

    #[test]
    fn group_entries_places_every_file_exactly_once() {
        let names = [
            "a.jpg",
            "a (1).jpg",
            "a(edit).png",
            "b",
            "b.txt",
            "c.d.e",
            ".jpg",
            "pho(to)extra.jpg",
        ];
        let entries: Vec<Entry> = names.iter().map(|n| Entry::file(*n)).collect();
        let grouping = group(&entries);

        assert_eq!(grouping.loaded, names.len());
        assert_eq!(grouping.file_count(), names.len());
        for name in names {
            let owners = grouping
                .groups
                .values()
                .filter(|files| files.contains(name))
                .count();
            assert_eq!(owners, 1, "{name} should be in exactly one group");
        }
        assert_eq!(grouping.groups["a"].len(), 3);
        assert_eq!(grouping.groups["b"], set(&["b", "b.txt"]));
        assert_eq!(grouping.groups["c.d"], set(&["c.d.e"]));
        assert_eq!(grouping.groups[""], set(&[".jpg"]));
    }
}
