use std::sync::OnceLock;

use regex::Regex;

fn copy_suffix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ASCII whitespace; the parenthetical never spans a line terminator and may
    // sit before one final terminator, which is kept.
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"(?-u:\s)*\([^\r\n\x{85}\x{2028}\x{2029}]*\)",
            r"(?P<term>\r\n|[\r\n\x{85}\x{2028}\x{2029}])?$",
        ))
        .expect("copy suffix pattern is valid")
    })
}

/// Derive the grouping key for a file name.
///
/// Drops exactly one extension segment, then a trailing parenthesized suffix
/// such as `" (1)"` or `"(copy)"`. Names without a dot are returned as is.
pub fn base_name(file_name: &str) -> String {
    let Some(dot) = file_name.rfind('.') else {
        return file_name.to_string();
    };
    let stem = &file_name[..dot];
    copy_suffix().replace(stem, "${term}").into_owned()
}

/// Why a base name cannot be used as a folder directly under the source.
pub fn folder_name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("empty base name cannot be used as a folder name");
    }
    if name == "." || name == ".." {
        return Some("base name refers to the source folder or its parent");
    }
    if name.contains(['/', '\\', '\0']) {
        return Some("base name contains a path separator");
    }
    None
}
