use std::path::Path;

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

/// Return true if the path has a .xml extension
pub fn is_xml_path(path: &Path) -> bool {
    has_extension(path, "xml")
}

/// Return true if the path has a .json extension
pub fn is_json_path(path: &Path) -> bool {
    has_extension(path, "json")
}

/// Return true if the file exists and is either XML or JSON
pub fn is_convertible_file(path: &Path) -> bool {
    path.is_file() && (is_xml_path(path) || is_json_path(path))
}
