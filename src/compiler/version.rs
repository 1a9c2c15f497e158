//! Dotted version comparison and extraction.

use std::cmp::Ordering;

use regex::Regex;

fn parse_version(v: &str) -> Vec<u32> {
    v.split(['.', '-', '+'])
        .map_while(|s| s.parse().ok())
        .collect()
}

/// Compare two dotted versions numerically, component by component.
///
/// Missing trailing components count as zero, so `8` equals `8.0.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts = parse_version(a);
    let b_parts = parse_version(b);
    let len = a_parts.len().max(b_parts.len());

    for i in 0..len {
        let l = a_parts.get(i).copied().unwrap_or(0);
        let r = b_parts.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Whether `version` is at least `minimum`. An unparseable version never is.
pub fn version_at_least(version: &str, minimum: &str) -> bool {
    if parse_version(version).is_empty() {
        return false;
    }
    compare_versions(version, minimum) != Ordering::Less
}

/// Extract the first dotted version number from tool output.
pub fn extract_version(output: &str) -> Option<String> {
    let re = Regex::new(r"(\d+\.\d+(?:\.\d+)*)").ok()?;
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
