//! Version string extraction from `flanneld -version` output.

/// Extract the version reported by `flanneld -version`.
///
/// flanneld prints its version with a leading `v` (e.g. `v0.7.0`), sometimes
/// behind a program name. Everything after the last `v` is taken, trimmed.
/// Returns `None` for empty output or when nothing follows the last `v`.
#[must_use]
pub fn parse_flannel_version(output: &str) -> Option<String> {
    let output = output.trim();
    if output.is_empty() {
        return None;
    }
    let version = output.rsplit('v').next().unwrap_or(output).trim();
    (!version.is_empty()).then(|| version.to_string())
}
