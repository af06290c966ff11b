//! JSON input from files or stdin.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Deserialize JSON from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the source cannot be read or is not valid JSON for `T`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?
    };

    parse_json(&raw).map_err(|e| anyhow::anyhow!("invalid JSON in {}: {e}", path.display()))
}

pub(crate) fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}
