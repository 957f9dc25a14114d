//! Token file loading

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the home directory when no path is given
const TOKEN_FILE_NAME: &str = ".canvas_token";

/// Default token location: `~/.canvas_token`, or `./.canvas_token` without a home dir
pub fn default_token_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(TOKEN_FILE_NAME)
}

/// Read an access token from a file.
///
/// Trailing whitespace (the newline most editors add) is stripped.
pub fn load_token_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::auth(format!("Failed to read token file {}: {e}", path.display()))
    })?;

    let token = contents.trim_end();
    if token.is_empty() {
        return Err(Error::auth(format!(
            "Token file {} is empty",
            path.display()
        )));
    }

    debug!("Loaded access token from {}", path.display());
    Ok(token.to_string())
}
