use std::fs;
use std::io;
use std::path::Path;

use tracing::{error, info};

/// Delete the source file once it has been split. Failures are reported,
/// never escalated; returns whether the file was removed.
pub fn remove_source(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("Removed source file: {}", path.display());
            true
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            error!("Unable to remove: {}", path.display());
            false
        }
        Err(err) => {
            error!("Unable to remove: {}: {}", path.display(), err);
            false
        }
    }
}
