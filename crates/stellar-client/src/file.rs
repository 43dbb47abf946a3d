//! Turning a path on disk into an `UploadCandidate`.

use std::path::Path;

use stellar_contracts::{
    error::{StellarError, StellarResult},
    request::{UploadCandidate, CSV_MEDIA_TYPE},
};

/// Read `path` fully and describe it the way a file picker would.
///
/// The media type is declared only for a `.csv` extension (any case);
/// everything else is left undeclared and judged by name alone.
pub fn candidate_from_path(path: &Path) -> StellarResult<UploadCandidate> {
    let contents = std::fs::read(path).map_err(|e| StellarError::FileReadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| StellarError::FileReadError {
            path: path.display().to_string(),
            reason: "path has no file name".to_string(),
        })?;
    let media_type = path
        .extension()
        .filter(|ext| ext.eq_ignore_ascii_case("csv"))
        .map(|_| CSV_MEDIA_TYPE.to_string());
    Ok(UploadCandidate::new(name, media_type, contents))
}
