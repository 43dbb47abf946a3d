//! File selection: one decision function behind both the picker and the
//! drop zone, so the two entry points cannot drift apart.

use stellar_contracts::{error::ValidationError, event::FileSource, request::UploadCandidate};

use crate::validate::validate_upload;

/// What to do with a selection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Stage this candidate, replacing whatever was staged.
    Accept(UploadCandidate),
    /// Leave the staged candidate alone and tell the user why.
    Reject(ValidationError),
    /// Nothing to do.
    Dismissed,
}

/// Decide what a picker change or a drop means.
///
/// A dismissed picker (no file) is silent. A drop that carries no file is
/// treated as the wrong file type, since the user did try to drop something.
pub fn evaluate_selection(source: FileSource, file: Option<UploadCandidate>) -> Selection {
    match (source, file) {
        (FileSource::Picker, None) => Selection::Dismissed,
        (FileSource::Drop, None) => Selection::Reject(ValidationError::WrongFileType {
            name: String::new(),
        }),
        (_, Some(file)) => match validate_upload(file) {
            Ok(candidate) => Selection::Accept(candidate),
            Err(err) => Selection::Reject(err),
        },
    }
}
