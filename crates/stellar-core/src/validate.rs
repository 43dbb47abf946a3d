//! Input validation: the gate in front of every dispatch.
//!
//! Validators are pure. The controllers turn a failure into a destructive
//! notification via [`rejection_notice`] and return without dispatching.

use stellar_contracts::{
    error::ValidationError,
    notification::Notification,
    request::{QueryRequest, UploadCandidate, CSV_MEDIA_TYPE},
};

/// Accept `text` unless it is empty after trimming.
///
/// The returned request keeps the text exactly as typed.
pub fn validate_query(text: &str) -> Result<QueryRequest, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(QueryRequest {
        text: text.to_string(),
    })
}

/// Accept a file declared as `text/csv` or named `*.csv` (case-sensitive).
pub fn validate_upload(candidate: UploadCandidate) -> Result<UploadCandidate, ValidationError> {
    if is_csv(&candidate) {
        Ok(candidate)
    } else {
        Err(ValidationError::WrongFileType {
            name: candidate.name,
        })
    }
}

fn is_csv(candidate: &UploadCandidate) -> bool {
    candidate.media_type.as_deref() == Some(CSV_MEDIA_TYPE) || candidate.name.ends_with(".csv")
}

/// The destructive notification issued for a validation failure.
pub fn rejection_notice(err: &ValidationError) -> Notification {
    match err {
        ValidationError::EmptyInput => Notification::destructive(
            "Empty Query",
            "Please enter a medical query for AI analysis.",
        ),
        ValidationError::WrongFileType { .. } => {
            Notification::destructive("Invalid File Type", "Please upload a CSV file.")
        }
        ValidationError::NoFileSelected => Notification::destructive(
            "No File Selected",
            "Please select a CSV file to upload.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use stellar_contracts::notification::Severity;

    use super::*;

    fn file(name: &str, media_type: Option<&str>) -> UploadCandidate {
        UploadCandidate::new(name, media_type.map(str::to_string), b"a,b\n1,2\n".to_vec())
    }

    // ── Query ────────────────────────────────────────────────────────────────

    #[test]
    fn empty_and_whitespace_queries_rejected() {
        for text in ["", " ", "\n\t  ", "\u{3000}"] {
            assert_eq!(
                validate_query(text),
                Err(ValidationError::EmptyInput),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn query_text_kept_verbatim() {
        let req = validate_query("  chest pain in zero gravity \n").unwrap();
        assert_eq!(req.text, "  chest pain in zero gravity \n");
    }

    // ── Upload ───────────────────────────────────────────────────────────────

    #[test]
    fn csv_extension_accepted_without_media_type() {
        assert!(validate_upload(file("data.csv", None)).is_ok());
    }

    #[test]
    fn csv_media_type_accepted_with_any_name() {
        assert!(validate_upload(file("export", Some("text/csv"))).is_ok());
    }

    #[test]
    fn extension_check_is_case_sensitive() {
        let err = validate_upload(file("DATA.CSV", None)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongFileType {
                name: "DATA.CSV".to_string()
            }
        );
    }

    #[test]
    fn text_file_rejected() {
        assert!(validate_upload(file("notes.txt", Some("text/plain"))).is_err());
        assert!(validate_upload(file("vitals.csv.bak", None)).is_err());
    }

    // ── Notices ──────────────────────────────────────────────────────────────

    #[test]
    fn every_rejection_notice_is_destructive() {
        let errors = [
            ValidationError::EmptyInput,
            ValidationError::WrongFileType {
                name: "x".to_string(),
            },
            ValidationError::NoFileSelected,
        ];
        for err in &errors {
            assert_eq!(rejection_notice(err).severity, Severity::Destructive);
        }
        assert_eq!(rejection_notice(&errors[0]).title, "Empty Query");
        assert_eq!(rejection_notice(&errors[1]).title, "Invalid File Type");
        assert_eq!(rejection_notice(&errors[2]).title, "No File Selected");
    }
}
