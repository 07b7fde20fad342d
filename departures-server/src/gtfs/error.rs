//! Dataset loading errors.

use std::path::PathBuf;

/// Errors that can occur while loading a GTFS archive.
///
/// Any of these is fatal: no query can be answered without a complete
/// dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The archive could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive is not a readable zip file
    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A required table is absent from the archive
    #[error("missing required table {0}")]
    MissingTable(&'static str),

    /// A table could not be parsed as CSV
    #[error("{table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A field has a value that cannot be interpreted
    #[error("{table} line {line}: invalid {field}: {reason}")]
    InvalidField {
        table: &'static str,
        line: u64,
        field: &'static str,
        reason: String,
    },

    /// An identifier appears twice in a table
    #[error("{table}: duplicate id {id}")]
    DuplicateId { table: &'static str, id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LoadError::MissingTable("stop_times.txt");
        assert_eq!(err.to_string(), "missing required table stop_times.txt");

        let err = LoadError::DuplicateId {
            table: "stops.txt",
            id: "S1".into(),
        };
        assert_eq!(err.to_string(), "stops.txt: duplicate id S1");

        let err = LoadError::InvalidField {
            table: "stop_times.txt",
            line: 7,
            field: "arrival_time",
            reason: "invalid time: expected HH:MM:SS format".into(),
        };
        assert_eq!(
            err.to_string(),
            "stop_times.txt line 7: invalid arrival_time: invalid time: expected HH:MM:SS format"
        );

        let err = LoadError::Io {
            path: PathBuf::from("missing.zip"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to open missing.zip"));
    }
}
