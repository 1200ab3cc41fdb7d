use thiserror::Error;

/// Errors raised by schema validation, record codec operations and the
/// merge phase. I/O failures are reported as [std::io::Error] wrapped in
/// [anyhow::Error] with path context by the calling code; any of these kinds
/// can be recovered from an [anyhow::Error] chain with `downcast_ref`.
#[derive(Error, Debug)]
pub enum SortError {
    /// A column heading is empty, duplicated or contains a character outside
    /// `[-A-Za-z0-9_ ]`.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    /// The requested sort column does not appear in the file header.
    #[error("column '{0}' does not match any column in the CSV header")]
    UnknownColumn(String),
    /// A data row's field count disagrees with the header.
    #[error("expected {expected} fields but got {actual}")]
    FieldCountMismatch {
        expected: usize,
        actual: usize,
    },
    /// A field offered for writing contains the delimiter or a line break.
    #[error("field {index} contains invalid characters")]
    InvalidFieldCharacters {
        index: usize,
    },
    /// Merge was invoked with no sorted inputs, for example on a file that
    /// holds a header and no data rows.
    #[error("no sorted chunk files to merge")]
    EmptyInputSet,
}
