use thiserror::Error;

/// Errors returned by bit buffer reads.
///
/// These signal a decoder bug (reading outside what the demodulator
/// produced), never a frame that simply does not match.
///
/// # Examples
/// ```
/// use rfsense_core::BitBufferError;
///
/// let err = BitBufferError::RowOutOfRange { row: 3, rows: 2 };
/// assert!(err.to_string().contains("row 3 out of range"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitBufferError {
    #[error("row {row} out of range ({rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },
    #[error("byte {index} beyond row {row} length ({bits} bits)")]
    ByteOutOfRange { row: usize, index: usize, bits: usize },
}
