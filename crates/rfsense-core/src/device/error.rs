use thiserror::Error;

use crate::BitBufferError;

/// Errors a decoder may surface.
///
/// A frame that does not belong to the decoder's protocol is not an error;
/// decoders report it as zero records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("bit buffer: {0}")]
    Buffer(#[from] BitBufferError),
}

/// A decoder failure during dispatch, tagged with the device that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("decoder '{device}' failed: {source}")]
pub struct DispatchError {
    pub device: &'static str,
    #[source]
    pub source: DecodeError,
}

/// Errors returned when selecting registry entries.
///
/// # Examples
/// ```
/// use rfsense_core::RegistryError;
///
/// let err = RegistryError::UnknownDevice {
///     selector: "Acme".to_string(),
/// };
/// assert!(err.to_string().contains("unknown device"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown device '{selector}'")]
    UnknownDevice { selector: String },
}
