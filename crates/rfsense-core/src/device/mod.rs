//! Device contract, registry and dispatch.
//!
//! A device is declared once as a static `DeviceDescriptor`: its timing
//! profile, the decoder that interprets its bit buffers, and the field
//! names that decoder can emit. The registry orders descriptors; the
//! dispatcher offers every capture window to every enabled descriptor.

mod dispatch;
mod error;
mod registry;

use std::fmt;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::demod::{Limits, Modulation};
use crate::{BitBuffer, DEFAULT_TIME, RecordSink};

pub use dispatch::dispatch;
pub use error::{DecodeError, DispatchError, RegistryError};
pub use registry::{BUILTIN_DEVICES, DeviceRegistry};

/// Protocol-specific interpretation of a bit buffer.
///
/// Implementations must be pure: the outcome depends only on the buffer
/// and context, and nothing is kept between calls.
pub trait Decoder: Send + Sync {
    /// Push zero or more records into `sink`, returning how many were pushed.
    fn decode(
        &self,
        bits: &BitBuffer,
        ctx: &DecodeContext,
        sink: &mut dyn RecordSink,
    ) -> Result<usize, DecodeError>;
}

/// Static declaration of one protocol.
#[derive(Clone, Copy)]
pub struct DeviceDescriptor {
    pub name: &'static str,
    pub modulation: Modulation,
    pub short_limit: u32,
    pub long_limit: u32,
    pub reset_limit: u32,
    pub decoder: &'static dyn Decoder,
    pub enabled: bool,
    /// Every key `decoder` can emit, in emission order.
    pub fields: &'static [&'static str],
}

impl DeviceDescriptor {
    pub fn limits(&self) -> Limits {
        Limits {
            short_us: self.short_limit,
            long_us: self.long_limit,
            reset_us: self.reset_limit,
        }
    }
}

impl fmt::Debug for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceDescriptor")
            .field("name", &self.name)
            .field("modulation", &self.modulation)
            .field("short_limit", &self.short_limit)
            .field("long_limit", &self.long_limit)
            .field("reset_limit", &self.reset_limit)
            .field("enabled", &self.enabled)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Per-window facts shared by every decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeContext {
    time: String,
}

impl DecodeContext {
    /// Context for a window captured at `ts` (Unix seconds), if known.
    ///
    /// # Examples
    /// ```
    /// use rfsense_core::DecodeContext;
    ///
    /// let ctx = DecodeContext::new(Some(1_700_000_000.0));
    /// assert_eq!(ctx.time(), "2023-11-14T22:13:20Z");
    /// assert_eq!(DecodeContext::new(None).time(), rfsense_core::DEFAULT_TIME);
    /// ```
    pub fn new(ts: Option<f64>) -> Self {
        let time = ts_to_rfc3339(ts).unwrap_or_else(|| DEFAULT_TIME.to_string());
        Self { time }
    }

    /// Capture time rendered as RFC 3339.
    pub fn time(&self) -> &str {
        &self.time
    }
}

pub(crate) fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}
