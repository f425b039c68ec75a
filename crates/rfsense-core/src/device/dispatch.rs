use tracing::{debug, trace};

use crate::RecordSink;
use crate::demod::{Demodulator, Pulse};

use super::{DecodeContext, DeviceRegistry, DispatchError};

/// Offer one capture window to every enabled device, in registry order.
///
/// Each device gets its own demodulation of `pulses` under its timing
/// profile, so devices never see each other's buffers. Returns the number
/// of records emitted across all devices; a window nobody recognises
/// yields `Ok(0)`.
///
/// # Errors
/// Returns `DispatchError` when a decoder reports a buffer invariant
/// violation; the rest of the window is abandoned.
pub fn dispatch<D: Demodulator + ?Sized>(
    registry: &DeviceRegistry,
    demodulator: &D,
    pulses: &[Pulse],
    ctx: &DecodeContext,
    sink: &mut dyn RecordSink,
) -> Result<usize, DispatchError> {
    let mut total = 0usize;
    for device in registry.enabled() {
        let buffers = demodulator.demodulate(pulses, device.modulation, device.limits());
        trace!(
            device = device.name,
            buffers = buffers.len(),
            "demodulated window"
        );
        for bits in &buffers {
            let count = device
                .decoder
                .decode(bits, ctx, sink)
                .map_err(|source| DispatchError {
                    device: device.name,
                    source,
                })?;
            total += count;
        }
    }
    debug!(pulses = pulses.len(), decoded = total, "window dispatched");
    Ok(total)
}
