use super::{Limits, MessageCollector, Pulse};

/// Classify each gap: short is 0, long is 1, longer starts a new row, and
/// anything at or past the reset limit ends the message.
pub(super) fn demodulate(pulses: &[Pulse], limits: Limits, out: &mut MessageCollector) {
    for pulse in pulses {
        let gap = pulse.gap_us;
        if gap < limits.short_us {
            out.bit(false);
        } else if gap < limits.long_us {
            out.bit(true);
        } else if gap < limits.reset_us {
            out.row();
        } else {
            out.end_message();
        }
    }
}
