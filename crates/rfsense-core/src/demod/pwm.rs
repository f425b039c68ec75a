use super::{Limits, MessageCollector, Pulse};

/// Short pulses are 1, long pulses 0; the gap after the pulse decides
/// whether the row or the whole message ends.
pub(super) fn demodulate(pulses: &[Pulse], limits: Limits, out: &mut MessageCollector) {
    for pulse in pulses {
        out.bit(pulse.pulse_us < limits.short_us);
        if pulse.gap_us > limits.reset_us {
            out.end_message();
        } else if pulse.gap_us > limits.long_us {
            out.row();
        }
    }
}
