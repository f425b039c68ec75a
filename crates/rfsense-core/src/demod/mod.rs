//! Pulse-train demodulation.
//!
//! Turns a window of `(pulse, gap)` durations into bit buffers according to
//! one device's modulation and timing limits. The dispatcher calls this once
//! per enabled device, so the same pulses are reinterpreted under every
//! timing profile.

mod ppm;
mod pwm;

use serde::{Deserialize, Serialize};

use crate::BitBuffer;

/// One mark/space pair, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    pub pulse_us: u32,
    pub gap_us: u32,
}

impl Pulse {
    pub const fn new(pulse_us: u32, gap_us: u32) -> Self {
        Self { pulse_us, gap_us }
    }
}

/// Supported pulse encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modulation {
    /// Distance coded: the gap after a fixed-width pulse carries the bit.
    PulsePositionRaw,
    /// Width coded: a short pulse is a 1, a long pulse a 0.
    PulseWidthRaw,
}

impl Modulation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modulation::PulsePositionRaw => "ppm_raw",
            Modulation::PulseWidthRaw => "pwm_raw",
        }
    }
}

/// Timing thresholds in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub short_us: u32,
    pub long_us: u32,
    pub reset_us: u32,
}

/// Pulse-to-bit conversion under a given timing profile.
pub trait Demodulator {
    /// Demodulate `pulses`, returning one buffer per detected message.
    ///
    /// Buffers without a single bit are never returned.
    fn demodulate(&self, pulses: &[Pulse], modulation: Modulation, limits: Limits)
    -> Vec<BitBuffer>;
}

/// Threshold demodulator for the raw OOK encodings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseDemodulator;

impl Demodulator for PulseDemodulator {
    fn demodulate(
        &self,
        pulses: &[Pulse],
        modulation: Modulation,
        limits: Limits,
    ) -> Vec<BitBuffer> {
        let mut messages = MessageCollector::default();
        match modulation {
            Modulation::PulsePositionRaw => ppm::demodulate(pulses, limits, &mut messages),
            Modulation::PulseWidthRaw => pwm::demodulate(pulses, limits, &mut messages),
        }
        messages.finish()
    }
}

/// Accumulates bits and cuts them into per-message buffers.
#[derive(Debug, Default)]
struct MessageCollector {
    current: BitBuffer,
    done: Vec<BitBuffer>,
}

impl MessageCollector {
    fn bit(&mut self, bit: bool) {
        self.current.add_bit(bit);
    }

    fn row(&mut self) {
        self.current.add_row();
    }

    fn end_message(&mut self) {
        let buffer = std::mem::take(&mut self.current);
        if !buffer.is_empty() {
            self.done.push(buffer);
        }
    }

    fn finish(mut self) -> Vec<BitBuffer> {
        self.end_message();
        self.done
    }
}
