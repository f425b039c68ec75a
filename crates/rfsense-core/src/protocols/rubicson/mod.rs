//! Rubicson temperature sensor.
//!
//! 36-bit distance-coded frame, repeated; one frame per row after an empty
//! leading row. Layout: `[id:8] [battery:1 unk:1 channel:2 temp:12]
//! [const:4] [crc:8]`, with the CRC-8 (poly 0x31, init 0x6c) covering the
//! first 28 bits plus the constant nibble.
//!
//! The CRC check is also the discriminator other distance-coded decoders use
//! to leave Rubicson frames alone.

pub mod layout;
pub mod parser;

pub use parser::{crc_valid, parse_frame};

use tracing::debug;

use crate::demod::Modulation;
use crate::device::{DecodeContext, DecodeError, Decoder, DeviceDescriptor};
use crate::{BitBuffer, Record, RecordSink};

pub const NAME: &str = "Rubicson Temperature Sensor";

pub const FIELDS: &[&str] = &[
    "time",
    "model",
    "id",
    "channel",
    "battery",
    "temperature_C",
    "mic",
];

pub static RUBICSON: DeviceDescriptor = DeviceDescriptor {
    name: NAME,
    modulation: Modulation::PulsePositionRaw,
    short_limit: 1744,
    long_limit: 3500,
    reset_limit: 5000,
    decoder: &RubicsonDecoder,
    enabled: true,
    fields: FIELDS,
};

pub struct RubicsonDecoder;

impl Decoder for RubicsonDecoder {
    fn decode(
        &self,
        bits: &BitBuffer,
        ctx: &DecodeContext,
        sink: &mut dyn RecordSink,
    ) -> Result<usize, DecodeError> {
        let Some(reading) = parse_frame(bits)? else {
            return Ok(0);
        };
        debug!(device = NAME, %bits, "frame decoded");

        sink.emit(
            Record::new()
                .string("time", "", ctx.time())
                .string("model", "", NAME)
                .int("id", "House Code", reading.id)
                .int("channel", "Channel", reading.channel)
                .string("battery", "Battery", if reading.battery_ok { "OK" } else { "LOW" })
                .float_with_format(
                    "temperature_C",
                    "Temperature",
                    "%.01f C",
                    reading.temperature_c,
                )
                .string("mic", "Integrity", "CRC"),
        );
        Ok(1)
    }
}
