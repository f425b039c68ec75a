//! "Test Sensor" thermo-hygrometer.
//!
//! Distance-coded frame repeated with a row gap between repetitions, so the
//! buffer starts with an empty row followed by 40-bit rows (36 data bits as
//! 9 nibbles plus trailing bits). Byte layout of the data row:
//!
//! - byte 0: house code, changes on battery swap
//! - byte 1: status nibble (high), battery-low flag (bit 2)
//! - byte 2 + high nibble of byte 3: temperature, 12 bits, biased by 1221,
//!   tenths of a degree
//! - low nibble of byte 3: humidity tens digit
//! - high nibble of byte 4: humidity units digit
//! - low 2 bits of byte 4: channel (0-2 for channels 1-3)
//!
//! The timing profile overlaps Rubicson's; see `parser::parse_frame` for the
//! discriminator.

pub mod layout;
pub mod parser;

pub use parser::{TestSensorReading, parse_frame};

use tracing::debug;

use crate::demod::Modulation;
use crate::device::{DecodeContext, DecodeError, Decoder, DeviceDescriptor};
use crate::{BitBuffer, Record, RecordSink};

pub const NAME: &str = "Test Sensor";

pub const FIELDS: &[&str] = &[
    "time",
    "model",
    "id",
    "battery",
    "channel",
    "temperature_C",
    "humidity",
];

pub static TEST_SENSOR: DeviceDescriptor = DeviceDescriptor {
    name: NAME,
    modulation: Modulation::PulsePositionRaw,
    short_limit: 2400,
    long_limit: 5000,
    reset_limit: 8000,
    decoder: &TestSensorDecoder,
    enabled: true,
    fields: FIELDS,
};

pub struct TestSensorDecoder;

impl Decoder for TestSensorDecoder {
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
                .string("battery", "Battery", if reading.battery_low { "LOW" } else { "OK" })
                .int("channel", "Channel", reading.channel)
                .float_with_format(
                    "temperature_C",
                    "Temperature",
                    "%.01f C",
                    reading.temperature_c,
                )
                .int_with_format("humidity", "Humidity", "%u %%", reading.humidity),
        );
        Ok(1)
    }
}
