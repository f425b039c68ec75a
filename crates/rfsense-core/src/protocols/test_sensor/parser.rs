use tracing::debug;

use super::layout;
use crate::protocols::common::reader::RowReader;
use crate::protocols::rubicson;
use crate::{BitBuffer, BitBufferError};

#[derive(Debug, Clone, PartialEq)]
pub struct TestSensorReading {
    pub id: u8,
    /// Unidentified status/checksum nibble; carried, not validated.
    pub status: u8,
    pub battery_low: bool,
    pub channel: u8,
    pub temperature_c: f64,
    pub humidity: u8,
}

/// Decode the data row, or `Ok(None)` when the buffer is not a Test Sensor
/// frame.
///
/// Frames that also pass the Rubicson CRC are rejected: the two protocols
/// share a timing profile and Rubicson is far more common. About one in 256
/// genuine frames hits the CRC by chance and is lost this way.
pub fn parse_frame(bits: &BitBuffer) -> Result<Option<TestSensorReading>, BitBufferError> {
    if bits.num_rows() < layout::MIN_ROWS {
        return Ok(None);
    }
    if bits.leading_bits(layout::PREAMBLE_ROW)? != 0 {
        return Ok(None);
    }
    let reader = RowReader::new(bits, layout::DATA_ROW);
    if reader.bit_len()? != layout::ROW_BITS {
        return Ok(None);
    }

    let frame = reader.read_array::<{ layout::FRAME_BYTES }>()?;
    if rubicson::crc_valid(&frame) {
        debug!(%bits, "row is a valid Rubicson frame, skipping");
        return Ok(None);
    }

    let id = reader.read_u8(layout::ID_OFFSET)?;
    let status = reader.read_u8(layout::STATUS_OFFSET)?;

    let temp_high = reader.read_u8(layout::TEMP_HIGH_OFFSET)?;
    let temp_low = reader.read_u8(layout::TEMP_LOW_OFFSET)? & 0xF0;
    let raw = u16::from_be_bytes([temp_high, temp_low]) as i16 >> 4;
    let temp = raw - layout::TEMP_BIAS;

    let tens = reader.low_nibble(layout::HUMIDITY_TENS_OFFSET)?;
    let units = reader.high_nibble(layout::HUMIDITY_UNITS_OFFSET)?;
    let channel = reader.read_u8(layout::CHANNEL_OFFSET)? & layout::CHANNEL_MASK;

    Ok(Some(TestSensorReading {
        id,
        status: status >> 4,
        battery_low: status & layout::BATTERY_LOW_MASK != 0,
        channel: channel + 1,
        temperature_c: f64::from(temp) / layout::TEMP_SCALE,
        humidity: tens * 10 + units,
    }))
}
