use super::layout;
use crate::protocols::common::crc::crc8;
use crate::protocols::common::reader::RowReader;
use crate::{BitBuffer, BitBufferError};

#[derive(Debug, Clone, PartialEq)]
pub struct RubicsonReading {
    pub id: u8,
    pub battery_ok: bool,
    pub channel: u8,
    pub temperature_c: f64,
}

/// Whether the first five bytes of a row form a valid Rubicson frame.
///
/// Covers id, flags, temperature and the constant nibble; the CRC sits in
/// the low nibble of byte 3 and the high nibble of byte 4. Anything after
/// bit 36 is ignored.
pub fn crc_valid(frame: &[u8; layout::FRAME_BYTES]) -> bool {
    let message = [
        frame[0],
        frame[1],
        frame[2],
        frame[3] & 0xF0,
        (frame[3] & 0x0F) << 4 | frame[4] >> 4,
    ];
    crc8(&message, layout::CRC_POLY, layout::CRC_INIT) == 0
}

/// Decode the data row, or `Ok(None)` when the buffer is not a Rubicson frame.
pub fn parse_frame(bits: &BitBuffer) -> Result<Option<RubicsonReading>, BitBufferError> {
    if bits.num_rows() < layout::MIN_ROWS {
        return Ok(None);
    }
    let reader = RowReader::new(bits, layout::DATA_ROW);
    if reader.bit_len()? != layout::FRAME_BITS {
        return Ok(None);
    }
    let frame = reader.read_array::<{ layout::FRAME_BYTES }>()?;
    if !crc_valid(&frame) {
        return Ok(None);
    }

    let id = reader.read_u8(layout::ID_OFFSET)?;
    let flags = reader.read_u8(layout::FLAGS_OFFSET)?;
    let temp_low = reader.read_u8(layout::TEMP_OFFSET)?;
    // 12 bits: low nibble of the flags byte, then the whole next byte.
    let raw = (u16::from(flags) << 12 | u16::from(temp_low) << 4) as i16 >> 4;

    Ok(Some(RubicsonReading {
        id,
        battery_ok: flags & layout::BATTERY_OK_MASK != 0,
        channel: ((flags & layout::CHANNEL_MASK) >> layout::CHANNEL_SHIFT) + 1,
        temperature_c: f64::from(raw) / layout::TEMP_SCALE,
    }))
}
