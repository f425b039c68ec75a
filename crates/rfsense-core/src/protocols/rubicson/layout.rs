pub const MIN_ROWS: usize = 2;
pub const DATA_ROW: usize = 1;
pub const FRAME_BITS: usize = 36;
/// Bytes covering the frame; the last one holds a single nibble.
pub const FRAME_BYTES: usize = 5;

pub const ID_OFFSET: usize = 0;
pub const FLAGS_OFFSET: usize = 1;
pub const TEMP_OFFSET: usize = 2;

pub const BATTERY_OK_MASK: u8 = 0x80;
pub const CHANNEL_MASK: u8 = 0x30;
pub const CHANNEL_SHIFT: u8 = 4;

pub const TEMP_SCALE: f64 = 10.0;

pub const CRC_POLY: u8 = 0x31;
pub const CRC_INIT: u8 = 0x6c;
