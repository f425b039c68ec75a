pub const MIN_ROWS: usize = 2;
/// Leading row left over from the preamble gap; must carry no set bits.
pub const PREAMBLE_ROW: usize = 0;
/// Reference row, also the one carrying the frame.
pub const DATA_ROW: usize = 1;
/// 36 data bits plus 4 trailing bits as demodulated.
pub const ROW_BITS: usize = 40;
pub const FRAME_BYTES: usize = 5;

pub const ID_OFFSET: usize = 0;
pub const STATUS_OFFSET: usize = 1;
pub const BATTERY_LOW_MASK: u8 = 0x04;
/// Byte 2 and the high nibble of byte 3.
pub const TEMP_HIGH_OFFSET: usize = 2;
pub const TEMP_LOW_OFFSET: usize = 3;
pub const HUMIDITY_TENS_OFFSET: usize = 3;
pub const HUMIDITY_UNITS_OFFSET: usize = 4;
pub const CHANNEL_OFFSET: usize = 4;
pub const CHANNEL_MASK: u8 = 0x03;

pub const TEMP_BIAS: i16 = 1221;
pub const TEMP_SCALE: f64 = 10.0;
