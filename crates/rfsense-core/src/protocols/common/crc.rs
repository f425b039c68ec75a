/// MSB-first CRC-8 with no final XOR.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use rfsense_core::protocols::common::crc::crc8;
///
/// let crc = crc8(&[0x11, 0x22], 0x31, 0x6c);
/// assert_eq!(crc8(&[0x11, 0x22, crc], 0x31, 0x6c), 0);
/// ```
pub(crate) fn crc8(message: &[u8], polynomial: u8, init: u8) -> u8 {
    let mut remainder = init;
    for byte in message {
        remainder ^= byte;
        for _ in 0..8 {
            remainder = if remainder & 0x80 != 0 {
                (remainder << 1) ^ polynomial
            } else {
                remainder << 1
            };
        }
    }
    remainder
}
