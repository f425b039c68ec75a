//! Demodulated bit rows.
//!
//! A `BitBuffer` is what every decoder reads: up to `BITBUF_ROWS` rows in
//! reception order, each holding up to `BITBUF_MAX_ROW_BITS` bits packed
//! MSB first. Only the demodulator writes; decoders get a shared borrow.
//! Reads are bounded by each row's declared length, so bits the
//! demodulator never produced can't leak into a decoded value.

pub mod error;
pub mod layout;

use std::fmt;

pub use error::BitBufferError;
pub use layout::{BITBUF_COLS, BITBUF_MAX_ROW_BITS, BITBUF_ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
struct BitRow {
    bytes: [u8; BITBUF_COLS],
    bits: usize,
}

impl BitRow {
    fn new() -> Self {
        Self {
            bytes: [0u8; BITBUF_COLS],
            bits: 0,
        }
    }

    fn byte_len(&self) -> usize {
        self.bits.div_ceil(8)
    }
}

/// Fixed-capacity collection of demodulated bit rows.
///
/// # Examples
/// ```
/// use rfsense_core::BitBuffer;
///
/// let mut bits = BitBuffer::new();
/// for bit in [1, 0, 1, 1, 0, 0, 1, 0] {
///     bits.add_bit(bit != 0);
/// }
/// assert_eq!(bits.num_rows(), 1);
/// assert_eq!(bits.bits_per_row(0), Some(8));
/// assert_eq!(bits.byte(0, 0), Ok(0xB2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    rows: Vec<BitRow>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from whole rows given as `(bytes, bit length)`.
    ///
    /// Bytes past the declared length and rows past the capacity are
    /// dropped, exactly as if the bits had been demodulated one by one.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a [u8], usize)>,
    {
        let mut buffer = Self::new();
        for (index, (bytes, bits)) in rows.into_iter().enumerate() {
            if index > 0 {
                buffer.add_row();
            } else if buffer.rows.is_empty() {
                buffer.rows.push(BitRow::new());
            }
            for bit in 0..bits {
                let value = bytes
                    .get(bit / 8)
                    .map(|byte| byte & (0x80 >> (bit % 8)) != 0)
                    .unwrap_or(false);
                buffer.add_bit(value);
            }
        }
        buffer
    }

    /// Append one bit to the current row.
    pub fn add_bit(&mut self, bit: bool) {
        if self.rows.is_empty() {
            self.rows.push(BitRow::new());
        }
        let Some(row) = self.rows.last_mut() else {
            return;
        };
        if row.bits >= BITBUF_MAX_ROW_BITS {
            return;
        }
        if bit {
            row.bytes[row.bits / 8] |= 0x80 >> (row.bits % 8);
        }
        row.bits += 1;
    }

    /// Close the current row and start a new one.
    ///
    /// On an empty buffer this opens an empty row 0 first, so bits that
    /// follow a leading row gap land in row 1. When the buffer is full the
    /// last row is cleared and reused.
    pub fn add_row(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(BitRow::new());
        }
        if self.rows.len() < BITBUF_ROWS {
            self.rows.push(BitRow::new());
        } else if let Some(row) = self.rows.last_mut() {
            *row = BitRow::new();
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// True when no row holds a single bit.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.bits == 0)
    }

    pub fn bits_per_row(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(|r| r.bits)
    }

    /// Bytes of a row that fall within its declared length.
    pub fn row(&self, row: usize) -> Result<&[u8], BitBufferError> {
        let r = self.get_row(row)?;
        Ok(&r.bytes[..r.byte_len()])
    }

    /// Byte `index` of `row`; at least one of its bits must be declared.
    pub fn byte(&self, row: usize, index: usize) -> Result<u8, BitBufferError> {
        let r = self.get_row(row)?;
        if index >= r.byte_len() {
            return Err(BitBufferError::ByteOutOfRange {
                row,
                index,
                bits: r.bits,
            });
        }
        Ok(r.bytes[index])
    }

    /// First byte of `row` with undeclared bits masked off (0 for an empty row).
    pub fn leading_bits(&self, row: usize) -> Result<u8, BitBufferError> {
        let r = self.get_row(row)?;
        let valid = r.bits.min(8);
        if valid == 0 {
            return Ok(0);
        }
        let mask = 0xFFu8 << (8 - valid);
        Ok(r.bytes[0] & mask)
    }

    fn get_row(&self, row: usize) -> Result<&BitRow, BitBufferError> {
        self.rows.get(row).ok_or(BitBufferError::RowOutOfRange {
            row,
            rows: self.rows.len(),
        })
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows", self.rows.len())?;
        for (index, row) in self.rows.iter().enumerate() {
            write!(f, "; [{index:02}] {{{}}}", row.bits)?;
            for byte in &row.bytes[..row.byte_len()] {
                write!(f, " {byte:02x}")?;
            }
        }
        Ok(())
    }
}
