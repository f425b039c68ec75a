use crate::{BitBuffer, BitBufferError};

/// Byte and nibble access to one row of a bit buffer.
///
/// All reads are bounded by the row's declared bit length.
pub(crate) struct RowReader<'a> {
    bits: &'a BitBuffer,
    row: usize,
}

impl<'a> RowReader<'a> {
    pub(crate) fn new(bits: &'a BitBuffer, row: usize) -> Self {
        Self { bits, row }
    }

    pub(crate) fn bit_len(&self) -> Result<usize, BitBufferError> {
        self.bits
            .bits_per_row(self.row)
            .ok_or(BitBufferError::RowOutOfRange {
                row: self.row,
                rows: self.bits.num_rows(),
            })
    }

    pub(crate) fn read_u8(&self, offset: usize) -> Result<u8, BitBufferError> {
        self.bits.byte(self.row, offset)
    }

    pub(crate) fn high_nibble(&self, offset: usize) -> Result<u8, BitBufferError> {
        Ok(self.read_u8(offset)? >> 4)
    }

    pub(crate) fn low_nibble(&self, offset: usize) -> Result<u8, BitBufferError> {
        Ok(self.read_u8(offset)? & 0x0F)
    }

    /// The first `N` bytes of the row.
    pub(crate) fn read_array<const N: usize>(&self) -> Result<[u8; N], BitBufferError> {
        let mut out = [0u8; N];
        for (offset, byte) in out.iter_mut().enumerate() {
            *byte = self.read_u8(offset)?;
        }
        Ok(out)
    }
}
