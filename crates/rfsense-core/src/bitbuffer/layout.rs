/// Maximum number of rows a single buffer can hold.
pub const BITBUF_ROWS: usize = 50;
/// Bytes per row.
pub const BITBUF_COLS: usize = 34;
/// Maximum bit length of one row.
pub const BITBUF_MAX_ROW_BITS: usize = BITBUF_COLS * 8;
