pub(crate) mod crc;
pub(crate) mod reader;
