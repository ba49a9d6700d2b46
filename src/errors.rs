use std::io;

/// An encoding failure: the input exceeds what the stream format can
/// describe.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The 8-bit symbol-count field holds at most 255 distinct symbols.
    #[error("alphabet overflow: {0} distinct symbols (max 255)")]
    AlphabetOverflow(usize),

    /// The 8-bit length field holds codes of at most 255 bits.
    #[error("code overflow: symbol {symbol:#04x} got a {bits}-bit code (max 255)")]
    CodeOverflow { symbol: u8, bits: usize },
}

/// A decoding error, due to malformed compressed data.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed header: {0}")]
    Header(String),

    #[error("malformed payload: {0}")]
    Payload(String),
}

impl From<EncodeError> for io::Error {
    fn from(e: EncodeError) -> Self {
        io::Error::new(io::ErrorKind::Other, e)
    }
}

impl From<DecodeError> for io::Error {
    fn from(e: DecodeError) -> Self {
        io::Error::new(io::ErrorKind::Other, e)
    }
}
