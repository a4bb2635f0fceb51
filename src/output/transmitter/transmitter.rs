use crate::error::Result;

/// Delivers an encoded payload. One call is one logical upload.
pub trait Transmitter {
    fn transmit(&self, payload: &[u8]) -> Result<()>;
}
