use crate::error::Result;
use crate::model::WriteBatch;

pub trait Encoder {
    fn encode(&self, batch: &WriteBatch) -> Result<Vec<u8>>;
}
