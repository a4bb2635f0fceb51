mod encoder;
pub mod proto;
mod remote_write;

pub use encoder::Encoder;
pub use remote_write::RemoteWriteEncoder;
