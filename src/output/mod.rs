pub mod encoder;
pub mod transmitter;

pub use encoder::{Encoder, RemoteWriteEncoder};
pub use transmitter::{HttpTransmitter, Transmitter};
