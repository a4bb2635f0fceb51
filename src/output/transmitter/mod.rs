mod http;
mod retry;
mod transmitter;

pub use http::HttpTransmitter;
pub use retry::{retry, retry_with_sleep, ExponentialBackoff, RetryPolicy, SingleAttempt};
pub use transmitter::Transmitter;
