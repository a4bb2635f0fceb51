mod synthesizer;

pub use synthesizer::{Synthesizer, REPORTING_INTERVAL};
