mod labels;
mod metric;
mod sample;
mod series;
mod timestamp;

pub use labels::*;
pub use metric::*;
pub use sample::*;
pub use series::*;
pub use timestamp::*;
