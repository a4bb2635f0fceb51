mod duration;
mod labels;
mod result;

pub use duration::parse_duration;
pub use labels::parse_label_pairs;
pub use result::{IResult, ParseError, Span};
