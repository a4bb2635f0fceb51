mod reader;
mod results;

pub use reader::{read_results, ResultsReader};
pub use results::BenchmarkResults;
