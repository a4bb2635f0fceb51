pub mod cliopt;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod parser;
pub mod runner;
pub mod synth;
