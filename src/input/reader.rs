use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use super::results::BenchmarkResults;
use crate::error::{Error, ErrorKind, Result};

pub struct ResultsReader<R> {
    inner: R,
}

impl<R: Read> ResultsReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn read(mut self) -> Result<BenchmarkResults> {
        let mut buf = Vec::new();
        self.inner
            .read_to_end(&mut buf)
            .map_err(|e| (ErrorKind::Input, "couldn't read results", e))?;

        debug!(bytes = buf.len(), "read benchmark results");
        BenchmarkResults::from_slice(&buf)
    }
}

pub fn read_results<P: AsRef<Path>>(path: P) -> Result<BenchmarkResults> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::with_source(
            ErrorKind::Input,
            &format!("couldn't open results file {}", path.display()),
            e,
        )
    })?;

    ResultsReader::new(BufReader::new(file)).read()
}
