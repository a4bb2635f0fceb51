use tracing::info;

use crate::clock::Clock;
use crate::config::Config;
use crate::error::Result;
use crate::input::read_results;
use crate::output::{Encoder, Transmitter};
use crate::synth::Synthesizer;

// results file -> BenchmarkResults -> WriteBatch -> snappy(protobuf) -> receiver
//
// Reader      == path               ->  BenchmarkResults
// Synthesizer == BenchmarkResults   ->  WriteBatch (4 series)
// Encoder     == WriteBatch         ->  Vec<u8>
// Transmitter == Vec<u8>            ->  remote-write endpoint
//
// Every step runs once. The first error ends the run.

pub struct Runner {
    config: Config,
    clock: Box<dyn Clock>,
    encoder: Box<dyn Encoder>,
    transmitter: Box<dyn Transmitter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub series: usize,
    pub samples: usize,
    pub bytes: usize,
}

impl Runner {
    pub fn new(
        config: Config,
        clock: Box<dyn Clock>,
        encoder: Box<dyn Encoder>,
        transmitter: Box<dyn Transmitter>,
    ) -> Self {
        Self {
            config,
            clock,
            encoder,
            transmitter,
        }
    }

    pub fn run(&self) -> Result<Report> {
        let results = read_results(self.config.results_path())?;

        let batch = Synthesizer::new(self.clock.as_ref())
            .synthesize_batch(&results, self.config.labels())?;

        let payload = self.encoder.encode(&batch)?;

        self.transmitter.transmit(&payload)?;

        let report = Report {
            series: batch.series().len(),
            samples: batch.sample_count(),
            bytes: payload.len(),
        };
        info!(
            series = report.series,
            samples = report.samples,
            bytes = report.bytes,
            "benchmark results sent"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    use super::*;
    use crate::clock::FixedClock;
    use crate::error::{Error, ErrorKind};
    use crate::model::Label;
    use crate::output::RemoteWriteEncoder;

    struct TestTransmitter {
        sent: Rc<RefCell<Vec<Vec<u8>>>>,
        fail: bool,
    }

    impl Transmitter for TestTransmitter {
        fn transmit(&self, payload: &[u8]) -> Result<()> {
            if self.fail {
                return Err(Error::transmission("connection refused"));
            }
            self.sent.borrow_mut().push(payload.to_vec());
            Ok(())
        }
    }

    fn results_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn runner(
        file: &tempfile::NamedTempFile,
        labels: Vec<Label>,
        fail: bool,
    ) -> (Runner, Rc<RefCell<Vec<Vec<u8>>>>) {
        let config = Config::builder("http://localhost:19291", file.path())
            .unwrap()
            .labels(labels)
            .build();
        let sent = Rc::new(RefCell::new(vec![]));
        let runner = Runner::new(
            config,
            Box::new(FixedClock(1_609_459_200_000)),
            Box::new(RemoteWriteEncoder::new()),
            Box::new(TestTransmitter {
                sent: Rc::clone(&sent),
                fail,
            }),
        );
        (runner, sent)
    }

    #[test]
    fn test_run_sends_one_payload() -> Result<()> {
        let file = results_file(br#"{"consumeRate": [1.0, 2.0, 3.0], "publishRate": [4.0]}"#);
        let (runner, sent) = runner(&file, vec![Label::new("env", "prod")], false);

        let report = runner.run()?;

        assert_eq!(report.series, 4);
        assert_eq!(report.samples, 4);
        assert_eq!(sent.borrow().len(), 1);
        assert_eq!(report.bytes, sent.borrow()[0].len());

        let batch = RemoteWriteEncoder::new().decode(&sent.borrow()[0])?;
        let consume = batch.series_by_name("omb_results_consume_rate").unwrap();
        assert_eq!(consume.samples().len(), 3);
        assert_eq!(consume.labels().get("env"), Some("prod"));
        Ok(())
    }

    #[test]
    fn test_bad_json_stops_before_send() {
        let file = results_file(b"{not json");
        let (runner, sent) = runner(&file, vec![], false);

        let err = runner.run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn test_duplicate_label_stops_before_send() {
        let file = results_file(br#"{"consumeRate": [1.0]}"#);
        let labels = vec![Label::new("run", "1"), Label::new("run", "2")];
        let (runner, sent) = runner(&file, labels, false);

        let err = runner.run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateLabelName);
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn test_transmission_error_propagates() {
        let file = results_file(br#"{"consumeRate": [1.0]}"#);
        let (runner, _) = runner(&file, vec![], true);

        let err = runner.run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transmission);
    }
}
