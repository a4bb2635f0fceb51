use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde_json::{json, Value};
use structopt::StructOpt;

use omb_remote_write::cliopt::CliOpt;
use omb_remote_write::clock::FixedClock;
use omb_remote_write::config::Config;
use omb_remote_write::error::Result as OmbResult;
use omb_remote_write::model::WriteBatch;
use omb_remote_write::output::{RemoteWriteEncoder, Transmitter};
use omb_remote_write::runner::Runner;

const NOW: i64 = 1_609_459_200_000;

#[test]
fn e2e() -> Result<(), Box<dyn std::error::Error>> {
    let root_test_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("scenarios");

    for test_dir in fs::read_dir(&root_test_dir)? {
        let test_dir = test_dir?.path();

        if let Ok(filter) = std::env::var("E2E_CASE") {
            if !test_dir.as_os_str().to_string_lossy().ends_with(&filter) {
                continue;
            }
        }

        let cli_args: Vec<String> =
            serde_json::from_str(&fs::read_to_string(test_dir.join("args.json"))?)?;

        let payloads = push(&test_dir.join("results.json"), &cli_args)?;
        assert_eq!(
            payloads.len(),
            1,
            "exactly one upload expected in '{}'",
            test_dir.display()
        );

        let actual = render(&RemoteWriteEncoder::new().decode(&payloads[0])?);
        let expected: Value =
            serde_json::from_str(&fs::read_to_string(test_dir.join("expected.json"))?)?;

        assert_eq!(
            expected,
            actual,
            "\nUnexpected write request in '{}'.\nExpected:\n{}\nActual:\n{}",
            test_dir.display(),
            serde_json::to_string_pretty(&expected)?,
            serde_json::to_string_pretty(&actual)?,
        );
    }

    Ok(())
}

struct TestTransmitter(Rc<RefCell<Vec<Vec<u8>>>>);

impl Transmitter for TestTransmitter {
    fn transmit(&self, payload: &[u8]) -> OmbResult<()> {
        self.0.borrow_mut().push(payload.to_vec());
        Ok(())
    }
}

fn push(results: &Path, cli_args: &[String]) -> Result<Vec<Vec<u8>>, Box<dyn std::error::Error>> {
    let mut argv = vec![
        "omb-remote-write".to_owned(),
        "--results".to_owned(),
        results.to_string_lossy().into_owned(),
    ];
    argv.extend_from_slice(cli_args);

    let opt = CliOpt::from_iter(argv);
    let config = Config::resolve_with(&opt, |_| None)?;

    let sent = Rc::new(RefCell::new(Vec::new()));
    let runner = Runner::new(
        config,
        Box::new(FixedClock(NOW)),
        Box::new(RemoteWriteEncoder::new()),
        Box::new(TestTransmitter(Rc::clone(&sent))),
    );
    runner.run()?;

    // To make Rc::try_unwrap(sent) work.
    drop(runner);

    match Rc::try_unwrap(sent) {
        Ok(sent) => Ok(sent.into_inner()),
        _ => unreachable!(),
    }
}

fn render(batch: &WriteBatch) -> Value {
    Value::Array(
        batch
            .series()
            .iter()
            .map(|series| {
                json!({
                    "labels": series
                        .labels()
                        .iter()
                        .map(|l| json!([l.name(), l.value()]))
                        .collect::<Vec<_>>(),
                    "samples": series
                        .samples()
                        .iter()
                        .map(|s| json!([s.timestamp(), s.value()]))
                        .collect::<Vec<_>>(),
                })
            })
            .collect(),
    )
}
