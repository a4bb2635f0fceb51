use std::process;

use structopt::StructOpt;
use tracing::{debug, Level};

use omb_remote_write::cliopt::CliOpt;
use omb_remote_write::clock::SystemClock;
use omb_remote_write::config::Config;
use omb_remote_write::error::Result;
use omb_remote_write::output::{HttpTransmitter, RemoteWriteEncoder};
use omb_remote_write::runner::Runner;

fn main() {
    let opt = CliOpt::from_args();

    tracing_subscriber::fmt()
        .with_max_level(if opt.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(&opt) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(opt: &CliOpt) -> Result<()> {
    let config = Config::resolve(opt)?;
    debug!("resolved config: {:?}", config);

    let transmitter = HttpTransmitter::new(&config)?;

    let runner = Runner::new(
        config,
        Box::new(SystemClock),
        Box::new(RemoteWriteEncoder::new()),
        Box::new(transmitter),
    );
    runner.run()?;

    Ok(())
}
