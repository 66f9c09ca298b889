use clap::Parser;
use collector_app::{Cli, run};
use collector_logger::{FileSink, Logger};
use std::io;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut logger = Logger::builder(env!("CARGO_PKG_NAME")).level(cli.log_level).console_json(cli.json);
    if let Some(dir) = &cli.log_dir {
        logger = logger.file(FileSink::new(dir).json());
    }
    let _log = logger.init()?;

    run(&cli, &mut io::stdout().lock(), &mut io::stderr().lock())
}
