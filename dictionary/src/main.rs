use std::io;

use clap::Parser;

use dictionary::{Config, menu::Session};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::parse();
    log::debug!("using data file {}", config.data_file.display());

    let mut session = Session::open(&config.data_file)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), stdout.lock())?;

    Ok(())
}
