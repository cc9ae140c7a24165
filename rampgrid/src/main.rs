use std::io::{self, IsTerminal};

use clap::Parser;

use rampgrid_lib::config::Args;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Args::parse().into_config(io::stdout().is_terminal());
    rampgrid_lib::run(&config, &mut io::stdout())?;
    Ok(())
}
