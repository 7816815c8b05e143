use clap::Parser;
use staking_scripts::{
    cli::{Cli, Command},
    errors::ScriptError,
};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let config = cli.config();
    let command = match cli.command {
        Some(command) => command,
        None => Command::prompt()?,
    };

    command.run(&config).await
}
