use crate::cli::Cli;
use crate::error::CliError;
use crate::transpiler::Transpiler;
use clap::Parser;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod error;
mod transpiler;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    let cli = Cli::parse();

    let result = Transpiler::from_cli(&cli).and_then(|transpiler| transpiler.transpile());
    let error = match result {
        Ok(files) => {
            println!("🚀 Generated {files} Erlang files!");
            return Ok(());
        }
        Err(error) => error,
    };

    match &error {
        CliError::InvalidPath(path) => {
            eprintln!("😢 Invalid path detected: {path}");
        }
        CliError::InexistentPath(path) => {
            eprintln!("😢 Inexistent path detected: {path}");
        }
        CliError::NotDirectory(path) => {
            eprintln!("😢 Path is not a directory: {path}");
        }
        CliError::GeneralIo(error) => {
            eprintln!("😭 Unexpected IO error: {error}");
        }
        CliError::Definition(error) => {
            eprintln!("😭 Invalid error definition: {error}");
        }
        CliError::Codegen(error) => {
            eprintln!("😭 Code generation failed: {error}");
        }
    }

    std::process::exit(1);
}
