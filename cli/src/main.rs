use clap::Parser;
use tracing_subscriber::EnvFilter;

use task_list_cli::{config, Cli, CliError, Session, TerminalConfirm, Transport};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = config::load(&cli)?;
    tracing::info!(base_url = %config.base_url, "starting");
    let session = Session::new(
        config.build_client(),
        Transport::new()?,
        std::io::stdout(),
        TerminalConfirm,
    );
    session.run().await
}
