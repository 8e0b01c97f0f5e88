use clap::Parser;
use microscope::api::{Cli, Command, run_http_server, run_report};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = run_http_server(port).await {
                error!(%e, "server error");
                std::process::exit(1);
            }
        }
        Command::Report(args) => match run_report(&args) {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("Report error: {e}");
                std::process::exit(1);
            }
        },
    }
}
