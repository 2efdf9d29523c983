use clap::Parser;
use swig_runner::Runner;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing based on RUST_LOG env var, info by default
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::parse();
    if let Err(e) = runner.command.execute() {
        eprintln!("error: {e:#}");
        let code = e
            .downcast_ref::<swig_runner_core::Error>()
            .map(|e| e.exit_code())
            .unwrap_or(1);
        std::process::exit(code);
    }
}
