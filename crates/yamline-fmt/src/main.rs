use std::process::ExitCode;

use bpaf::Bpaf;
use tracing_subscriber::EnvFilter;

/// Canonicalize YAML files
#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
struct Cli {
    #[bpaf(external(yamline_fmt::format_args))]
    args: yamline_fmt::FormatArgs,
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = cli().run();
    init_tracing(cli.args.log_level.as_deref());

    match yamline_fmt::run(&cli.args) {
        Ok(result) => {
            for (path, message) in &result.errors {
                eprintln!("{path}: {message}");
            }
            if cli.args.check {
                for path in &result.changed {
                    eprintln!("{path}: not canonical");
                }
            }
            if !result.errors.is_empty() {
                ExitCode::from(2)
            } else if cli.args.check && !result.changed.is_empty() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
