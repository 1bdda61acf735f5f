//! countup: animated statistic counters for the terminal.

use std::process::ExitCode;

use countup_lib::{app, config, errors};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = config::AppConfig::parse();
    let code = match app::run(&config) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            countup_cli::ui::print_error(&format!("{err:#}"));
            errors::exit_code(&err)
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
