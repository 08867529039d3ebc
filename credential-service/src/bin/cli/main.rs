use std::env;
use std::io;
use std::process::ExitCode;

use auth::Authenticator;
use credential_service::config::Config;
use credential_service::inbound::cli::Command;
use credential_service::inbound::cli::USAGE;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<ExitCode, anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{:#}\n\n{}", e, USAGE);
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = Config::load()?;
    let authenticator = Authenticator::from_config(&config.auth)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        signing_algorithm = %config.auth.signing_algorithm,
        default_token_lifetime_minutes = config.auth.default_token_lifetime_minutes,
        password_cost = config.auth.password_cost,
        "Configuration loaded"
    );

    let outcome = command.execute(
        &authenticator,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    )?;

    Ok(ExitCode::from(outcome.exit_code()))
}
