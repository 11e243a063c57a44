//! Storie CLI binary.
//!
//! This binary provides command-line access to Storie:
//! - Create storybooks and follow their generation
//! - Read finished storybooks page by page
//! - Regenerate individual pages with optional feedback
//! - Draft storybooks locally without the hosted backend

use clap::Parser;
use storie::{Credentials, StorieConfig, StorieResult, build_service, connect, telemetry};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    // Secrets may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose, cli.json_logs);

    let config = match &cli.config {
        Some(path) => StorieConfig::from_file(path)?,
        None => StorieConfig::load()?,
    };

    match cli.command {
        Commands::Styles => cli::styles(),

        Commands::Draft { ref story, ref out } => cli::draft(&config, story, out).await?,

        ref command => {
            let credentials = credentials(&cli);
            let backend = connect(&config, credentials).await?;
            let service = build_service(&config, backend)?;
            run_remote(&service, command).await?;
        }
    }

    Ok(())
}

async fn run_remote(service: &storie::StorybookService, command: &cli::Commands) -> StorieResult<()> {
    use cli::Commands;

    match command {
        Commands::Create { story, wait } => cli::create(service, story, *wait).await,
        Commands::List { format } => cli::list(service, *format).await,
        Commands::Show { id, format } => cli::show(service, *id, *format).await,
        Commands::Regenerate {
            page_id,
            target,
            feedback,
        } => cli::regenerate(service, *page_id, *target, feedback.clone()).await,
        Commands::Delete { id } => cli::delete(service, *id).await,
        Commands::Wait { id } => cli::wait(service, *id).await,
        Commands::Styles | Commands::Draft { .. } => Ok(()),
    }
}

/// Flags win over the environment.
fn credentials(cli: &cli::Cli) -> Credentials {
    match (&cli.email, &cli.password) {
        (Some(email), Some(password)) => Credentials::Password {
            email: email.clone(),
            password: password.clone(),
        },
        _ => Credentials::from_env(),
    }
}
