use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;

use coderbot::app::{init_tracing, run_prompt_mode, run_repl_mode, setup_from_cli};
use coderbot::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing(cli.verbose);
    let ctx = setup_from_cli(&cli)?;

    if let Some(prompt) = cli.prompt.as_deref() {
        let answered = run_prompt_mode(ctx, prompt).await?;
        return Ok(if answered {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    run_repl_mode(ctx).await?;
    Ok(ExitCode::SUCCESS)
}
