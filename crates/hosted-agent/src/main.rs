//! Command-line entry point to interact with the available agents.

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

use std::error::Error;
use std::io::Write as _;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use hosted_agent::agents;
use hosted_agent::config::{ProjectConfig, WeatherConfig};
use hosted_agent::core::tool::ToolRegistry;
use hosted_agent::core::{InteractionRequest, RunnerBuilder};
use hosted_agent::print_thread_messages;
use hosted_agent_foundry::{Credential, FoundryConfigBuilder, FoundryService};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{self, AsyncBufReadExt};
use tracing_subscriber::EnvFilter;

/// Which agent implementation to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    /// Live weather lookups through a custom function tool.
    Weather,
    /// Math questions with the built-in code interpreter.
    Math,
}

#[derive(Debug, Parser)]
#[command(name = "hosted-agent", version, about)]
struct Cli {
    /// Which agent implementation to run.
    #[arg(long, value_enum)]
    agent: AgentKind,

    /// User message to send to the agent. If omitted, you'll be
    /// prompted interactively.
    #[arg(long, short)]
    prompt: Option<String>,

    /// Optional run-scoped instructions to pass to the agent.
    #[arg(long, short = 'i')]
    additional_instructions: Option<String>,

    /// Delete the temporary agent after the run completes.
    #[arg(long)]
    auto_delete_agent: bool,

    /// Verbosity level (use -v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(directive)
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    dotenvy::dotenv().ok();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let project = ProjectConfig::from_env()?;

    let prompt = match &cli.prompt {
        Some(prompt) => prompt.clone(),
        None => prompt_for_input().await.unwrap_or_default(),
    };
    let prompt = prompt.trim().to_owned();
    if prompt.is_empty() {
        println!("No prompt provided; exiting.");
        return Ok(ExitCode::FAILURE);
    }

    let (registry, request) = prepare(&cli, &project, &prompt)?;

    let config = FoundryConfigBuilder::with_endpoint(
        project.endpoint.clone(),
        Credential::bearer(project.api_key.clone()),
    )
    .build();
    let service = FoundryService::new(config);

    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(
        ProgressStyle::with_template("{spinner} {wide_msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    progress_bar.enable_steady_tick(Duration::from_millis(100));
    progress_bar.set_message("Starting run...");

    let runner = RunnerBuilder::with_service(service.clone())
        .with_registry(registry)
        .on_status({
            let progress_bar = progress_bar.clone();
            move |status| {
                progress_bar
                    .set_message(format!("Run status: {}", status.as_str()));
            }
        })
        .build();

    let result = runner.run_interaction(request).await;
    progress_bar.finish_and_clear();
    let outcome = result?;

    print_thread_messages(&outcome);

    if cli.agent == AgentKind::Math {
        for path in agents::math::save_generated_images(&service, &outcome).await
        {
            println!("Saved image file to: {}", path.display());
        }
    }

    Ok(if outcome.is_completed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn prepare(
    cli: &Cli,
    project: &ProjectConfig,
    prompt: &str,
) -> Result<(ToolRegistry, InteractionRequest), Box<dyn Error>> {
    match cli.agent {
        AgentKind::Weather => {
            let weather = WeatherConfig::from_env()?;
            let registry = agents::weather::registry(weather)?;
            let request = agents::weather::interaction(
                &project.model_deployment,
                prompt,
                cli.additional_instructions.clone(),
                cli.auto_delete_agent,
            );
            Ok((registry, request))
        }
        AgentKind::Math => {
            let request = agents::math::interaction(
                &project.model_deployment,
                prompt,
                cli.additional_instructions.clone(),
                cli.auto_delete_agent,
            );
            Ok((ToolRegistry::new(), request))
        }
    }
}

async fn prompt_for_input() -> Option<String> {
    print!("Enter your message for the agent: ");
    std::io::stdout().flush().ok()?;
    read_line().await
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
