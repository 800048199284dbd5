use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info, warn};
use serde_json::Value;
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use outcall::call::HttpCallInvoker;
use outcall::config::Config;
use outcall::mcp::McpServer;
use outcall::tools::ToolDispatcher;

fn setup_logging(cli: &Cli) {
    // stdout carries protocol frames only
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Stderr)
            .init();
        return;
    }

    // Accept everything here; the effective level is narrowed once the config is read
    env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .target(env_logger::Target::Stderr)
        .init();
    log::set_max_level(if cli.is_verbose() { LevelFilter::Debug } else { LevelFilter::Info });
}

/// Apply the configured `log_level` unless `RUST_LOG` or `-v` already decided it
fn apply_config_log_level(cli: &Cli, config: &Config) {
    if std::env::var_os("RUST_LOG").is_some() || cli.is_verbose() {
        return;
    }
    match config.log_filter() {
        Some(level) => log::set_max_level(level),
        None => warn!("Ignoring unknown log_level: {}", config.log_level()),
    }
}

fn build_dispatcher(config: &Config) -> Result<ToolDispatcher> {
    let directory = config.load_directory().context("Failed to load patient directory")?;
    let invoker = HttpCallInvoker::new(&config.api.base_url).context("Failed to create HTTP client")?;
    info!("Outbound call API: {}", invoker.endpoint());
    Ok(ToolDispatcher::new(Arc::new(directory), Arc::new(invoker)))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start tokio runtime")
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    match &cli.command {
        None | Some(Commands::Serve) => handle_serve_command(config),
        Some(Commands::Tools) => handle_tools_command(config),
        Some(Commands::Patients) => handle_patients_command(config),
        Some(Commands::Call { tool, args }) => handle_call_command(tool, args, config),
    }
}

fn handle_serve_command(config: &Config) -> Result<()> {
    let dispatcher = build_dispatcher(config)?;
    let server = Arc::new(McpServer::new(Arc::new(dispatcher)));
    runtime()?
        .block_on(server.run_stdio())
        .context("MCP server failed")?;
    Ok(())
}

fn handle_tools_command(config: &Config) -> Result<()> {
    let dispatcher = build_dispatcher(config)?;
    for tool in dispatcher.catalog().all() {
        println!("{}", tool.name.green().bold());
        println!("  {}", tool.description);
        for param in &tool.params {
            let marker = if param.required { "required".red() } else { "optional".dimmed() };
            print!("    {} ({})", param.name.cyan(), marker);
            if let Some(default) = &param.default {
                print!(" [default: {}]", default);
            }
            println!(" - {}", param.description);
        }
    }
    Ok(())
}

fn handle_patients_command(config: &Config) -> Result<()> {
    let directory = config.load_directory().context("Failed to load patient directory")?;
    for patient in directory.iter() {
        println!(
            "{}  {}  {}  {} ({})",
            patient.id.yellow(),
            patient.name.bold(),
            patient.phone_number,
            patient.department,
            patient.doctor
        );
    }
    Ok(())
}

fn handle_call_command(tool: &str, args: &str, config: &Config) -> Result<()> {
    let arguments: Value = serde_json::from_str(args).context("Failed to parse --args as JSON")?;
    let dispatcher = build_dispatcher(config)?;

    let response = runtime()?
        .block_on(dispatcher.call_tool(tool, &arguments))
        .context(format!("Tool call failed: {}", tool))?;

    if response.is_error() {
        eprintln!("{}", "Tool reported an error".red());
    }
    println!("{}", response.first_text());
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging before anything can report
    setup_logging(&cli);

    // Load configuration
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.apply_api_url_override(Some(url.clone()));
    }
    apply_config_log_level(&cli, &config);

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_installed_before_config_load() {
        let cli = Cli::try_parse_from(["outcall", "tools"]).unwrap();
        setup_logging(&cli);

        // Warnings from the config fallback chain must reach a real logger
        let metadata = log::Metadata::builder()
            .level(log::Level::Warn)
            .target("outcall::config")
            .build();
        assert!(log::max_level() >= LevelFilter::Warn);
        assert!(log::logger().enabled(&metadata));
    }
}
