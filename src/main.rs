//! Command line entry point for website_stack.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use website_stack::{config::StackConfig, deploy, WebsiteStack};

/// Synthesizes the CloudFormation stack for an IP-restricted static
/// website: S3 bucket, bucket policy, content sync, Route 53 alias record
/// and CloudFront distribution.
#[derive(Parser, Debug)]
#[command(name = "website_stack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "stack.toml")]
    config: PathBuf,

    /// Group identifier; overrides the configuration file and lets
    /// `synth`/`validate` run on defaults without one
    #[arg(short, long)]
    group: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize the template and deploy script
    Synth {
        /// Directory the template and script are written to
        #[arg(short, long, default_value = "./out")]
        out_dir: PathBuf,
    },

    /// Synthesize and discard, reporting only validation failures
    Validate,

    /// Show the effective configuration
    Config,

    /// Write a starter configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.debug)
        .init();

    match &cli.command {
        Commands::Synth { out_dir } => {
            let config = resolve_config(&cli)?;
            let synth = WebsiteStack::synthesize(&config)?;
            let (template, script) = deploy::write_synthesis(&synth, out_dir)?;
            println!("Synthesized stack '{}'", synth.stack_name);
            println!("  template: {}", template.display());
            println!("  deploy script: {}", script.display());
            Ok(())
        }

        Commands::Validate => {
            let config = resolve_config(&cli)?;
            let synth = WebsiteStack::synthesize(&config)?;
            println!(
                "Stack '{}' is valid: {} resources, {} outputs",
                synth.stack_name,
                synth.template.resources.len(),
                synth.template.outputs.len()
            );
            Ok(())
        }

        Commands::Config => {
            let config = resolve_config(&cli)?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }

        Commands::Init { force } => init_config(&cli.config, cli.group.as_deref(), *force),
    }
}

/// Config file when present, defaults when only a group was given.
fn resolve_config(cli: &Cli) -> anyhow::Result<StackConfig> {
    if cli.config.exists() {
        let mut config = StackConfig::load(&cli.config)
            .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
        if let Some(group) = &cli.group {
            config.group = group.clone();
            config.validate()?;
        }
        Ok(config)
    } else if let Some(group) = &cli.group {
        let config = StackConfig::for_group(group.clone());
        config.validate()?;
        Ok(config)
    } else {
        anyhow::bail!(
            "No configuration file at {} and no --group given. Run `init` first.",
            cli.config.display()
        );
    }
}

fn init_config(config_path: &PathBuf, group: Option<&str>, force: bool) -> anyhow::Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    let config = StackConfig::for_group(group.unwrap_or("team1"));
    std::fs::write(config_path, toml::to_string_pretty(&config)?)?;
    info!("Created configuration file: {}", config_path.display());
    println!("Created configuration file: {}", config_path.display());
    Ok(())
}
