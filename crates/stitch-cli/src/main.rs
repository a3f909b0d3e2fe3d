//! Stitch - UI component installer
//!
//! Usage:
//!   stitch init           # Set up stitch.toml in the current project
//!   stitch add button     # Add components (and their dependencies)
//!   stitch list           # Show available components

mod interactive;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stitch_core::config::{CONFIG_FILE, ProjectConfig};
use stitch_core::install::{ComponentInstaller, InstallOptions};
use stitch_core::registry::{RegistryClient, npm_dependencies, resolve_all};
use stitch_core::status::collect_status;
use stitch_core::tracker::InstallTracker;

use crate::interactive::{confirm, init_prompts, select_components};

#[derive(Parser)]
#[command(name = "stitch")]
#[command(about = "Add predesigned UI components to your project", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize stitch in your project
    Init {
        /// Skip prompts and use defaults
        #[arg(short, long)]
        yes: bool,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Add components to your project
    Add {
        /// Component names to add
        components: Vec<String>,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,

        /// Overwrite existing files
        #[arg(short, long)]
        overwrite: bool,

        /// Install all available components
        #[arg(short, long)]
        all: bool,
    },

    /// List available components
    #[command(alias = "ls")]
    List {
        /// Show only installed components
        #[arg(short, long)]
        installed: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing; the console UI itself goes through println
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stitch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { yes, force } => run_init(yes, force),
        Commands::Add {
            components,
            yes,
            overwrite,
            all,
        } => run_add(components, yes, overwrite, all),
        Commands::List { installed } => run_list(installed),
    }
}

fn project_root() -> Result<PathBuf> {
    std::env::current_dir().context("Cannot determine current directory")
}

fn run_init(yes: bool, force: bool) -> Result<()> {
    let project_root = project_root()?;

    println!();
    println!("{}", style("Initializing stitch").bold());
    println!();

    if !project_root.join("package.json").exists() {
        bail!("No package.json found. Please run this in a project directory.");
    }

    if ProjectConfig::exists(&project_root) && !force {
        let overwrite = confirm(&format!("{CONFIG_FILE} already exists. Overwrite?"), false)?;
        if !overwrite {
            println!("Initialization cancelled.");
            return Ok(());
        }
    }

    let mut config = ProjectConfig::default();
    if !yes {
        let answers = init_prompts(&config)?;
        config.component_path = answers.component_path;
        config.style.strategy = answers.strategy;
        config.storybook.enabled = answers.storybook;
        config.storybook.auto_generate = answers.storybook;
    }

    config.save(&project_root)?;
    println!("{} Created {}", style("✓").green(), CONFIG_FILE);

    let component_dir = config.component_dir(&project_root);
    std::fs::create_dir_all(&component_dir)
        .with_context(|| format!("Failed to create {}", component_dir.display()))?;
    println!("{} Created {}", style("✓").green(), config.component_path);

    let installer = ComponentInstaller::new(config.clone(), project_root.clone());
    if installer.install_utils()? {
        println!(
            "{} Created {}",
            style("✓").green(),
            config.lib_dir(&project_root).join("utils.ts").display()
        );
    }

    std::fs::create_dir_all(project_root.join(".stitch"))
        .context("Failed to create .stitch directory")?;

    println!();
    println!("{} Stitch initialized successfully!", style("✓").green());
    println!();
    println!("{}", style("Next steps:").bold());
    println!();
    println!("  1. Install required dependencies:");
    println!(
        "  {}",
        style("$ npm install clsx tailwind-merge class-variance-authority").cyan()
    );
    println!();
    println!("  2. Add components:");
    println!("  {}", style("$ stitch add button").cyan());
    println!();

    Ok(())
}

fn run_add(components: Vec<String>, yes: bool, overwrite: bool, all: bool) -> Result<()> {
    let project_root = project_root()?;

    if !ProjectConfig::exists(&project_root) {
        bail!("No {CONFIG_FILE} found. Run `stitch init` first.");
    }
    let config = ProjectConfig::load(&project_root)?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let client = RegistryClient::new(config.registry.as_ref())?;

    println!("Fetching component registry...");
    let registry = runtime.block_on(client.fetch_registry())?;
    let available = registry.available_components();
    let tracker = InstallTracker::new(project_root.clone());

    let mut requested = if all { available.clone() } else { components };

    // No names on the command line: offer an interactive selection.
    if requested.is_empty() {
        let statuses = collect_status(&registry, &tracker);
        requested = select_components(&statuses)?;
        if requested.is_empty() {
            println!("No components selected.");
            return Ok(());
        }
    }

    let unknown: Vec<String> = requested
        .iter()
        .filter(|&name| !available.contains(name))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        eprintln!(
            "{} Unknown components: {}",
            style("✖").red(),
            unknown.join(", ")
        );
        eprintln!();
        eprintln!("Available components:");
        for name in &available {
            eprintln!("  {} {}", style("•").dim(), name);
        }
        std::process::exit(1);
    }

    let to_install = resolve_all(&requested, &registry);

    if !yes && to_install.len() > requested.len() {
        println!(
            "Installing {} components (including dependencies):",
            to_install.len()
        );
        for name in &to_install {
            println!("  {} {}", style("•").dim(), name);
        }
        println!();
        if !confirm("Continue?", true)? {
            println!("Installation cancelled.");
            return Ok(());
        }
    }

    // Components assume the shared utility exists.
    let installer = ComponentInstaller::new(config.clone(), project_root.clone());
    if installer.install_utils()? {
        println!(
            "{} Created {}",
            style("✓").green(),
            config.lib_dir(&project_root).join("utils.ts").display()
        );
    }

    println!();
    println!(
        "{}",
        style(format!("Installing {} component(s)...", to_install.len())).bold()
    );
    println!();

    let mut installed_count = 0;
    for name in &to_install {
        let Some(component) = registry.get_component(name) else {
            continue;
        };

        let options = InstallOptions { overwrite };
        match runtime.block_on(installer.install_component(name, component, &client, &options)) {
            Ok(files) if !files.is_empty() => {
                println!("{} Installed {}", style("✓").green(), name);
                for file in &files {
                    println!("  {} {}", style("→").dim(), file.display());
                }
                installed_count += 1;
            }
            Ok(_) => {
                println!("{} {} (no new files)", style("ℹ").blue(), name);
            }
            // One component failing does not abort the batch.
            Err(err) => {
                eprintln!("{} Failed to install {}: {:#}", style("✖").red(), name, err);
            }
        }
    }

    println!();
    println!(
        "{} Installed {} component(s)",
        style("✓").green(),
        installed_count
    );

    let npm = npm_dependencies(&to_install, &registry);
    if !npm.dependencies.is_empty() || !npm.dev_dependencies.is_empty() {
        println!();
        println!("{}", style("Install required dependencies:").bold());
        println!();
        if !npm.dependencies.is_empty() {
            println!(
                "  {}",
                style(format!("$ npm install {}", npm.dependencies.join(" "))).cyan()
            );
        }
        if !npm.dev_dependencies.is_empty() {
            println!(
                "  {}",
                style(format!("$ npm install -D {}", npm.dev_dependencies.join(" "))).cyan()
            );
        }
    }
    println!();

    Ok(())
}

fn run_list(installed_only: bool) -> Result<()> {
    let project_root = project_root()?;
    let config = ProjectConfig::load(&project_root)?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let client = RegistryClient::new(config.registry.as_ref())?;

    println!("Fetching component registry...");
    let registry = runtime.block_on(client.fetch_registry())?;

    let tracker = InstallTracker::new(project_root);
    let statuses = collect_status(&registry, &tracker);

    let installed_count = statuses.iter().filter(|s| s.installed).count();
    let total_count = statuses.len();

    let filtered: Vec<_> = statuses
        .into_iter()
        .filter(|s| !installed_only || s.installed)
        .collect();

    if filtered.is_empty() {
        if installed_only {
            println!("No components installed yet.");
            println!();
            println!("Run `stitch add` to install components.");
        } else {
            println!("No components available in registry.");
        }
        return Ok(());
    }

    println!();
    println!("{}", style("Available Components").bold());
    println!();

    for status in &filtered {
        let marker = if status.installed {
            style("✓").green().to_string()
        } else {
            style("○").dim().to_string()
        };
        let version = status
            .version
            .as_deref()
            .map(|v| style(format!(" v{v}")).dim().to_string())
            .unwrap_or_default();
        let description = status
            .description
            .as_deref()
            .map(|d| style(format!(" - {d}")).dim().to_string())
            .unwrap_or_default();

        println!("  {marker} {}{version}{description}", status.name);
    }

    println!();
    println!(
        "{}",
        style(format!(
            "{installed_count} installed, {} available",
            total_count - installed_count
        ))
        .dim()
    );

    if installed_count < total_count {
        println!();
        println!("{}", style("Run `stitch add <component>` to install").dim());
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_with_components_parses() {
        let args = ["stitch", "add", "button", "card"];

        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Add { components, .. } => assert_eq!(components, ["button", "card"]),
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn add_flags_parse() {
        let args = ["stitch", "add", "-y", "-o", "-a"];

        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Add {
                yes,
                overwrite,
                all,
                components,
            } => {
                assert!(yes && overwrite && all);
                assert!(components.is_empty());
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn list_alias_parses() {
        let args = ["stitch", "ls", "--installed"];

        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::List { installed } => assert!(installed),
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn init_flags_parse() {
        let args = ["stitch", "init", "--yes", "--force"];

        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Init { yes, force } => assert!(yes && force),
            _ => panic!("expected init command"),
        }
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        let args = ["stitch"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
