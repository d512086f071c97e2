mod agents;
mod catalog;
mod cli;
mod config;
mod error;
mod kuma;
mod notify;
mod utils;
mod workflow;

use catalog::ServiceRecord;
use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        unsafe {
            std::env::set_var("LABOPS_VERBOSE", "1");
        }
    }

    let config_path = cli.config.as_deref().map(Path::new);

    let result = match cli.command {
        Commands::Add {
            name,
            url,
            description,
            why_selected,
            maintainer,
            no_git,
            no_notify,
        } => workflow::execute_add(
            &cli.path,
            config_path,
            &require_name(name),
            ServiceRecord {
                url,
                description,
                why_selected,
                maintainer,
            },
            no_git,
            no_notify,
        ),
        Commands::Update {
            name,
            url,
            description,
            why_selected,
            maintainer,
            no_git,
            no_notify,
        } => workflow::execute_update(
            &cli.path,
            config_path,
            &require_name(name),
            ServiceRecord {
                url,
                description,
                why_selected,
                maintainer,
            },
            no_git,
            no_notify,
        ),
        Commands::Remove {
            name,
            no_git,
            no_notify,
        } => workflow::execute_remove(&cli.path, config_path, &require_name(name), no_git, no_notify),
        Commands::Scan {
            routes,
            no_git,
            no_notify,
        } => workflow::execute_scan(
            &cli.path,
            config_path,
            routes.as_deref().map(Path::new),
            no_git,
            no_notify,
        ),
        Commands::Monitor { url, name } => {
            workflow::execute_monitor(&cli.path, config_path, &url, name.as_deref())
        }
        Commands::Check => workflow::execute_check(&cli.path, config_path),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn require_name(name: Option<String>) -> String {
    match name {
        Some(name) => name,
        None => {
            eprintln!(
                "{} --name is required for add/update/remove actions",
                "Error:".red().bold()
            );
            process::exit(1);
        }
    }
}
