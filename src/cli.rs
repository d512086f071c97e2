use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "labops",
    about = "Homelab Ops - service catalog automation with docs commits, Discord notifications, and uptime monitors",
    version,
    author
)]
pub struct Cli {
    /// Path to the documentation project (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub path: String,

    /// Path to the automation configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a service section to the catalog
    Add {
        /// Service name (the catalog heading)
        #[arg(long)]
        name: Option<String>,

        /// Service URL
        #[arg(long)]
        url: Option<String>,

        /// Service description
        #[arg(long)]
        description: Option<String>,

        /// Why this service was selected
        #[arg(long)]
        why_selected: Option<String>,

        /// Service maintainer
        #[arg(long)]
        maintainer: Option<String>,

        /// Skip Git operations (don't commit or push)
        #[arg(long)]
        no_git: bool,

        /// Skip the Discord notification
        #[arg(long)]
        no_notify: bool,
    },

    /// Update an existing service section in the catalog
    Update {
        /// Service name (the catalog heading)
        #[arg(long)]
        name: Option<String>,

        /// Service URL
        #[arg(long)]
        url: Option<String>,

        /// Service description
        #[arg(long)]
        description: Option<String>,

        /// Why this service was selected
        #[arg(long)]
        why_selected: Option<String>,

        /// Service maintainer
        #[arg(long)]
        maintainer: Option<String>,

        /// Skip Git operations (don't commit or push)
        #[arg(long)]
        no_git: bool,

        /// Skip the Discord notification
        #[arg(long)]
        no_notify: bool,
    },

    /// Remove a service section from the catalog
    Remove {
        /// Service name (the catalog heading)
        #[arg(long)]
        name: Option<String>,

        /// Skip Git operations (don't commit or push)
        #[arg(long)]
        no_git: bool,

        /// Skip the Discord notification
        #[arg(long)]
        no_notify: bool,
    },

    /// Scan IngressRoute manifests and add discovered services
    Scan {
        /// Directory holding the cluster manifests
        #[arg(long, value_name = "DIR")]
        routes: Option<String>,

        /// Skip Git operations (don't commit or push)
        #[arg(long)]
        no_git: bool,

        /// Skip the Discord notification
        #[arg(long)]
        no_notify: bool,
    },

    /// Probe a service and set up an Uptime Kuma monitor for it
    Monitor {
        /// URL to monitor
        #[arg(long)]
        url: String,

        /// Friendly name for the monitor (defaults to the URL host)
        #[arg(long)]
        name: Option<String>,
    },

    /// Verify environment variables, webhook, and dashboard credentials
    Check,
}
