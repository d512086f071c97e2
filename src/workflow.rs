use crate::agents::{
    CatalogEditor, CommitOutcome, EditOutcome, ProjectInfo, ProjectScannerAgent, RouteScannerAgent,
    VersionControlAgent,
};
use crate::catalog::ServiceRecord;
use crate::config::{
    AutomationConfig, KUMA_PASSWORD_ENV, KUMA_USERNAME_ENV, WEBHOOK_ENV,
};
use crate::error::{LabopsError, Result};
use crate::kuma::{MonitorSetup, MonitorSpec, UptimeKumaClient, probe_service};
use crate::notify::DiscordNotifier;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use jiff::Zoned;
use std::path::Path;

/// Add a new service section to the catalog, then commit, notify, monitor.
pub fn execute_add<P: AsRef<Path>>(
    project_path: P,
    config_path: Option<&Path>,
    name: &str,
    record: ServiceRecord,
    no_git: bool,
    no_notify: bool,
) -> Result<()> {
    let project_path = project_path.as_ref();
    println!("{}", "Adding service to the catalog...".cyan().bold());

    let config = AutomationConfig::load(project_path, config_path)?;

    println!("\n{}", "1. Validating project structure...".yellow());
    let scanner = ProjectScannerAgent::new(project_path);
    let project_info = scanner.validate(&config)?;
    println!("{}", "✓ Project structure is valid".green());

    println!("\n{}", "2. Updating service catalog...".yellow());
    let editor = CatalogEditor::new(&project_info.catalog_path);
    if editor.add_service(name, &record)? == EditOutcome::AlreadyExists {
        return Err(LabopsError::CatalogEdit(format!(
            "Service {name} already exists in catalog. Use `labops update` to modify."
        )));
    }
    println!("{}", format!("✓ Service catalog updated for {name}").green());

    commit_step(3, &config, &project_info, name, no_git);
    notify_step(4, &config, &added_message(name, &record), no_notify);
    if let Some(url) = http_url(&record) {
        monitor_step(5, &config, name, url);
    }

    println!("\n{}", "✨ Service added successfully!".green().bold());
    Ok(())
}

/// Overwrite an existing service section, then commit and notify.
pub fn execute_update<P: AsRef<Path>>(
    project_path: P,
    config_path: Option<&Path>,
    name: &str,
    record: ServiceRecord,
    no_git: bool,
    no_notify: bool,
) -> Result<()> {
    let project_path = project_path.as_ref();
    println!("{}", "Updating service in the catalog...".cyan().bold());

    let config = AutomationConfig::load(project_path, config_path)?;

    println!("\n{}", "1. Validating project structure...".yellow());
    let scanner = ProjectScannerAgent::new(project_path);
    let project_info = scanner.validate(&config)?;
    println!("{}", "✓ Project structure is valid".green());

    println!("\n{}", "2. Updating service catalog...".yellow());
    let editor = CatalogEditor::new(&project_info.catalog_path);
    if editor.update_service(name, &record)? == EditOutcome::NotFound {
        return Err(LabopsError::CatalogEdit(format!(
            "Service {name} not found in catalog. Use `labops add` to create it."
        )));
    }
    println!("{}", format!("✓ Service catalog updated for {name}").green());

    commit_step(3, &config, &project_info, name, no_git);
    notify_step(4, &config, &updated_message(name, &record), no_notify);
    if let Some(url) = http_url(&record) {
        monitor_step(5, &config, name, url);
    }

    println!("\n{}", "✨ Service updated successfully!".green().bold());
    Ok(())
}

/// Remove a service section, then commit and notify.
pub fn execute_remove<P: AsRef<Path>>(
    project_path: P,
    config_path: Option<&Path>,
    name: &str,
    no_git: bool,
    no_notify: bool,
) -> Result<()> {
    let project_path = project_path.as_ref();
    println!("{}", "Removing service from the catalog...".cyan().bold());

    let config = AutomationConfig::load(project_path, config_path)?;

    println!("\n{}", "1. Validating project structure...".yellow());
    let scanner = ProjectScannerAgent::new(project_path);
    let project_info = scanner.validate(&config)?;
    println!("{}", "✓ Project structure is valid".green());

    println!("\n{}", "2. Updating service catalog...".yellow());
    let editor = CatalogEditor::new(&project_info.catalog_path);
    if editor.remove_service(name)? == EditOutcome::NotFound {
        return Err(LabopsError::CatalogEdit(format!(
            "Service {name} not found in catalog"
        )));
    }
    println!("{}", format!("✓ Service {name} removed from catalog").green());

    commit_step(3, &config, &project_info, name, no_git);
    notify_step(4, &config, &removed_message(name), no_notify);

    println!("\n{}", "✨ Service removed successfully!".green().bold());
    Ok(())
}

/// Discover services from IngressRoute manifests and add the new ones.
pub fn execute_scan<P: AsRef<Path>>(
    project_path: P,
    config_path: Option<&Path>,
    routes_override: Option<&Path>,
    no_git: bool,
    no_notify: bool,
) -> Result<()> {
    let project_path = project_path.as_ref();
    println!(
        "{}",
        "Scanning cluster manifests for services...".cyan().bold()
    );

    let config = AutomationConfig::load(project_path, config_path)?;

    println!("\n{}", "1. Validating project structure...".yellow());
    let scanner = ProjectScannerAgent::new(project_path);
    let project_info = scanner.validate(&config)?;
    println!("{}", "✓ Project structure is valid".green());

    println!(
        "\n{}",
        "2. Discovering services from IngressRoute manifests...".yellow()
    );
    let routes_dir = routes_override
        .map(Path::to_path_buf)
        .or_else(|| config.discovery.routes_dir.clone())
        .ok_or_else(|| {
            LabopsError::Config(
                "No routes directory configured. Pass --routes or set discovery.routes_dir."
                    .to_string(),
            )
        })?;

    let discovered = RouteScannerAgent::new(&routes_dir).scan()?;
    if discovered.is_empty() {
        println!("{}", "No services discovered".yellow());
        return Ok(());
    }

    println!("   Found {} candidate service(s):", discovered.len());
    for service in &discovered {
        println!(
            "   • {} ({})",
            service.name.bright_cyan(),
            service.url.dimmed()
        );
    }

    println!("\n{}", "3. Adding discovered services to the catalog...".yellow());
    let editor = CatalogEditor::new(&project_info.catalog_path);

    let pb = ProgressBar::new(discovered.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  [{bar:40}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut added = Vec::new();
    let mut skipped = Vec::new();
    for service in &discovered {
        pb.set_message(format!("Adding {}", service.name));

        let record = ServiceRecord {
            url: Some(service.url.clone()),
            description: Some(format!(
                "Kubernetes service in {} namespace",
                service.namespace
            )),
            ..ServiceRecord::default()
        };

        match editor.add_service(&service.name, &record)? {
            EditOutcome::Applied => added.push(service),
            _ => skipped.push(service),
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    for service in &skipped {
        println!(
            "   • {} already in catalog, skipped",
            service.name.dimmed()
        );
    }
    println!(
        "{}",
        format!("✓ Added {} new service(s)", added.len()).green()
    );

    if added.is_empty() {
        println!("\n{}", "✨ Catalog already up to date".green().bold());
        return Ok(());
    }

    let names: Vec<&str> = added.iter().map(|s| s.name.as_str()).collect();
    commit_step(4, &config, &project_info, &names.join(", "), no_git);
    notify_step(5, &config, &scan_message(&names), no_notify);

    println!("\n{}", "6. Setting up Uptime Kuma monitors...".yellow());
    for service in &added {
        attempt_and_report_monitor(&config, &service.name, &service.url);
    }

    println!("\n{}", "✨ Scan completed successfully!".green().bold());
    Ok(())
}

/// Probe a service, print its monitor configuration, attempt the dashboard
/// API, and fall back to manual setup instructions.
pub fn execute_monitor<P: AsRef<Path>>(
    project_path: P,
    config_path: Option<&Path>,
    url: &str,
    name: Option<&str>,
) -> Result<()> {
    let project_path = project_path.as_ref();
    println!("{}", "Uptime Kuma monitor setup...".cyan().bold());

    let config = AutomationConfig::load(project_path, config_path)?;

    let monitor_name = match name {
        Some(name) => name.to_string(),
        None => monitor_name_from_url(url)?,
    };
    let spec = MonitorSpec::http(&monitor_name, url);

    println!("\n{}", "1. Testing service accessibility...".yellow());
    let report = probe_service(url)?;
    if !report.is_ok() {
        return Err(LabopsError::MonitorSetup(format!(
            "Service returned status: {}",
            report.status
        )));
    }
    println!(
        "{}",
        format!("✓ Service is accessible - Status: {}", report.status).green()
    );
    println!("   Response size: {} bytes", report.body_bytes);
    if report.looks_like_docs {
        println!("   Content validation: documentation content detected");
    } else {
        println!(
            "   {}",
            "⚠ Content validation: expected documentation content not found".yellow()
        );
    }

    println!("\n{}", "2. Monitor configuration:".yellow());
    println!("{}", serde_json::to_string_pretty(&spec)?);

    println!("\n{}", "3. Configuring monitor via dashboard API...".yellow());
    match attempt_monitor(&config, &spec) {
        MonitorAttempt::Configured(endpoint) => {
            println!(
                "{}",
                format!("✓ Monitor created via {endpoint}").green()
            );
        }
        MonitorAttempt::NotConfigured => {
            println!(
                "{}",
                "Uptime Kuma credentials not configured, skipping API attempt".yellow()
            );
            println!("\n{}", "4. Manual setup instructions:".yellow());
            print_manual_instructions(config.uptime_kuma.url.as_deref(), &spec);
        }
        MonitorAttempt::ManualSetupRequired => {
            println!("{}", "Dashboard API attempts exhausted".yellow());
            println!("\n{}", "4. Manual setup instructions:".yellow());
            print_manual_instructions(config.uptime_kuma.url.as_deref(), &spec);
        }
    }

    notify_step(5, &config, &monitor_message(&spec, &config), false);

    println!("\n{}", "✨ Monitor setup completed!".green().bold());
    Ok(())
}

/// Verify environment variables, webhook connectivity, and dashboard
/// credentials. Any failed check fails the command.
pub fn execute_check<P: AsRef<Path>>(project_path: P, config_path: Option<&Path>) -> Result<()> {
    let project_path = project_path.as_ref();
    println!("{}", "Homelab automation self-check...".cyan().bold());

    let config = AutomationConfig::load(project_path, config_path)?;
    let mut results: Vec<(&str, bool)> = Vec::new();

    println!("\n{}", "1. Checking environment variables...".yellow());
    let mut env_ok = true;
    for (var, secret) in [
        (WEBHOOK_ENV, true),
        (KUMA_USERNAME_ENV, false),
        (KUMA_PASSWORD_ENV, true),
    ] {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => {
                if secret {
                    println!("   ✓ {var}: [SET]");
                } else {
                    println!("   ✓ {var}: {value}");
                }
            }
            _ => {
                println!("   {}", format!("✗ {var}: NOT SET").red());
                env_ok = false;
            }
        }
    }
    results.push(("Environment variables", env_ok));

    println!("\n{}", "2. Testing Discord webhook...".yellow());
    let webhook_ok = match config.discord.webhook_url.as_deref() {
        Some(webhook_url) => {
            println!("   Target channel: {}", config.discord.channel);
            match DiscordNotifier::new(webhook_url).and_then(|n| n.post(&check_message())) {
                Ok(()) => {
                    println!("{}", "✓ Discord notification sent".green());
                    true
                }
                Err(e) => {
                    println!("   {}", format!("✗ {e}").red());
                    false
                }
            }
        }
        None => {
            println!("   {}", "✗ Discord webhook URL not found".red());
            false
        }
    };
    results.push(("Discord webhook", webhook_ok));

    println!("\n{}", "3. Checking Uptime Kuma credentials...".yellow());
    let kuma_ok = match (
        config.uptime_kuma.username.as_deref(),
        config.uptime_kuma.password.as_deref(),
    ) {
        (Some(username), Some(_)) => {
            println!("   ✓ Credentials configured for user: {username}");
            true
        }
        _ => {
            println!("   {}", "✗ Uptime Kuma credentials not configured".red());
            false
        }
    };
    results.push(("Uptime Kuma credentials", kuma_ok));

    println!("\n{}", "Check Summary:".cyan().bold());
    for (check, ok) in &results {
        let status = if *ok {
            "✓ PASS".green()
        } else {
            "✗ FAIL".red()
        };
        println!("  {status} {check}");
    }

    if results.iter().all(|(_, ok)| *ok) {
        println!(
            "\n{}",
            "✨ All checks passed! Automation system is ready."
                .green()
                .bold()
        );
        Ok(())
    } else {
        Err(LabopsError::Config(
            "Some checks failed. Please review the configuration.".to_string(),
        ))
    }
}

fn commit_step(
    step: usize,
    config: &AutomationConfig,
    project_info: &ProjectInfo,
    service_name: &str,
    no_git: bool,
) {
    if !config.documentation.auto_commit || no_git {
        println!(
            "\n{}",
            format!("{step}. Auto-commit disabled, skipping Git operations").yellow()
        );
        return;
    }
    if !project_info.has_git {
        println!(
            "\n{}",
            format!("{step}. Git repository not detected, skipping commit").yellow()
        );
        return;
    }

    println!(
        "\n{}",
        format!("{step}. Committing catalog changes...").yellow()
    );
    let message = config.documentation.commit_message(service_name);

    let result = VersionControlAgent::new(&project_info.project_path)
        .and_then(|agent| agent.commit_and_push(&project_info.catalog_path, &message));

    match result {
        Ok(CommitOutcome::Committed) => println!(
            "{}",
            "✓ Documentation changes committed and pushed".green()
        ),
        Ok(CommitOutcome::NothingToCommit) => println!("{}", "✓ No changes to commit".green()),
        Err(e) => println!("{}", format!("⚠ Git operation failed: {e}").red()),
    }
}

fn notify_step(step: usize, config: &AutomationConfig, message: &str, no_notify: bool) {
    if no_notify {
        println!(
            "\n{}",
            format!("{step}. Notifications disabled, skipping Discord").yellow()
        );
        return;
    }

    println!(
        "\n{}",
        format!("{step}. Sending Discord notification...").yellow()
    );
    let Some(webhook_url) = config.discord.webhook_url.as_deref() else {
        println!(
            "{}",
            "Discord webhook URL not configured, skipping notification".yellow()
        );
        return;
    };

    match DiscordNotifier::new(webhook_url).and_then(|n| n.post(message)) {
        Ok(()) => println!("{}", "✓ Discord notification sent".green()),
        Err(e) => println!("{}", format!("⚠ {e}").red()),
    }
}

fn monitor_step(step: usize, config: &AutomationConfig, name: &str, url: &str) {
    println!(
        "\n{}",
        format!("{step}. Setting up Uptime Kuma monitor...").yellow()
    );
    attempt_and_report_monitor(config, name, url);
}

fn attempt_and_report_monitor(config: &AutomationConfig, name: &str, url: &str) {
    let spec = MonitorSpec::http(name, url);
    match attempt_monitor(config, &spec) {
        MonitorAttempt::Configured(endpoint) => println!(
            "{}",
            format!("✓ Monitor created for {name} via {endpoint}").green()
        ),
        MonitorAttempt::NotConfigured => println!(
            "{}",
            "Uptime Kuma configuration incomplete, skipping monitor setup".yellow()
        ),
        MonitorAttempt::ManualSetupRequired => println!(
            "{}",
            format!(
                "⚠ Dashboard API attempts failed; run `labops monitor --url {url}` for manual setup"
            )
            .yellow()
        ),
    }
}

enum MonitorAttempt {
    Configured(String),
    ManualSetupRequired,
    NotConfigured,
}

fn attempt_monitor(config: &AutomationConfig, spec: &MonitorSpec) -> MonitorAttempt {
    let Some((base_url, username, password)) = config.uptime_kuma.credentials() else {
        return MonitorAttempt::NotConfigured;
    };

    match UptimeKumaClient::new(base_url, username, password) {
        Ok(client) => match client.try_create_monitor(spec) {
            MonitorSetup::Configured { endpoint } => MonitorAttempt::Configured(endpoint),
            MonitorSetup::ManualSetupRequired => MonitorAttempt::ManualSetupRequired,
        },
        Err(e) => {
            println!("{}", format!("⚠ {e}").red());
            MonitorAttempt::ManualSetupRequired
        }
    }
}

fn print_manual_instructions(base_url: Option<&str>, spec: &MonitorSpec) {
    println!("{}", "=".repeat(50));
    println!(
        "1. Access Uptime Kuma at: {}",
        base_url.unwrap_or("your dashboard URL")
    );
    println!("2. Login with your credentials");
    println!("3. Click 'Add New Monitor'");
    println!("4. Configure with the following settings:");
    println!("   - Monitor Type: HTTP(s)");
    println!("   - Friendly Name: {}", spec.name);
    println!("   - URL: {}", spec.url);
    println!("   - Heartbeat Interval: {} seconds", spec.interval);
    println!("   - Retries: {}", spec.max_retries);
    println!("   - HTTP Method: GET");
    println!("   - Accepted Status Codes: 200-299");
    println!("5. Click 'Save'");
}

fn monitor_name_from_url(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url)
        .map_err(|_| LabopsError::Config(format!("Invalid monitor URL: {url}")))?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| LabopsError::Config(format!("Monitor URL has no host: {url}")))
}

fn http_url(record: &ServiceRecord) -> Option<&str> {
    record.url.as_deref().filter(|url| url.starts_with("http"))
}

fn timestamp() -> String {
    Zoned::now().strftime("%Y-%m-%d %H:%M:%S").to_string()
}

fn added_message(name: &str, record: &ServiceRecord) -> String {
    format!(
        "🚀 **New Service Deployed!**\n\n\
         **Service**: {name}\n\
         **URL**: {}\n\
         **Description**: {}\n\
         **Timestamp**: {}\n\n\
         Service catalog has been updated automatically! 📖",
        record.url.as_deref().unwrap_or("-"),
        record.description.as_deref().unwrap_or("-"),
        timestamp()
    )
}

fn updated_message(name: &str, record: &ServiceRecord) -> String {
    format!(
        "🔄 **Service Updated!**\n\n\
         **Service**: {name}\n\
         **Description**: {}\n\
         **Timestamp**: {}\n\n\
         Documentation has been updated! 📖",
        record.description.as_deref().unwrap_or("-"),
        timestamp()
    )
}

fn removed_message(name: &str) -> String {
    format!(
        "🗑️ **Service Removed**\n\n\
         **Service**: {name}\n\
         **Timestamp**: {}\n\n\
         Service has been removed from the catalog.",
        timestamp()
    )
}

fn scan_message(names: &[&str]) -> String {
    format!(
        "🚀 **New Services Discovered!**\n\n\
         **Services**: {}\n\
         **Timestamp**: {}\n\n\
         Service catalog has been updated automatically! 📖",
        names.join(", "),
        timestamp()
    )
}

fn monitor_message(spec: &MonitorSpec, config: &AutomationConfig) -> String {
    format!(
        "📊 **Uptime Kuma Monitor Ready**\n\n\
         **Service**: {}\n\
         **Status**: Accessible and ready for monitoring\n\
         **Access**: {}\n\n\
         The service is ready for automated uptime monitoring! 📈",
        spec.name,
        config
            .uptime_kuma
            .url
            .as_deref()
            .unwrap_or("your dashboard URL"),
    )
}

fn check_message() -> String {
    format!(
        "🧪 **Automation System Test**\n\n\
         **Status**: Environment setup complete!\n\
         **Timestamp**: {}\n\n\
         The homelab automation system is ready! 🤖",
        timestamp()
    )
}
