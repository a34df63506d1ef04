use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use nui_menu::config::{self, Config};
use nui_menu::driver::{self, Driver};
use nui_menu::logging;
use nui_menu::session::UiSession;
use nui_menu::transport::{HttpTransport, StdoutTransport, Transport};

/// Command-line arguments accepted by the `nui-menu` binary.
#[derive(Parser, Debug)]
#[command(
    name = "nui-menu",
    version,
    about = "Overlay menu and input popup driven by JSONL on stdin"
)]
struct CliArgs {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file (default: $NUI_MENU_CONFIG or ~/.nui-menu/config.json)"
    )]
    config: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "NAME",
        env = "NUI_MENU_RESOURCE",
        help = "Host resource name used in callback URLs (default: from config)"
    )]
    resource_name: Option<String>,
    #[arg(
        long,
        help = "Write callbacks to stdout as JSONL instead of posting them (default: disabled)"
    )]
    dry_run: bool,
    #[arg(
        long,
        help = "Emit the active surface's markup after every command (default: disabled)"
    )]
    print_markup: bool,
    #[arg(
        long,
        value_name = "DIR",
        help = "Directory for the JSONL log file (default: ~/.nui-menu/logs)"
    )]
    log_dir: Option<PathBuf>,
}

fn resolve_config(args: &CliArgs) -> Config {
    let path = args
        .config
        .as_ref()
        .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).as_ref()))
        .unwrap_or_else(config::default_config_path);
    let mut config = config::load_config_from(&path);
    if let Some(name) = args.resource_name.as_ref().filter(|n| !n.trim().is_empty()) {
        config.resource_name = name.clone();
    }
    config
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = resolve_config(&args);

    let log_dir = args.log_dir.clone().or_else(|| config.log_dir.clone());
    let _guard = logging::init(log_dir.as_deref());

    info!(
        resource = %config.resource_name,
        callback_base = %config.callback_base_url(),
        busy_policy = ?config.busy_policy,
        dry_run = args.dry_run,
        "nui-menu starting"
    );

    let transport: Box<dyn Transport> = if args.dry_run {
        Box::new(StdoutTransport::new(&config))
    } else {
        Box::new(HttpTransport::new(&config).context("Failed to start callback transport")?)
    };

    let session = UiSession::new(config, transport);
    let mut driver = Driver::new(session, args.print_markup);
    driver.run(driver::start_stdin_listener());

    info!(event_type = "app_lifecycle", action = "stopped", "nui-menu exiting");
    Ok(())
}
