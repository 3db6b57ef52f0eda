//! gridstash - a grid inventory driven by mouse clicks
//!
//! Left click deposits the held stack, right click deposits one item or picks
//! up half a stack. `--headless` replays a click script instead of opening a window.

mod app;
mod click_script;
mod config;
mod headless;

use anyhow::Result;
use app::{AppAction, InventoryApp};
use clap::Parser;
use config::InventoryConfig;
use std::path::PathBuf;
use tracing::info;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser, Debug)]
#[command(author, version, about = "Grid inventory with a cursor-held stack", long_about = None)]
struct Cli {
    /// Inventory configuration file (TOML)
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Replay a click script without opening a window, then print the inventory
    #[arg(long)]
    headless: bool,

    /// Click script (JSON) to replay in headless mode
    #[arg(long, requires = "headless")]
    script: Option<PathBuf>,

    /// Write one JSON line per applied script step
    #[arg(long, requires = "headless")]
    event_log: Option<PathBuf>,

    /// Stop the headless run after this many ticks
    #[arg(long, requires = "headless")]
    max_ticks: Option<u64>,

    /// Override the atlas image path from the config
    #[arg(long)]
    atlas: Option<PathBuf>,
}

fn main() -> Result<()> {
    // WARN by default (can be overridden via RUST_LOG); stdout stays free for the inventory dump
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting gridstash v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let mut config = InventoryConfig::load_from_path(&cli.config);
    if let Some(atlas) = cli.atlas {
        config.atlas.path = atlas;
    }
    let inventory = config.build_inventory();

    if cli.headless {
        let Some(script) = cli.script else {
            anyhow::bail!("--headless requires --script");
        };
        let inventory = headless::run(headless::HeadlessConfig {
            inventory,
            layout: config.layout,
            script,
            event_log: cli.event_log,
            max_ticks: cli.max_ticks,
        })?;
        println!("{inventory}");
        return Ok(());
    }

    let atlas = app::load_atlas(&config.atlas);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = InventoryApp::new(&event_loop, &config, inventory, atlas)?;

    event_loop.run(move |event, elwt| {
        if let AppAction::Quit = app.handle_event(&event) {
            info!("Quitting");
            elwt.exit();
        }
    })?;

    info!("gridstash shutting down");
    Ok(())
}
