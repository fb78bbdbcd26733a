//! Stepper TUI Entry Point
//!
//! Shows one progress widget per content file and drives them all from the
//! keyboard.
//!
//! # Usage
//!
//! ```bash
//! # Demo widgets
//! stepper-tui
//!
//! # One widget per file
//! stepper-tui --content checkout.md --content upload.txt
//!
//! # Slower animation, debug log
//! RUST_LOG=debug stepper-tui --tick-ms 40 --log-file /tmp/stepper.log
//! ```

use std::fs;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stepper_core::{load_config, load_config_from_path, ConfigOverrides, ProgressBus, WidgetBuilder};
use stepper_tui::{App, GlyphIcons};

/// Content shown when no `--content` is given
const DEMO_CONTENT: &[&str] = &[
    "Checkout\n\n1. Cart\n2. Shipping\n3. Payment\n4. Review",
    "- Plan\n- Build\n- Ship",
    "Syncing your library.\nStep keys move this bar ten points at a time.",
];

/// Stepper TUI - stepped progress widgets in the terminal
#[derive(Parser, Debug)]
#[command(name = "stepper-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Content file for one widget (repeatable)
    #[arg(long, value_name = "FILE")]
    content: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "STEPPER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Milliseconds between animation ticks
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Value moved per step by widgets without a step list
    #[arg(long, value_name = "POINTS")]
    plain_step_weight: Option<f64>,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: stepper-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    let mut app = build_app(&args)?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

/// Install the tracing subscriber, writing to `log_file` if one is given
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(file_layer)
        .init();
    Ok(())
}

/// Command-line values that override the loaded configuration
fn cli_overrides(args: &Args) -> ConfigOverrides {
    let mut overrides = ConfigOverrides::new();
    if let Some(ms) = args.tick_ms {
        overrides = overrides.with_tick_interval_ms(ms);
    }
    if let Some(weight) = args.plain_step_weight {
        overrides = overrides.with_plain_step_weight(weight);
    }
    overrides
}

/// Load config, read content, and build one widget per content block
fn build_app(args: &Args) -> Result<App> {
    let mut config = match &args.config {
        Some(path) => load_config_from_path(Some(path.clone())),
        None => load_config(),
    }
    .context("Failed to load configuration")?;

    cli_overrides(args)
        .apply(&mut config)
        .context("Invalid command-line configuration")?;

    tracing::info!(
        source = %config.source(),
        tick_ms = config.tick_interval.as_millis() as u64,
        plain_step_weight = config.plain_step_weight,
        "Configuration loaded"
    );

    let contents: Vec<String> = if args.content.is_empty() {
        DEMO_CONTENT.iter().map(|c| (*c).to_string()).collect()
    } else {
        args.content
            .iter()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read content file: {}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let bus = ProgressBus::new();
    let builder = WidgetBuilder::new(&bus)
        .config(config)
        .icons(Arc::new(GlyphIcons));
    let widgets = contents.iter().map(|c| builder.build(c)).collect();

    Ok(App::new(bus, widgets))
}
