//! flick-sheet - plays the panel and row gesture demo
//!
//! Features:
//! - 60fps frame timer driving every settle animation
//! - Scripted touches delivered on one-shot timers
//! - Rendered frames traced to the log (run with --debug and RUST_LOG=trace)

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use flick_sheet::demo::{self, DemoHost, Scenario};
use flick_sheet::SheetConfig;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "flick-sheet")]
#[command(about = "Drag-to-dismiss panels and swipe-to-reveal rows, scripted demo", long_about = None)]
struct Args {
    /// Config file (default: ~/.config/flick-sheet/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(short, long)]
    debug: bool,

    /// Which part of the demo to play
    #[arg(short, long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// Everything the event loop callbacks touch
struct LoopState {
    host: DemoHost,
    /// Script steps not yet delivered
    remaining: usize,
    last_frame: Instant,
    running: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut log_dir = state_dir();
    let unusable = std::fs::create_dir_all(&log_dir).err();
    if unusable.is_some() {
        log_dir = std::env::temp_dir().join("flick-sheet");
        std::fs::create_dir_all(&log_dir).ok();
    }
    install_crash_log(log_dir.join("crash.log"));
    let _guard = init_tracing(&log_dir, args.debug);

    if let Some(e) = unusable {
        warn!(?e, "State directory unusable, logging to temp dir");
    }
    info!(log_path = %log_dir.display(), "flick-sheet starting");

    let config = match &args.config {
        Some(path) => SheetConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => SheetConfig::load(),
    };

    if args.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    run(&config, args.scenario)
}

/// `$XDG_STATE_HOME/flick-sheet`, falling back to `~/.local/state` then `/tmp`
fn state_dir() -> PathBuf {
    let base = match (std::env::var_os("XDG_STATE_HOME"), std::env::var_os("HOME")) {
        (Some(state), _) => PathBuf::from(state),
        (None, Some(home)) => PathBuf::from(home).join(".local/state"),
        (None, None) => std::env::temp_dir(),
    };
    base.join("flick-sheet")
}

/// Append panics to `path` as well as stderr
fn install_crash_log(path: PathBuf) {
    std::panic::set_hook(Box::new(move |panic_info| {
        eprintln!("PANIC: {}", panic_info);
        let opened = std::fs::OpenOptions::new().create(true).append(true).open(&path);
        if let Ok(mut file) = opened {
            use std::io::Write;
            let _ = writeln!(file, "[{}] PANIC: {}", chrono::Local::now(), panic_info);
        }
    }));
}

/// Stderr plus a daily rolling file; the guard flushes the file writer on drop
fn init_tracing(dir: &Path, debug: bool) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug { "debug,flick_sheet=debug" } else { "warn,flick_sheet=info" })
    });
    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(dir, "flick-sheet.log"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();
    guard
}

/// Play a scenario on a calloop event loop until it settles
fn run(config: &SheetConfig, scenario: Scenario) -> Result<()> {
    let mut event_loop: EventLoop<LoopState> =
        EventLoop::try_new().map_err(|e| anyhow::anyhow!("Failed to create event loop: {:?}", e))?;
    let loop_handle = event_loop.handle();

    let steps = demo::script(scenario);
    let mut state = LoopState {
        host: DemoHost::new(config),
        remaining: steps.len(),
        last_frame: Instant::now(),
        running: true,
    };

    // One-shot timer per scripted touch
    for step in steps {
        loop_handle
            .insert_source(Timer::from_duration(step.at), move |_, _, state| {
                state.host.apply(step.action);
                state.remaining -= 1;
                TimeoutAction::Drop
            })
            .map_err(|e| anyhow::anyhow!("Failed to insert script timer: {:?}", e))?;
    }

    // Frame timer for animations at 60fps
    loop_handle
        .insert_source(Timer::from_duration(FRAME), move |_, _, state| {
            let now = Instant::now();
            let dt = now.duration_since(state.last_frame);
            state.last_frame = now;
            state.host.tick(dt);

            if state.remaining == 0 && state.host.is_idle() {
                state.running = false;
                return TimeoutAction::Drop;
            }
            TimeoutAction::ToDuration(FRAME)
        })
        .map_err(|e| anyhow::anyhow!("Failed to insert frame timer: {:?}", e))?;

    info!(?scenario, "Entering event loop");

    while state.running {
        event_loop
            .dispatch(Some(Duration::from_millis(1)), &mut state)
            .map_err(|e| anyhow::anyhow!("Event loop error: {:?}", e))?;
    }

    let stats = state.host.stats();
    info!(?stats, "Demo finished");
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
