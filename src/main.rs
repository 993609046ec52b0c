//! timerbar - a countdown bar across every display
//!
//! This is the overlay entry point: it draws the bar and polls the remote
//! command service when one is configured.

use std::io::{self, IsTerminal};

use tracing::{error, info};

use timerbar::{
    config::OverlayArgs,
    platform::{BarWidget, HeadlessBar, TerminalBar, TerminalControls, TerminalSession},
    state::TimerEngine,
    tasks::{command_channel, command_channel::DEFAULT_CAPACITY, MainLoop, RemoteWatcher, Ticker},
    utils::{logging, stop_flag, StderrGate},
};

/// Exit code for a configuration the overlay refuses to start with
const EXIT_CONFIG: i32 = 2;

fn main() -> anyhow::Result<()> {
    let args = OverlayArgs::parse();

    let gate = StderrGate::default();
    if let Err(e) = logging::init_overlay(args.verbose, args.log_file.as_deref(), &gate) {
        eprintln!("Cannot open log file: {}", e);
        std::process::exit(EXIT_CONFIG);
    }
    let mute_stderr = logging::should_mute_stderr(
        args.headless,
        args.log_file.is_some(),
        io::stderr().is_terminal(),
    );

    info!("Starting timerbar v{}", env!("CARGO_PKG_VERSION"));

    // Invalid configuration is fatal: refuse to start
    let timer_config = match args.timer_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let command_source = match args.command_source() {
        Ok(source) => source,
        Err(e) => {
            error!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let displays = args.displays();

    info!(
        "Configuration: duration={}s, fade={}s..{}s, colors={}..{}, displays={}",
        timer_config.total_seconds,
        timer_config.start_fade_seconds,
        timer_config.end_fade_seconds,
        timer_config.start_color,
        timer_config.end_color,
        displays.len()
    );

    let stop = stop_flag()?;
    let (producer, consumer) = command_channel(DEFAULT_CAPACITY);

    let mut watcher = match command_source {
        Some((config, source)) => {
            info!("Polling remote commands from {}", config.status_url);
            Some(RemoteWatcher::spawn(source, producer, config.poll_interval)?)
        }
        None => {
            info!("No server URL configured, running local-only");
            drop(producer);
            None
        }
    };

    let engine = TimerEngine::new(timer_config);
    let result = if args.headless {
        let widgets = displays
            .iter()
            .map(|geometry| Box::new(HeadlessBar::new(*geometry)) as Box<dyn BarWidget>)
            .collect();
        MainLoop::new(engine, consumer, displays, widgets).run(&stop, Ticker::default())
    } else {
        let anchor = args.label_anchor();
        let widgets = (0..displays.len())
            .map(|row| Box::new(TerminalBar::new(row as u16, anchor)) as Box<dyn BarWidget>)
            .collect();

        let _session = TerminalSession::enter()?;
        // Log lines written to the bars' terminal would scribble over them
        let _muted = mute_stderr.then(|| gate.mute());
        MainLoop::new(engine, consumer, displays, widgets)
            .with_controls(Box::new(TerminalControls::new()))
            .run(&stop, Ticker::default())
    };

    // No background activity may outlive the process
    if let Some(watcher) = watcher.as_mut() {
        watcher.shutdown();
    }

    if let Err(e) = &result {
        error!("Overlay stopped: {}", e);
    }
    info!("timerbar shutdown complete");
    result?;
    Ok(())
}
