//! Application entry point and dispatch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use countup_cli::presenter::CLIStripPresenter;
use countup_cli::progress::ProgressStrip;
use countup_cli::{output, ui, watch_frames};
use countup_core::constants::MAX_SIMULATED_FRAMES;
use countup_core::observers::LoggingObserver;
use countup_core::{
    exit_codes, CancellationToken, CounterAnimator, CounterObserver, CounterStrip, FrameLoop,
    ObserverSubject, SimulatedClock, StripHandle, TickScheduler,
};
use countup_tui::{StripDriver, TuiApp, TuiBridgeObserver};

use crate::config::AppConfig;

/// Capacity of the observer -> dashboard channel.
const TUI_CHANNEL_CAPACITY: usize = 4096;

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Interrupted,
}

impl Outcome {
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Completed => exit_codes::SUCCESS,
            Outcome::Interrupted => exit_codes::ERROR_CANCELED,
        }
    }
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<Outcome> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        countup_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(Outcome::Completed);
    }

    let strip = config.load_strip()?;
    config.frame_step_ms()?;

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone())?;

    if config.tui {
        return run_tui(config, &strip, &cancel);
    }
    run_cli(config, &strip, &cancel)
}

/// Observers of a headless run: tracing always, progress bars when live.
fn cli_observer(config: &AppConfig, strip: &CounterStrip) -> (Arc<dyn CounterObserver>, Option<Arc<ProgressStrip>>) {
    let subject = ObserverSubject::new();
    subject.register(Arc::new(LoggingObserver::default()));

    let progress = (!config.quiet && !config.frames && !config.simulate)
        .then(|| Arc::new(ProgressStrip::new(strip.entries().to_vec())));
    if let Some(bars) = &progress {
        subject.register(bars.clone());
    }
    (Arc::new(subject), progress)
}

fn start(
    scheduler: Arc<dyn TickScheduler>,
    config: &AppConfig,
    strip: &CounterStrip,
    observer: &Arc<dyn CounterObserver>,
    presenter: &Arc<CLIStripPresenter>,
) -> Result<StripHandle> {
    let animator = CounterAnimator::with_options(scheduler.clone(), config.animator_options());
    let handle = strip.start(&animator, observer)?;
    if presenter.shows_frames() {
        let presenter = Arc::clone(presenter);
        watch_frames(scheduler, handle.clone(), move |report| presenter.present_frame(report));
    }
    Ok(handle)
}

fn run_cli(config: &AppConfig, strip: &CounterStrip, cancel: &CancellationToken) -> Result<Outcome> {
    let presenter = Arc::new(CLIStripPresenter::new(
        strip.entries().to_vec(),
        config.quiet,
        config.frames,
    ));
    let (observer, progress) = cli_observer(config, strip);
    let step_ms = config.frame_step_ms()?;

    let (handle, elapsed, interrupted) = if config.simulate {
        let clock = Arc::new(SimulatedClock::new());
        let handle = start(clock.clone(), config, strip, &observer, &presenter)?;
        let frames = clock.run_until_idle(step_ms, MAX_SIMULATED_FRAMES);
        debug!(frames, simulated_ms = clock.now(), "simulated run drained");
        (handle, Duration::from_secs_f64(clock.now() / 1000.0), false)
    } else {
        let frames = Arc::new(FrameLoop::new(config.fps)?);
        let started = Instant::now();
        let handle = start(frames.clone(), config, strip, &observer, &presenter)?;
        let drained = frames.run_until_idle(cancel);
        if !drained {
            handle.stop_all();
        }
        (handle, started.elapsed(), !drained)
    };

    if let Some(bars) = progress {
        bars.clear();
    }

    let values = handle.values();
    if !config.quiet {
        ui::print_header("Statistics");
    }
    presenter.present_final(&values, elapsed, interrupted);
    if interrupted && !config.quiet {
        ui::print_warning("interrupted");
    }

    if let Some(path) = &config.output {
        output::write_to_file(path, strip.entries(), &values)
            .with_context(|| format!("writing {}", path.display()))?;
        if !config.quiet {
            ui::print_success(&format!("strip written to {}", path.display()));
        }
    }

    Ok(if interrupted {
        Outcome::Interrupted
    } else {
        Outcome::Completed
    })
}

fn run_tui(config: &AppConfig, strip: &CounterStrip, cancel: &CancellationToken) -> Result<Outcome> {
    let frames = Arc::new(FrameLoop::new(config.fps)?);
    let (tx, rx) = crossbeam_channel::bounded(TUI_CHANNEL_CAPACITY);

    let animator = CounterAnimator::with_options(frames.clone(), config.animator_options());
    let driver = StripDriver::new(animator, strip.clone(), Arc::new(TuiBridgeObserver::new(tx)));

    let mut app = TuiApp::new(rx, strip)
        .with_driver(driver)
        .with_cancel_token(cancel.clone());
    app.start();
    app.run(&frames).map_err(|e| anyhow::anyhow!("TUI error: {e}"))?;

    Ok(if app.cancelled {
        Outcome::Interrupted
    } else {
        Outcome::Completed
    })
}

fn ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .context("setting Ctrl+C handler")
}
