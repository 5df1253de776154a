use std::io::{self, stdin};
use std::path::PathBuf;

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use typespeed::{
    app::{App, Flow},
    app_dirs::AppDirs,
    clock::{Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    controller::Controller,
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    session::TestDuration,
    sound::{Muted, SoundFeedback, ToneFeedback},
    store::{FileStore, KeyValueStore, Persistence},
    theme::Theme,
    RuntimeSettings,
};

/// typing speed test with live accuracy feedback and local score history
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// length of the test in seconds
    #[clap(short = 'd', long, value_enum)]
    duration: Option<TestDuration>,

    /// colour theme (remembered for next time)
    #[clap(short = 't', long, value_enum)]
    theme: Option<Theme>,

    /// turn off keystroke sounds
    #[clap(long)]
    mute: bool,

    /// seed for passage selection, for reproducible runs
    #[clap(long)]
    seed: Option<u64>,

    /// directory for score history, theme and logs
    #[clap(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let dirs = AppDirs::resolve(cli.data_dir.clone());
    if let Err(e) = logging::init(&dirs.log_path()) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let config_store = FileConfigStore::new();
    let settings = RuntimeSettings::resolve(&config_store.load(), cli.duration, cli.mute);
    if let Err(e) = config_store.save(&Config::from(&settings)) {
        log::warn!("failed to save config: {e:#}");
    }

    let sound: Box<dyn SoundFeedback> = if settings.sound {
        match ToneFeedback::spawn() {
            Ok(tone) => Box::new(tone),
            Err(e) => {
                log::warn!("keystroke sounds unavailable: {e:#}");
                Box::new(Muted)
            }
        }
    } else {
        Box::new(Muted)
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let store = FileStore::in_dirs(&dirs);
    log::info!("scores and theme stored in {}", store.path().display());

    let mut controller = Controller::new(
        Persistence::new(store),
        SystemClock,
        rng,
        sound,
    )
    .with_duration(settings.duration);
    if let Some(theme) = cli.theme {
        controller.set_theme(theme);
    }
    let mut app = App::new(controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    log::info!("exiting");
    result
}

fn start_tui<B, S, C, R, E, T>(
    terminal: &mut Terminal<B>,
    app: &mut App<S, C, R>,
    runner: &Runner<E, T>,
) -> anyhow::Result<()>
where
    B: Backend,
    S: KeyValueStore,
    C: Clock,
    R: RngCore,
    E: EventSource,
    T: Ticker,
{
    loop {
        let view = app.view();
        terminal
            .draw(|f| f.render_widget(&view, f.area()))
            .context("drawing frame")?;

        if app.handle_event(runner.step()) == Flow::Quit {
            break;
        }
    }

    Ok(())
}
