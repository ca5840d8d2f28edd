use clap::{Parser, ValueEnum};
use dtpick::app::{PickerApp, quick_jump_labels};
use dtpick::terminal::{Terminal, TerminalEvent};
use dtpick::{
    Bridge, Clock, FixedClock, Instant, Outcome, PickerConfig, PickerSession, SystemClock,
    WeekStart,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WeekStartArg {
    Sunday,
    Monday,
}

impl From<WeekStartArg> for WeekStart {
    fn from(arg: WeekStartArg) -> Self {
        match arg {
            WeekStartArg::Sunday => WeekStart::Sunday,
            WeekStartArg::Monday => WeekStart::Monday,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "dtpick", version, about = "Pick a date and time in the terminal")]
struct Cli {
    /// Initially selected instant (YYYY-MM-DD or YYYY-MM-DD HH:mm). Defaults to now.
    #[arg(long)]
    initial: Option<String>,

    /// Freeze the clock at this instant instead of reading local time.
    #[arg(long)]
    now: Option<String>,

    /// YAML or JSON picker config.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    week_start: Option<WeekStartArg>,

    /// Output pattern for the committed instant, e.g. "DD/MM/YYYY HH:mm".
    #[arg(long)]
    format: Option<String>,

    /// Print the initial calendar grid as JSON and exit.
    #[arg(long)]
    grid_json: bool,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

enum HostClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl Clock for HostClock {
    fn now(&self) -> Instant {
        match self {
            Self::System(clock) => clock.now(),
            Self::Fixed(clock) => clock.now(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> dtpick::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => PickerConfig::load(path)?,
        None => PickerConfig::default(),
    };
    if let Some(week_start) = cli.week_start {
        config.week_start = week_start.into();
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }

    let clock = match cli.now.as_deref() {
        Some(text) => HostClock::Fixed(FixedClock(text.parse()?)),
        None => HostClock::System(SystemClock),
    };
    let output_format = config.output_format.clone();
    tracing::debug!(quick_jumps = %quick_jump_labels(&config.quick_jumps), "starting picker");
    let session = PickerSession::open_str(cli.initial.as_deref(), clock, config)?;

    if cli.grid_json {
        println!("{:#}", session.grid().to_json());
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = event_loop(session)?;

    let mut code = ExitCode::SUCCESS;
    Bridge::new(
        |instant: Instant| println!("{}", instant.format(&output_format)),
        || code = ExitCode::from(1),
    )
    .deliver(outcome);
    Ok(code)
}

fn event_loop(session: PickerSession<HostClock>) -> std::io::Result<Outcome> {
    let mut app = PickerApp::new(session);
    let mut terminal = Terminal::new()?;
    terminal.enter()?;

    let outcome = loop {
        if let Some(outcome) = app.outcome() {
            break outcome;
        }
        terminal.render(&app.render())?;
        match terminal.poll_event(Duration::from_millis(100))? {
            TerminalEvent::Key(key) => app.handle_key(key),
            TerminalEvent::Resize(_) => terminal.invalidate(),
            TerminalEvent::Tick => {}
        }
    };

    terminal.exit()?;
    Ok(outcome)
}
