//! Terminal front end.
//!
//! Reads commands from stdin, feeds them to the selected application through
//! the [`Runtime`], and redraws the screen after every event that changed
//! the view.

use clap::{Parser, Subcommand};
use notehub::api::Services;
use notehub::app::{App, Event, MoviesApp, NotesApp, Runtime, ToastSink};
use notehub::ui::input::{parse_command, Input};
use notehub::ui::{render, Theme};
use notehub::{observability, Config};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, Parser)]
#[command(name = "notehub", version, about = "Browse NoteHub notes and TMDB movies from the terminal")]
struct Cli {
    /// Configuration file (TOML).
    #[arg(long, env = "NOTEHUB_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Built-in theme name or path to a theme file.
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Terminal height.
    #[arg(long, env = "LINES", default_value_t = 30, global = true)]
    rows: usize,

    /// Terminal width.
    #[arg(long, env = "COLUMNS", default_value_t = 100, global = true)]
    cols: usize,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Mode {
    /// Manage notes: search, create and delete.
    Notes,
    /// Search movies and view details.
    Movies,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("notehub: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> notehub::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let log_file = observability::init_tracing(&config);
    tracing::info!(mode = ?cli.mode, log_file = ?log_file, "starting notehub");

    let theme = match &cli.theme {
        Some(spec) => Theme::resolve(spec)?,
        None => config.theme(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let screen = Screen {
        theme,
        rows: cli.rows,
        cols: cli.cols,
    };

    match cli.mode {
        Mode::Notes => {
            let services = config.notes_services()?;
            let app = NotesApp::new(config.notes_settings());
            runtime.block_on(drive(app, services, screen))
        }
        Mode::Movies => {
            let services = config.movies_services()?;
            let app = MoviesApp::new(config.movies_settings());
            runtime.block_on(drive(app, services, screen))
        }
    }
}

struct Screen {
    theme: Theme,
    rows: usize,
    cols: usize,
}

async fn drive<A: App>(app: A, services: Services, screen: Screen) -> notehub::Result<()> {
    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(read_commands(tx));

    let mut runtime = Runtime::new(app, ToastSink::default(), services);
    let mut stdout = std::io::stdout();

    runtime
        .run(rx, |app, sink| {
            let frame = render(app, sink.latest(), &screen.theme, screen.rows, screen.cols);
            let _ = stdout.write_all(frame.as_bytes());
            let _ = stdout.flush();
        })
        .await?;

    println!("\u{1b}[{};1H", screen.rows);
    Ok(())
}

async fn read_commands(tx: mpsc::Sender<Event>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        match parse_command(&line) {
            Input::Event(event) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Input::Quit => {
                let _ = tx.send(Event::Dispose).await;
                break;
            }
            Input::Invalid(reason) => tracing::warn!(line = %line, reason = %reason, "ignored input"),
            Input::Nothing => {}
        }
    }
}
