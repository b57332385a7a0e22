mod app;
mod logging;
mod reveal;
mod tui;
mod ui;

use std::io::{self, stdout};
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dirarchive_core::{
    ScanConfig, ScanHandle, ScanMessage, ScanOrchestrator, ScanRequest, ScanResult, format_count,
};
use ratatui::{Terminal, backend::CrosstermBackend, style::Style, widgets::Widget};

use app::{Action, AppState};
use tui::{AppEvent, EventHandler, handle_key};
use ui::{AppLayout, Footer, Header, LogView, ProgressView, Theme, log_rows};

/// Default catalogue file name, placed next to the executable
const DEFAULT_OUTPUT_NAME: &str = "file_info.csv";

/// DIRARCHIVE - catalogue every file and directory below a path into a CSV file
#[derive(Parser, Debug)]
#[command(name = "dirarchive")]
#[command(about = "Catalogue every file and directory below a path into a CSV file")]
#[command(version)]
struct Args {
    /// Directory to catalogue
    path: PathBuf,

    /// Output CSV file (defaults to file_info.csv next to the executable)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Quote fields that contain commas or quotes
    #[arg(long)]
    quote: bool,

    /// Follow symbolic links
    #[arg(short, long)]
    follow_symlinks: bool,

    /// Threads for directory reads (0 = auto)
    #[arg(short = 'j', long, default_value_t = 0)]
    threads: usize,

    /// Print progress as plain lines instead of the interactive view
    #[arg(long)]
    plain: bool,

    /// Do not log every processed entry
    #[arg(long)]
    quiet_visits: bool,

    /// Reveal the catalogue in the file manager when the scan succeeds
    #[arg(long)]
    reveal: bool,

    /// Increase diagnostic logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let output = args.output.clone().unwrap_or_else(default_output_path);
    let path = args.path.canonicalize().unwrap_or_else(|_| args.path.clone());

    if args.plain {
        logging::init_stderr_logging(args.verbose);
    } else {
        logging::init_file_logging(args.verbose, &log_path_for(&output));
    }

    let config = ScanConfig {
        follow_symlinks: args.follow_symlinks,
        num_threads: args.threads,
        quote_fields: args.quote,
        log_visits: !args.quiet_visits,
    };
    let handle = ScanOrchestrator::new(output.clone(), config).start(ScanRequest::new(path.clone()));

    let result = if args.plain {
        run_plain(handle)
    } else {
        run_tui(handle, path, output)
    };

    match result {
        Ok(Some(result)) => {
            if args.reveal
                && let Err(e) = reveal::reveal_in_file_manager(&result.output)
            {
                eprintln!("Could not open file manager: {}", e);
            }
            Ok(())
        }
        // Quit before the scan finished
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    }
}

/// `file_info.csv` in the directory holding the running executable,
/// or in the current directory when that cannot be determined
fn default_output_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_OUTPUT_NAME)
}

/// Diagnostic log location used while the TUI owns the terminal
fn log_path_for(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".log");
    PathBuf::from(name)
}

fn run_plain(handle: ScanHandle) -> Result<Option<ScanResult>> {
    for msg in handle.messages() {
        match msg {
            ScanMessage::Log(line) => println!("{}", line),
            ScanMessage::Progress(pct) if pct % 10 == 0 => eprintln!("Progress: {}%", pct),
            _ => {}
        }
    }

    let result = handle.join()?;
    println!(
        "{} entries written, {} unreadable",
        format_count(result.records_written),
        format_count(result.errors.len() as u64)
    );
    Ok(Some(result))
}

fn run_tui(handle: ScanHandle, path: PathBuf, output: PathBuf) -> Result<Option<ScanResult>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, handle, path, output);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    handle: ScanHandle,
    path: PathBuf,
    output: PathBuf,
) -> Result<Option<ScanResult>> {
    let theme = Theme::default();
    let mut state = AppState::new(path, output);
    let event_handler = EventHandler::new(50); // 50ms tick rate

    loop {
        while let Ok(msg) = handle.messages().try_recv() {
            state.apply(msg);
        }

        terminal.draw(|frame| {
            let area = frame.area();
            let layout = AppLayout::new(area);

            frame
                .buffer_mut()
                .set_style(area, Style::default().bg(theme.bg));

            state.visible_height = log_rows(layout.log);

            Header::new(&state, &theme).render(layout.header, frame.buffer_mut());
            ProgressView::new(&state, &theme).render(layout.progress, frame.buffer_mut());
            LogView::new(&state, &theme).render(layout.log, frame.buffer_mut());
            Footer::new(state.mode, &theme)
                .with_status(state.status.as_deref())
                .render(layout.footer, frame.buffer_mut());
        })?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = handle_key(key, state.mode);
                handle_action(&mut state, action);
            }
            AppEvent::Resize => {
                // Terminal will redraw on next loop
            }
            AppEvent::Tick => {
                state.tick_spinner();
            }
        }

        if state.should_quit {
            break;
        }
    }

    if state.is_scanning() {
        handle.cancel();
    }

    // The worker stops at its next entry once cancelled
    match handle.join() {
        Ok(result) => Ok(Some(result)),
        Err(dirarchive_core::ArchiveError::Cancelled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn handle_action(state: &mut AppState, action: Action) {
    let page = state.visible_height.max(1);
    match action {
        Action::ScrollUp => state.scroll_up(1),
        Action::ScrollDown => state.scroll_down(1),
        Action::PageUp => state.scroll_up(page),
        Action::PageDown => state.scroll_down(page),
        Action::FollowLog => state.follow_log(),
        Action::RevealOutput => state.reveal_output(),
        Action::Quit => state.quit(),
        Action::Tick => {}
    }
}
