//! The terminal front end.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use rlife_lib::{Driver, Frame, Renderer, StopHandle};
use std::{
    error::Error,
    io::{self, Write},
    time::Duration,
};

/// How often the key watcher checks whether the driver has stopped by itself.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Draws each frame on the alternate screen, between a top bar and a bottom bar.
struct Screen<W: Write> {
    out: W,
}

impl<W: Write> Renderer for Screen<W> {
    type Error = io::Error;

    fn render(&mut self, frame: Frame<'_>) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let cols = cols as usize;
        let top_bar = format!("Gen: {}  Cells: {}", frame.generation, frame.population());
        let bottom_bar = "Running. Press [q] to quit.";

        queue!(self.out, Clear(ClearType::All))?;
        self.bar(0, &top_bar, cols)?;
        for (row, line) in frame
            .text
            .lines()
            .take(rows.saturating_sub(2) as usize)
            .enumerate()
        {
            let line = line.get(..cols).unwrap_or(line);
            queue!(self.out, MoveTo(0, row as u16 + 1), Print(line))?;
        }
        self.bar(rows.saturating_sub(1), bottom_bar, cols)?;
        self.out.flush()
    }
}

impl<W: Write> Screen<W> {
    fn bar(&mut self, row: u16, text: &str, cols: usize) -> io::Result<()> {
        let text = text.get(..cols).unwrap_or(text);
        queue!(
            self.out,
            MoveTo(0, row),
            SetAttribute(Attribute::Reverse),
            Print(format!("{:<width$}", text, width = cols)),
            SetAttribute(Attribute::Reset)
        )
    }
}

/// `q`, `Esc` and `Ctrl-C` quit.
fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Stops the driver on a quit key.
///
/// Returns once the driver is stopped, whoever stopped it.
async fn watch_keys(stop: &StopHandle) -> io::Result<()> {
    let mut events = EventStream::new();
    while !stop.is_stopped() {
        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if is_quit(&key) => stop.stop(),
                Some(Ok(_)) => (),
                Some(Err(e)) => {
                    stop.stop();
                    return Err(e);
                }
                None => stop.stop(),
            },
            _ = tokio::time::sleep(POLL_INTERVAL) => (),
        }
    }
    Ok(())
}

/// Runs the driver on the alternate screen until it stops,
/// then prints the last generation.
pub(crate) async fn run(mut driver: Driver) -> Result<(), Box<dyn Error>> {
    let stop = driver.stop_handle();
    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let mut screen = Screen { out: io::stdout() };
    let mut sleep = tokio::time::sleep;
    let (result, keys) = tokio::join!(driver.run(&mut screen, &mut sleep), watch_keys(&stop));

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result?;
    keys?;
    print!("{}", driver.text());
    Ok(())
}
