//! Event loop tying the terminal to a [`Session`].

use std::fmt::Display;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute,
    terminal::{self, ClearType},
};

use pathviz_core::{Dims, InputError, Pos, Speed, VizConfig};
use pathviz_session::{Advance, FileStore, RunOutcome, Session};

use crate::screen::TermDisplay;

/// Where the top-left cell is drawn.
const ORIGIN: (u16, u16) = (2, 1);

/// Longest time the loop blocks waiting for input while idle.
const IDLE_POLL: Duration = Duration::from_millis(250);

const HELP: &str = "click: wall/start/end  right-click: heavy  enter: run  \
                    c: reset  s/l: save/load  +/-: size  f: speed  q: quit";

/// A keyboard command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run,
    Reset,
    Save,
    Load,
    Grow,
    Shrink,
    CycleSpeed,
    Quit,
}

/// Map a key to the command it triggers.
pub fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => Some(Command::Run),
        KeyCode::Char('c') => Some(Command::Reset),
        KeyCode::Char('s') => Some(Command::Save),
        KeyCode::Char('l') => Some(Command::Load),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::Grow),
        KeyCode::Char('-') => Some(Command::Shrink),
        KeyCode::Char('f') => Some(Command::CycleSpeed),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Turn an error message into a status sentence.
fn sentence(e: &impl Display) -> String {
    let text = e.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => text,
    }
}

fn describe(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Found {
            distance,
            path,
            visited,
        } => format!(
            "Path found: cost {distance}, {} steps, {visited} cells visited.",
            path.len() + 1
        ),
        RunOutcome::NoPath { visited } => {
            format!("No path exists ({visited} cells visited).")
        }
    }
}

pub struct App {
    session: Session<TermDisplay>,
    store: FileStore,
    speed: Speed,
    status: String,
    /// When the session next wants [`Session::advance`] called.
    deadline: Option<Instant>,
    done: bool,
}

impl App {
    pub fn new(config: VizConfig, store: FileStore) -> Result<Self, InputError> {
        let session = Session::new(config, TermDisplay::new())?;
        let speed = Speed::ALL
            .into_iter()
            .find(|s| s.delay_ms() == config.delay_ms)
            .unwrap_or_default();
        Ok(Self {
            session,
            store,
            speed,
            status: String::new(),
            deadline: None,
            done: false,
        })
    }

    #[inline]
    pub fn session(&self) -> &Session<TermDisplay> {
        &self.session
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[inline]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn execute(&mut self, cmd: Command, now: Instant) {
        match cmd {
            Command::Run => match self.session.run() {
                Ok(_) => {
                    self.status = "Searching...".into();
                    self.deadline = Some(now);
                }
                Err(e) => self.status = sentence(&e),
            },
            Command::Reset => {
                self.session.reset();
                self.deadline = None;
                self.status.clear();
            }
            Command::Save => match self.session.save_to(&mut self.store) {
                Ok(()) => self.status = "Grid saved.".into(),
                Err(e) => self.status = sentence(&e),
            },
            Command::Load => match self.session.load_from(&self.store) {
                Ok(()) => {
                    self.deadline = None;
                    self.status = "Grid loaded.".into();
                }
                Err(e) => self.status = sentence(&e),
            },
            Command::Grow => self.resize_by(1),
            Command::Shrink => self.resize_by(-1),
            Command::CycleSpeed => {
                self.speed = self.speed.next();
                self.session
                    .set_animation_delay(Duration::from_millis(self.speed.delay_ms()));
                self.status = format!("Speed: {}.", self.speed.label());
            }
            Command::Quit => self.done = true,
        }
    }

    fn resize_by(&mut self, step: i32) {
        let d = self.session.dims();
        match self.session.resize(Dims::new(d.rows + step, d.cols + step)) {
            Ok(()) => {
                self.deadline = None;
                self.status = format!("Grid is now {}.", self.session.dims());
            }
            Err(e) => self.status = sentence(&e),
        }
    }

    /// Forward a mouse press on cell `p`.
    pub fn click(&mut self, button: MouseButton, p: Pos) {
        let res = match button {
            MouseButton::Left => self.session.primary_click(p).map(drop),
            MouseButton::Right => self.session.secondary_click(p).map(drop),
            MouseButton::Middle => Ok(()),
        };
        if let Err(e) = res {
            self.status = sentence(&e);
        }
    }

    /// Drive the animation if its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        match self.deadline {
            Some(at) if at <= now => {}
            _ => return,
        }
        match self.session.advance() {
            Advance::Wait(d) => self.deadline = Some(now + d),
            Advance::Finished(outcome) => {
                self.status = describe(&outcome);
                self.deadline = None;
            }
            Advance::Idle => self.deadline = None,
        }
    }

    /// How long the loop may block on input before the next tick.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.deadline
            .map_or(IDLE_POLL, |at| at.saturating_duration_since(now))
    }

    fn handle(&mut self, ev: Event, now: Instant) {
        match ev {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                if let Some(cmd) = command_for(code) {
                    self.execute(cmd, now);
                }
            }
            Event::Mouse(me) => {
                if let MouseEventKind::Down(button) = me.kind {
                    if let Some(p) = self.session.display().hit(ORIGIN, me.column, me.row) {
                        self.click(button, p);
                    }
                }
            }
            Event::Resize(..) => self.session.display_mut().touch(),
            _ => {}
        }
    }

    fn draw<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let info = format!(
            "{}  speed: {} ({} ms)  save file: {}",
            self.session.dims(),
            self.speed().label(),
            self.session.delay().as_millis(),
            self.store.path().display()
        );
        let status = self.status.clone();
        self.session
            .display_mut()
            .draw(out, ORIGIN, &[&status, &info, HELP])
    }
}

/// Raw-mode, alternate-screen terminal with mouse capture, restored on drop.
struct Terminal {
    out: io::Stdout,
}

impl Terminal {
    fn open() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        Ok(Self { out })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the interactive loop until the user quits.
pub fn run(app: &mut App) -> io::Result<()> {
    let mut term = Terminal::open()?;
    app.draw(&mut term.out)?;
    let mut shown = app.status.clone();
    while !app.is_done() {
        let now = Instant::now();
        if event::poll(app.poll_timeout(now))? {
            while event::poll(Duration::ZERO)? {
                app.handle(event::read()?, Instant::now());
            }
        }
        app.tick(Instant::now());
        if app.session().display().is_dirty() || app.status != shown {
            app.draw(&mut term.out)?;
            shown.clone_from(&app.status);
        }
    }
    Ok(())
}
