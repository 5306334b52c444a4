use crate::{
    animations::Scene,
    config::Settings,
    driver::SessionDriver,
    render::{Canvas, hud::Hud, terminal::Terminal},
    session::{PatternCatalog, PhaseTimer, SessionSummary, format_clock},
    settings::{SettingsAction, SettingsInput, SettingsMenu},
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    io::{self, Write},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};
use tracing::{debug, info};

/// A user command, decoded from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Toggle,
    Stop,
    OpenSettings,
    Settings(SettingsInput),
    Quit,
}

impl Command {
    fn from_key(key: KeyEvent, settings_open: bool) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Self::Quit);
        }
        if settings_open {
            let input = match key.code {
                KeyCode::Up | KeyCode::Char('k') => SettingsInput::Up,
                KeyCode::Down | KeyCode::Char('j') => SettingsInput::Down,
                KeyCode::Left | KeyCode::Char('h') => SettingsInput::Left,
                KeyCode::Right | KeyCode::Char('l') => SettingsInput::Right,
                KeyCode::Tab | KeyCode::BackTab => SettingsInput::Tab,
                KeyCode::Enter | KeyCode::Char(' ') => SettingsInput::Confirm,
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('o') => SettingsInput::Close,
                _ => return None,
            };
            return Some(Self::Settings(input));
        }
        match key.code {
            KeyCode::Char(' ') => Some(Self::Toggle),
            KeyCode::Char('s') => Some(Self::Stop),
            KeyCode::Char('o') => Some(Self::OpenSettings),
            KeyCode::Esc | KeyCode::Char('q') => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The interactive breathing session.
pub struct App {
    catalog: PatternCatalog,
    selected: usize,
    driver: SessionDriver,
    scene: Scene,
    settings: Option<SettingsMenu>,
    notice: Option<String>,
    frame_interval: Duration,
    started: Instant,
    last_frame: Instant,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let Settings { catalog, pattern, session, tick_interval, overshoot, frame_interval, scene } = settings;
        let selected = catalog.position(&pattern).unwrap_or_default();
        let driver = SessionDriver::new(PhaseTimer::new(pattern, session, overshoot), tick_interval);
        let seed = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or_default();
        let now = Instant::now();
        Self {
            catalog,
            selected,
            driver,
            scene: Scene::new(scene, seed),
            settings: None,
            notice: None,
            frame_interval,
            started: now,
            last_frame: now,
        }
    }

    /// Take over the terminal and run until the user quits.
    pub fn run(mut self) -> io::Result<()> {
        let mut terminal = Terminal::new(io::stdout())?;
        info!("starting interactive session");
        loop {
            let now = Instant::now();
            self.poll_timer(now);
            if now.duration_since(self.last_frame) >= self.frame_interval || self.last_frame == self.started {
                self.draw(&mut terminal, now)?;
            }

            if event::poll(self.next_wakeup(Instant::now()))? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(command) = Command::from_key(key, self.settings.is_some()) {
                            if !self.handle(command, Instant::now()) {
                                break;
                            }
                            self.draw(&mut terminal, Instant::now())?;
                        }
                    }
                    Event::Resize(..) => self.draw(&mut terminal, Instant::now())?,
                    _ => (),
                }
            }
        }
        info!("leaving");
        Ok(())
    }

    fn poll_timer(&mut self, now: Instant) {
        if let Some(outcome) = self.driver.poll(now) {
            if let Some(summary) = outcome.completed {
                self.notice = Some(completion_notice(&summary));
            }
        }
    }

    /// How long to wait for input before something needs to be updated.
    fn next_wakeup(&self, now: Instant) -> Duration {
        let frame = (self.last_frame + self.frame_interval).saturating_duration_since(now);
        match self.driver.time_until_next(now) {
            Some(tick) => frame.min(tick),
            None => frame,
        }
    }

    /// Apply a command. Returns `false` when the application should exit.
    pub(crate) fn handle(&mut self, command: Command, now: Instant) -> bool {
        debug!(?command, "handling command");
        match command {
            Command::Toggle => {
                self.notice = None;
                self.driver.toggle(now);
            }
            Command::Stop => self.driver.stop(),
            Command::OpenSettings => {
                self.settings = Some(SettingsMenu::new(
                    self.selected,
                    self.catalog.len(),
                    self.driver.timer().session_duration(),
                ));
            }
            Command::Settings(input) => self.handle_settings(input),
            Command::Quit => return false,
        }
        true
    }

    fn handle_settings(&mut self, input: SettingsInput) {
        let Some(menu) = self.settings.as_mut() else {
            return;
        };
        match menu.handle(input) {
            SettingsAction::None => (),
            SettingsAction::SelectPattern(index) => {
                if let Some(pattern) = self.catalog.get(index) {
                    self.selected = index;
                    self.notice = None;
                    self.driver.select_pattern(pattern.clone());
                }
                self.settings = None;
            }
            SettingsAction::SelectDuration(duration) => self.driver.select_session_duration(duration),
            SettingsAction::Close => self.settings = None,
        }
    }

    fn draw<W: Write>(&mut self, terminal: &mut Terminal<W>, now: Instant) -> io::Result<()> {
        let (width, height) = terminal.size()?;
        let mut canvas = Canvas::new(width, height);
        self.render(&mut canvas, now);
        terminal.draw(&canvas)
    }

    /// Draw the current frame into `canvas`.
    pub(crate) fn render(&mut self, canvas: &mut Canvas, now: Instant) {
        let clock = now.duration_since(self.started).as_secs_f32();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if let Some(menu) = &self.settings {
            menu.draw(&self.catalog, self.selected, canvas);
            return;
        }
        let snapshot = self.driver.snapshot();
        self.scene.render(&snapshot, clock, delta, canvas);
        let hud = Hud {
            snapshot: &snapshot,
            pattern: self.driver.timer().pattern(),
            notice: self.notice.as_deref(),
            clock,
        };
        hud.draw(canvas);
    }
}

fn completion_notice(summary: &SessionSummary) -> String {
    format!("Session complete: {} breaths in {}", summary.breaths, format_clock(summary.elapsed))
}
