use crate::{
    render::{
        Canvas, Color,
        hud::{center_col, put_centered},
    },
    session::{PatternCatalog, SessionDuration},
};

const SELECTED: Color = Color::WHITE;
const UNSELECTED: Color = Color::new(0x94, 0xa3, 0xb8);
const OVERLAY: Color = Color::new(0x0f, 0x17, 0x2a);

/// The part of the settings screen receiving input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Focus {
    Patterns,
    Duration,
}

/// Input understood by the settings screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SettingsInput {
    Up,
    Down,
    Left,
    Right,
    Tab,
    Confirm,
    Close,
}

/// What the application should do after the settings screen handled some input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SettingsAction {
    None,
    SelectPattern(usize),
    SelectDuration(SessionDuration),
    Close,
}

/// The pattern and session length picker.
#[derive(Clone, Debug)]
pub(crate) struct SettingsMenu {
    cursor: usize,
    patterns: usize,
    duration: SessionDuration,
    focus: Focus,
}

impl SettingsMenu {
    pub(crate) fn new(selected: usize, patterns: usize, duration: SessionDuration) -> Self {
        Self { cursor: selected, patterns, duration, focus: Focus::Patterns }
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn focus(&self) -> Focus {
        self.focus
    }

    pub(crate) fn handle(&mut self, input: SettingsInput) -> SettingsAction {
        match (self.focus, input) {
            (_, SettingsInput::Close) => SettingsAction::Close,
            (Focus::Patterns, SettingsInput::Tab) => {
                self.focus = Focus::Duration;
                SettingsAction::None
            }
            (Focus::Duration, SettingsInput::Tab) => {
                self.focus = Focus::Patterns;
                SettingsAction::None
            }
            (Focus::Patterns, SettingsInput::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                SettingsAction::None
            }
            (Focus::Patterns, SettingsInput::Down) => {
                self.cursor = (self.cursor + 1).min(self.patterns.saturating_sub(1));
                SettingsAction::None
            }
            (Focus::Patterns, SettingsInput::Confirm) => SettingsAction::SelectPattern(self.cursor),
            (Focus::Duration, SettingsInput::Left | SettingsInput::Up) => self.change_duration(false),
            (Focus::Duration, SettingsInput::Right | SettingsInput::Down) => self.change_duration(true),
            (Focus::Duration, SettingsInput::Confirm) => SettingsAction::Close,
            (Focus::Patterns, SettingsInput::Left | SettingsInput::Right) => SettingsAction::None,
        }
    }

    fn change_duration(&mut self, longer: bool) -> SettingsAction {
        let duration = if longer { self.duration.longer() } else { self.duration.shorter() };
        if duration == self.duration {
            return SettingsAction::None;
        }
        self.duration = duration;
        SettingsAction::SelectDuration(duration)
    }

    /// Draw the settings screen over the whole canvas.
    pub(crate) fn draw(&self, catalog: &PatternCatalog, active: usize, canvas: &mut Canvas) {
        for row in 0..canvas.height() {
            for col in 0..canvas.width() {
                canvas.paint_bg(col, row, OVERLAY);
                canvas.put(col, row, ' ', SELECTED);
            }
        }
        put_centered(canvas, 1, "Settings", SELECTED);

        let mut row = 3;
        let heading = self.heading("Breathing Patterns", Focus::Patterns);
        put_centered(canvas, row, &heading, SELECTED);
        row += 2;
        for (index, pattern) in catalog.iter().enumerate() {
            let marker = if index == active { '●' } else { '○' };
            let pointer = if index == self.cursor && self.focus == Focus::Patterns { '›' } else { ' ' };
            let color = if index == self.cursor { SELECTED } else { UNSELECTED };
            let title = format!("{pointer} {marker} {}", pattern.name());
            let col = center_col(&title, canvas.width()).min(4);
            canvas.put_str(col, row, &title, color);
            canvas.put_str(col + 4, row + 1, pattern.description(), UNSELECTED);
            canvas.put_str(col + 4, row + 2, &pattern.summary(), UNSELECTED);
            row += 4;
        }

        row += 1;
        put_centered(canvas, row, &self.heading("Session Duration", Focus::Duration), SELECTED);
        let choices: Vec<String> = SessionDuration::choices()
            .map(|d| if d == self.duration { format!("[{d}]") } else { format!(" {d} ") })
            .collect();
        put_centered(canvas, row + 2, &choices.join(" "), SELECTED);
        let hints = "[↑↓←→] move  [tab] switch  [enter] select  [esc] back";
        put_centered(canvas, canvas.height().saturating_sub(2), hints, UNSELECTED);
    }

    fn heading(&self, title: &str, focus: Focus) -> String {
        if self.focus == focus { format!("» {title} «") } else { title.to_string() }
    }
}
