use super::{
    canvas::Canvas,
    color::{Color, hsl_to_rgb},
};
use crate::session::{BreathingPattern, SessionSnapshot, SessionStats, SessionStatus};
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "Breathe";
const TEXT: Color = Color::WHITE;
const MUTED: Color = Color::new(0xbf, 0xdb, 0xfe);
const BAR_FILLED: char = '━';
const BAR_EMPTY: char = '─';

/// The text drawn over the visuals: title, phase, countdown, statistics and key hints.
pub(crate) struct Hud<'a> {
    pub snapshot: &'a SessionSnapshot,
    pub pattern: &'a BreathingPattern,
    /// A one-off line, e.g. the summary of a finished session.
    pub notice: Option<&'a str>,
    pub clock: f32,
}

impl Hud<'_> {
    pub(crate) fn draw(&self, canvas: &mut Canvas) {
        let height = canvas.height();
        if height < 8 {
            // not enough room for anything but the essentials
            let line = format!("{} {}", self.snapshot.phase.label(), self.snapshot.remaining_secs());
            put_centered(canvas, height / 2, &line, TEXT);
            return;
        }
        self.draw_title(canvas, 1);
        put_centered(canvas, 2, self.pattern.name(), MUTED);

        let middle = height / 2;
        put_centered(canvas, middle.saturating_sub(1), self.snapshot.phase.label(), TEXT);
        put_centered(canvas, middle + 1, &self.snapshot.remaining_secs().to_string(), TEXT);

        let stats = SessionStats::from(self.snapshot);
        let bar_width = canvas.width().saturating_sub(20).min(40);
        let progress = format!("{} {:>3.0}%", progress_bar(stats.progress_percent, bar_width), stats.progress_percent);
        put_centered(canvas, height - 5, &progress, TEXT);
        let numbers = format!("Time {}   Breaths {}", stats.elapsed, stats.breaths);
        put_centered(canvas, height - 4, &numbers, TEXT);
        if let Some(notice) = self.notice {
            put_centered(canvas, height - 3, notice, MUTED);
        }
        put_centered(canvas, height - 2, &controls(self.snapshot.status), MUTED);
    }

    fn draw_title(&self, canvas: &mut Canvas, row: usize) {
        let start = center_col(TITLE, canvas.width());
        let total = TITLE.chars().count();
        for (index, glyph) in TITLE.chars().enumerate() {
            let color = if self.snapshot.is_running() {
                // all letters pulse together, each keeping its own hue
                let hue = (index as f32 / total as f32) * 360.0;
                hsl_to_rgb(hue, 65.0, 75.0 + 15.0 * (self.clock * 2.0).sin())
            } else {
                TEXT
            };
            canvas.put(start + index, row, glyph, color);
        }
    }
}

/// The key hints for the given status.
pub(crate) fn controls(status: SessionStatus) -> String {
    let toggle = match status {
        SessionStatus::Running => "pause",
        SessionStatus::Paused => "resume",
        SessionStatus::Idle => "start",
    };
    format!("[space] {toggle}  [s] stop  [o] settings  [q] quit")
}

/// A horizontal bar `width` cells wide filled up to `percent`.
pub(crate) fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(width - filled));
    bar
}

/// The column where `text` starts when centered in `width` columns.
pub(crate) fn center_col(text: &str, width: usize) -> usize {
    width.saturating_sub(text.width()) / 2
}

pub(crate) fn put_centered(canvas: &mut Canvas, row: usize, text: &str, color: Color) {
    let col = center_col(text, canvas.width());
    canvas.put_str(col, row, text, color);
}
