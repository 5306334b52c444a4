use super::{canvas::Canvas, color::Color};
use crossterm::{
    cursor, queue,
    style::{self, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

/// The terminal the application draws on.
///
/// Raw mode and the alternate screen are entered on construction and left again when dropped, so
/// the user's terminal is restored even when the application bails out with an error.
pub(crate) struct Terminal<W: Write> {
    writer: W,
}

impl<W: Write> Terminal<W> {
    pub(crate) fn new(mut writer: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        queue!(writer, terminal::EnterAlternateScreen, cursor::Hide, terminal::Clear(ClearType::All))?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// The current size in columns and rows.
    pub(crate) fn size(&self) -> io::Result<(usize, usize)> {
        let (columns, rows) = terminal::size()?;
        Ok((columns as usize, rows as usize))
    }

    pub(crate) fn draw(&mut self, canvas: &Canvas) -> io::Result<()> {
        write_canvas(&mut self.writer, canvas)?;
        self.writer.flush()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = queue!(self.writer, style::ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = self.writer.flush();
        let _ = terminal::disable_raw_mode();
    }
}

/// Write every cell in the canvas, only emitting color changes when they're needed.
pub(crate) fn write_canvas<W: Write>(writer: &mut W, canvas: &Canvas) -> io::Result<()> {
    let mut fg: Option<Color> = None;
    let mut bg: Option<Option<Color>> = None;
    for (row, cells) in canvas.rows().enumerate() {
        queue!(writer, cursor::MoveTo(0, row as u16))?;
        for cell in cells {
            if fg != Some(cell.fg) {
                queue!(writer, SetForegroundColor(cell.fg.into()))?;
                fg = Some(cell.fg);
            }
            if bg != Some(cell.bg) {
                let color = cell.bg.map(Into::into).unwrap_or(style::Color::Reset);
                queue!(writer, SetBackgroundColor(color))?;
                bg = Some(cell.bg);
            }
            queue!(writer, Print(cell.glyph))?;
        }
    }
    queue!(writer, style::ResetColor)
}
