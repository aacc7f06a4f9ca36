use crossterm::{cursor, terminal};

use crate::geometry::{Position, Size};

/// Console state queried by the alignment writer.
///
/// Both queries fail soft: a backend that cannot answer returns `None`
/// and the writer substitutes its configured fallback instead of
/// surfacing an error.
pub trait Terminal {
    /// Current terminal dimensions in character cells.
    fn size(&self) -> Option<Size>;

    /// Current cursor position, zero-based.
    fn cursor_position(&self) -> Option<Position>;
}

/// Live backend over the host console.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsTerminal;

impl OsTerminal {
    pub fn new() -> Self {
        Self
    }
}

impl Terminal for OsTerminal {
    fn size(&self) -> Option<Size> {
        terminal::size()
            .ok()
            .map(|(width, height)| Size::new(width, height))
    }

    fn cursor_position(&self) -> Option<Position> {
        // crossterm reports (column, row).
        cursor::position()
            .ok()
            .map(|(column, row)| Position::new(row, column))
    }
}

/// Fixed-answer backend for tests, benches, and headless callers.
#[derive(Debug, Clone, Copy)]
pub struct StaticTerminal {
    size: Option<Size>,
    cursor: Option<Position>,
}

impl StaticTerminal {
    /// Terminal reporting a fixed geometry with the cursor at the origin.
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            size: Some(Size::new(width, height)),
            cursor: Some(Position::default()),
        }
    }

    /// Terminal whose queries all fail, driving the fallback paths.
    pub fn unavailable() -> Self {
        Self {
            size: None,
            cursor: None,
        }
    }

    pub fn with_cursor(mut self, position: Position) -> Self {
        self.cursor = Some(position);
        self
    }
}

impl Terminal for StaticTerminal {
    fn size(&self) -> Option<Size> {
        self.size
    }

    fn cursor_position(&self) -> Option<Position> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_terminal_reports_configured_geometry() {
        let term = StaticTerminal::with_size(120, 40).with_cursor(Position::new(3, 7));
        assert_eq!(term.size(), Some(Size::new(120, 40)));
        assert_eq!(term.cursor_position(), Some(Position::new(3, 7)));
    }

    #[test]
    fn unavailable_terminal_answers_nothing() {
        let term = StaticTerminal::unavailable();
        assert!(term.size().is_none());
        assert!(term.cursor_position().is_none());
    }
}
