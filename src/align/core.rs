use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::WriterMetrics;
use crate::terminal::{OsTerminal, Terminal};
use crate::text::line_segments;

/// Column count assumed when the terminal cannot report one.
pub const DEFAULT_FALLBACK_WIDTH: u16 = 80;

const LOG_TARGET: &str = "gutter::writer";

/// Configuration knobs for an [`AlignedWriter`].
#[derive(Clone)]
pub struct WriterConfig {
    /// Width substituted when the terminal width query fails.
    pub fallback_width: u16,
    /// Optional structured logger for fallback warnings and snapshots.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with interested callers.
    pub metrics: Option<Arc<Mutex<WriterMetrics>>>,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            fallback_width: DEFAULT_FALLBACK_WIDTH,
            logger: None,
            metrics: None,
            metrics_target: "gutter::writer.metrics".to_string(),
        }
    }
}

impl WriterConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(WriterMetrics::new())));
        }
    }

    /// Disable metrics collection.
    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<WriterMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Alignment writer over an injected terminal capability.
///
/// Output goes to a caller-supplied handle so alignment stays testable
/// against an in-memory sink; the terminal itself is only queried, never
/// written to. Width is measured in bytes throughout.
pub struct AlignedWriter<T: Terminal> {
    terminal: T,
    config: WriterConfig,
}

impl AlignedWriter<OsTerminal> {
    /// Writer over the host console with default configuration.
    pub fn with_default() -> Self {
        Self::new(OsTerminal::new(), WriterConfig::default())
    }
}

impl<T: Terminal> AlignedWriter<T> {
    pub fn new(terminal: T, config: WriterConfig) -> Self {
        Self { terminal, config }
    }

    pub fn config_mut(&mut self) -> &mut WriterConfig {
        &mut self.config
    }

    /// Center `text` on the current terminal width.
    ///
    /// Padding is half the free width, never negative; text wider than the
    /// terminal is emitted flush left. Embedded newlines pass through
    /// untouched, so only the first visual line is guaranteed centered.
    pub fn print_centered(&mut self, out: &mut impl Write, text: &str) -> Result<()> {
        let columns = self.columns();
        let padding = (columns as usize).saturating_sub(text.len()) / 2;
        write!(out, "{:padding$}", "")?;
        writeln!(out, "{text}")?;
        self.record_lines(1);
        out.flush()?;
        Ok(())
    }

    /// Center a multi-line block using one caller-supplied width.
    ///
    /// Every segment receives the padding `fixed_width` would need,
    /// regardless of its own length, so the block keeps a uniform left
    /// edge. The terminal width is re-queried per segment; a resize
    /// mid-print shifts the remainder of the block.
    pub fn print_block_centered(
        &mut self,
        out: &mut impl Write,
        text: &str,
        fixed_width: u16,
    ) -> Result<()> {
        let mut emitted = 0usize;
        for segment in line_segments(text) {
            let columns = self.columns();
            let padding = (columns as usize).saturating_sub(fixed_width as usize) / 2;
            write!(out, "{:padding$}", "")?;
            writeln!(out, "{segment}")?;
            emitted += 1;
        }
        self.record_lines(emitted);
        out.flush()?;
        Ok(())
    }

    /// Right-align a multi-line block `line_length` columns from the right
    /// edge.
    ///
    /// Width and cursor are sampled once at entry; the target column is
    /// fixed for the whole block and each segment is addressed absolutely,
    /// one row below the previous. An unanswerable cursor query starts the
    /// block at the origin.
    pub fn print_right_aligned(
        &mut self,
        out: &mut impl Write,
        text: &str,
        line_length: u16,
    ) -> Result<()> {
        let columns = self.columns();
        let mut position = self.terminal.cursor_position().unwrap_or_default();
        position.column = columns.saturating_sub(line_length);

        let mut emitted = 0usize;
        for segment in line_segments(text) {
            write!(out, "\x1b[{};{}H", position.row + 1, position.column + 1)?;
            writeln!(out, "{segment}")?;
            position = position.next_row();
            emitted += 1;
        }
        self.record_lines(emitted);
        out.flush()?;
        Ok(())
    }

    /// Emit a metrics snapshot through the configured logger.
    pub fn emit_metrics_snapshot(&self) {
        let (Some(logger), Some(metrics)) = (&self.config.logger, &self.config.metrics) else {
            return;
        };
        let snapshot = metrics.lock().expect("metrics mutex poisoned").snapshot();
        logger
            .log_event(snapshot.to_log_event(&self.config.metrics_target))
            .ok();
    }

    fn columns(&self) -> u16 {
        let queried = self.terminal.size().map(|size| size.width);
        let fell_back = queried.is_none();
        let columns = queried.unwrap_or(self.config.fallback_width);

        if let Some(metrics) = &self.config.metrics {
            metrics
                .lock()
                .expect("metrics mutex poisoned")
                .record_width_query(fell_back);
        }
        if fell_back {
            if let Some(logger) = &self.config.logger {
                logger
                    .log_event(event_with_fields(
                        LogLevel::Warn,
                        LOG_TARGET,
                        "width_fallback",
                        [json_kv("fallback_width", columns)],
                    ))
                    .ok();
            }
        }
        columns
    }

    fn record_lines(&self, count: usize) {
        if let Some(metrics) = &self.config.metrics {
            metrics
                .lock()
                .expect("metrics mutex poisoned")
                .record_lines(count);
        }
    }
}

/// Center `text` on the live terminal, writing to stdout.
pub fn print_centered(text: &str) -> Result<()> {
    AlignedWriter::with_default().print_centered(&mut io::stdout(), text)
}

/// Center a block on the live terminal at `fixed_width`, writing to stdout.
pub fn print_block_centered(text: &str, fixed_width: u16) -> Result<()> {
    AlignedWriter::with_default().print_block_centered(&mut io::stdout(), text, fixed_width)
}

/// Right-align a block on the live terminal, writing to stdout.
pub fn print_right_aligned(text: &str, line_length: u16) -> Result<()> {
    AlignedWriter::with_default().print_right_aligned(&mut io::stdout(), text, line_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Position, Size};
    use crate::logging::{LogEvent, LogSink, LoggingResult};
    use crate::terminal::StaticTerminal;
    use std::cell::Cell;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemorySink {
        events: Arc<Mutex<Vec<LogEvent>>>,
    }

    impl MemorySink {
        fn events(&self) -> Vec<LogEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl LogSink for MemorySink {
        fn log(&self, event: &LogEvent) -> LoggingResult<()> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    /// Width shrinks by `step` after every query, emulating a resize
    /// between block lines.
    struct ShrinkingTerminal {
        width: Cell<u16>,
        step: u16,
    }

    impl Terminal for ShrinkingTerminal {
        fn size(&self) -> Option<Size> {
            let width = self.width.get();
            self.width.set(width.saturating_sub(self.step));
            Some(Size::new(width, 24))
        }

        fn cursor_position(&self) -> Option<Position> {
            Some(Position::default())
        }
    }

    fn writer_at(width: u16) -> AlignedWriter<StaticTerminal> {
        AlignedWriter::new(StaticTerminal::with_size(width, 24), WriterConfig::default())
    }

    fn rendered(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn centered_pads_with_half_the_free_width() {
        let mut out = Vec::new();
        writer_at(80).print_centered(&mut out, "hello").unwrap();
        assert_eq!(rendered(&out), format!("{}hello\n", " ".repeat(37)));
    }

    #[test]
    fn centered_rounds_padding_down() {
        let mut out = Vec::new();
        writer_at(11).print_centered(&mut out, "even").unwrap();
        // (11 - 4) / 2 rounds down to 3.
        assert_eq!(rendered(&out), "   even\n");
    }

    #[test]
    fn centered_clamps_padding_for_oversized_text() {
        let mut out = Vec::new();
        writer_at(4).print_centered(&mut out, "overflow").unwrap();
        assert_eq!(rendered(&out), "overflow\n");
    }

    #[test]
    fn centered_falls_back_to_eighty_columns() {
        let mut writer =
            AlignedWriter::new(StaticTerminal::unavailable(), WriterConfig::default());
        let mut out = Vec::new();
        writer.print_centered(&mut out, "0123456789").unwrap();
        assert_eq!(rendered(&out), format!("{}0123456789\n", " ".repeat(35)));
    }

    #[test]
    fn centered_passes_embedded_newlines_through() {
        let mut out = Vec::new();
        writer_at(10).print_centered(&mut out, "a\nb").unwrap();
        // One padded line; what follows the newline lands flush left.
        assert_eq!(rendered(&out), "   a\nb\n");
    }

    #[test]
    fn block_pads_every_line_by_the_fixed_width() {
        let mut out = Vec::new();
        writer_at(80)
            .print_block_centered(&mut out, "a\nbb\nccc", 5)
            .unwrap();
        let pad = " ".repeat(37);
        assert_eq!(rendered(&out), format!("{pad}a\n{pad}bb\n{pad}ccc\n"));
    }

    #[test]
    fn block_requeries_width_between_lines() {
        let terminal = ShrinkingTerminal {
            width: Cell::new(11),
            step: 4,
        };
        let mut writer = AlignedWriter::new(terminal, WriterConfig::default());
        let mut out = Vec::new();
        writer.print_block_centered(&mut out, "x\ny", 1).unwrap();
        // (11 - 1) / 2 = 5 spaces, then (7 - 1) / 2 = 3 after the resize.
        assert_eq!(rendered(&out), "     x\n   y\n");
    }

    #[test]
    fn block_ignores_trailing_newline_and_keeps_interior_blanks() {
        let mut out = Vec::new();
        writer_at(9)
            .print_block_centered(&mut out, "a\n\nb\n", 3)
            .unwrap();
        assert_eq!(rendered(&out), "   a\n   \n   b\n");
    }

    #[test]
    fn block_clamps_when_fixed_width_exceeds_terminal() {
        let mut out = Vec::new();
        writer_at(4).print_block_centered(&mut out, "wide", 9).unwrap();
        assert_eq!(rendered(&out), "wide\n");
    }

    #[test]
    fn block_emits_nothing_for_empty_input() {
        let mut out = Vec::new();
        writer_at(80).print_block_centered(&mut out, "", 5).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn right_aligned_addresses_the_column_left_of_the_right_edge() {
        let mut writer =
            AlignedWriter::new(StaticTerminal::with_size(80, 24), WriterConfig::default());
        let mut out = Vec::new();
        writer.print_right_aligned(&mut out, "hi", 10).unwrap();
        assert_eq!(rendered(&out), "\x1b[1;71Hhi\n");
    }

    #[test]
    fn right_aligned_advances_one_row_per_line() {
        let terminal = StaticTerminal::with_size(80, 24).with_cursor(Position::new(4, 2));
        let mut writer = AlignedWriter::new(terminal, WriterConfig::default());
        let mut out = Vec::new();
        writer.print_right_aligned(&mut out, "one\ntwo", 10).unwrap();
        assert_eq!(rendered(&out), "\x1b[5;71Hone\n\x1b[6;71Htwo\n");
    }

    #[test]
    fn right_aligned_clamps_column_to_the_left_edge() {
        let mut writer =
            AlignedWriter::new(StaticTerminal::with_size(8, 24), WriterConfig::default());
        let mut out = Vec::new();
        writer.print_right_aligned(&mut out, "wide", 20).unwrap();
        assert_eq!(rendered(&out), "\x1b[1;1Hwide\n");
    }

    #[test]
    fn right_aligned_starts_at_origin_when_cursor_is_unknown() {
        let mut writer =
            AlignedWriter::new(StaticTerminal::unavailable(), WriterConfig::default());
        let mut out = Vec::new();
        writer.print_right_aligned(&mut out, "hi", 10).unwrap();
        // Fallback width 80 and origin row; column 70 either way.
        assert_eq!(rendered(&out), "\x1b[1;71Hhi\n");
    }

    #[test]
    fn width_fallback_is_logged_and_counted() {
        let sink = MemorySink::default();
        let mut config = WriterConfig {
            logger: Some(Logger::new(sink.clone())),
            ..WriterConfig::default()
        };
        config.enable_metrics();
        let handle = config.metrics_handle().unwrap();
        let mut writer = AlignedWriter::new(StaticTerminal::unavailable(), config);

        let mut out = Vec::new();
        writer.print_block_centered(&mut out, "a\nb", 1).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].level, LogLevel::Warn));
        assert_eq!(events[0].message, "width_fallback");
        assert_eq!(events[0].fields["fallback_width"], 80);

        let snapshot = handle.lock().unwrap().snapshot();
        assert_eq!(snapshot.width_queries, 2);
        assert_eq!(snapshot.width_fallbacks, 2);
        assert_eq!(snapshot.lines_emitted, 2);
    }

    #[test]
    fn metrics_snapshot_emission_uses_the_configured_target() {
        let sink = MemorySink::default();
        let mut config = WriterConfig {
            logger: Some(Logger::new(sink.clone())),
            metrics_target: "test::metrics".to_string(),
            ..WriterConfig::default()
        };
        config.enable_metrics();
        let mut writer = AlignedWriter::new(StaticTerminal::with_size(40, 12), config);

        let mut out = Vec::new();
        writer.print_centered(&mut out, "hi").unwrap();
        writer.emit_metrics_snapshot();

        let events = sink.events();
        let last = events.last().unwrap();
        assert_eq!(last.target, "test::metrics");
        assert_eq!(last.message, "writer_metrics");
        assert_eq!(last.fields["lines_emitted"], 1);
    }
}
