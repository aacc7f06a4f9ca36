//! Console text alignment driven by live terminal width queries.
//!
//! [`AlignedWriter`] centers single lines and fixed-width blocks and can
//! right-align a block at a fixed offset from the right edge. Every
//! alignment decision reads the terminal's current column count through
//! the [`Terminal`] capability, so the code stays testable against a
//! static backend. A terminal that cannot answer falls back to a
//! configured width, 80 columns by default.

pub mod align;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod metrics;
pub mod terminal;
pub mod text;

pub use align::{
    AlignedWriter, DEFAULT_FALLBACK_WIDTH, WriterConfig, print_block_centered, print_centered,
    print_right_aligned,
};
pub use error::{AlignError, Result};
pub use geometry::{Position, Size};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    event_with_fields, json_kv,
};
pub use metrics::{MetricsSnapshot, WriterMetrics};
pub use terminal::{OsTerminal, StaticTerminal, Terminal};
pub use text::{LineSegments, line_segments};
