//! Alignment module orchestrator.
//!
//! Downstream code imports the writer, its configuration, and the
//! stdout convenience functions from here while the implementation
//! details live in the private `core` module.

mod core;

pub use core::{
    AlignedWriter, DEFAULT_FALLBACK_WIDTH, WriterConfig, print_block_centered, print_centered,
    print_right_aligned,
};
