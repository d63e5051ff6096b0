//! Presentation-neutral settings shared across layers.

mod output_format;

pub use output_format::OutputFormat;
