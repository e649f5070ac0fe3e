pub mod config;
pub mod core;
pub mod fetch;
pub mod format;
pub mod logging;
pub mod runner;
pub mod utils;

// Re-export key items for convenience
pub use config::{FigpressConfig, OutputFormat};
pub use self::core::{CompactNode, CompressOptions, Compressor, compress};
pub use fetch::{DocumentSource, FetchError, FigmaLocation};
pub use runner::{RunEvent, RunSummary, run, run_pipeline};
