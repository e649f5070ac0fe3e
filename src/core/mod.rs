//! Core module for figpress
//!
//! This module contains the compact tree types, the key dictionaries and the
//! compression engine.

pub mod color;
pub mod compressor;
pub mod keys;
mod types;

pub use color::HexColor;
pub use compressor::{CompressOptions, CompressionStats, Compressor, compress};
pub use keys::CompactKey;
pub use types::*;
