//! Utility modules for figpress
//!
//! - `css` - background CSS from raw paints
//! - `tokens` - token accounting for compressed output
//! - `clipboard` - copying output for pasting into a prompt

pub mod clipboard;
pub mod css;
pub mod tokens;
