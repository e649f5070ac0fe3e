use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copies rendered output so it can be pasted straight into a chat prompt.
pub fn copy_to_clipboard(content: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
    clipboard
        .set_text(content)
        .context("Failed to set clipboard text")?;
    tracing::debug!(bytes = content.len(), "copied output to clipboard");
    Ok(())
}
