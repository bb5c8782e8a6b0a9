//! System clipboard access
//!
//! The clipboard is an optional capability: on headless terminals binding
//! fails, and copy actions then surface the failure alert instead of
//! silently doing nothing.

use crate::services::Binding;
use anyhow::Result;

pub struct ClipboardService {
    clipboard: arboard::Clipboard,
}

impl std::fmt::Debug for ClipboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClipboardService")
    }
}

impl ClipboardService {
    /// Bind the system clipboard, stating the outcome explicitly
    pub fn bind() -> Binding<ClipboardService> {
        match arboard::Clipboard::new() {
            Ok(clipboard) => Binding::Bound(ClipboardService { clipboard }),
            Err(e) => {
                tracing::warn!("clipboard unavailable: {e}");
                Binding::Absent
            }
        }
    }

    pub fn copy(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text.to_string())?;
        Ok(())
    }
}
