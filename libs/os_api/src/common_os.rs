use crate::clipboard::{ClipboardError, RetryPolicy, copy_text};

impl crate::OS {
    /// Places `text` on the clipboard of the current user session.
    ///
    /// Polls for clipboard ownership according to `policy`. Every handle,
    /// lock and window acquired for the write is released before returning.
    pub fn set_clipboard_text(text: &str, policy: &RetryPolicy) -> Result<(), ClipboardError> {
        let mut backend = crate::OS::clipboard_backend()?;
        tracing::debug!(bytes = text.len(), "writing clipboard");
        copy_text(&mut backend, text, policy)
    }
}
