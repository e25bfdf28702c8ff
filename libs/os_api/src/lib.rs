mod clipboard;
mod common_os;
pub use clipboard::{
    ClipboardBackend, ClipboardError, ClipboardSession, RetryPolicy, copy_text, open_with_retry,
};

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "linux")]
mod linux;

// Platform implementation exported under one name
#[cfg(target_os = "windows")]
pub use windows::OS;
#[cfg(target_os = "linux")]
pub use linux::OS;
