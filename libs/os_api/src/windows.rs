use std::env;
use std::mem::size_of;
use std::path::PathBuf;
use std::ptr;

use windows::Win32::Foundation::{GlobalFree, HANDLE, HGLOBAL, HWND};
use windows::Win32::System::DataExchange::{
    CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
};
use windows::Win32::System::Memory::{GMEM_MOVEABLE, GlobalAlloc, GlobalLock, GlobalUnlock};
use windows::Win32::System::Ole::CF_UNICODETEXT;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, WINDOW_EX_STYLE, WINDOW_STYLE,
};
use windows::core::{PCWSTR, w};

use crate::clipboard::{ClipboardBackend, ClipboardError, ClipboardSession};

fn api_error(call: &'static str) -> impl FnOnce(windows::core::Error) -> ClipboardError {
    move |e| ClipboardError::Api {
        call,
        message: e.to_string(),
    }
}

// ---- tiny RAII helpers ----
struct WindowGuard(HWND);
impl Drop for WindowGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.0);
        }
    }
}

// Freed on drop unless ownership was handed to the clipboard.
struct GlobalGuard(HGLOBAL);
impl GlobalGuard {
    fn into_raw(self) -> HGLOBAL {
        let h = self.0;
        std::mem::forget(self);
        h
    }
}
impl Drop for GlobalGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = GlobalFree(Some(self.0));
        }
    }
}

pub struct OS;

impl OS {
    /// `%USERPROFILE%` of the current user.
    pub fn user_profile_dir() -> Option<PathBuf> {
        env::var_os("USERPROFILE")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    pub(crate) fn clipboard_backend() -> Result<Win32Clipboard, ClipboardError> {
        Win32Clipboard::new()
    }

    fn to_wide_z(s: &str) -> Vec<u16> {
        s.encode_utf16().chain([0]).collect()
    }
}

/// Win32 clipboard access through a hidden owner window.
pub(crate) struct Win32Clipboard {
    window: WindowGuard,
}

impl Win32Clipboard {
    fn new() -> Result<Self, ClipboardError> {
        // Only the hwnd matters, so the predefined STATIC class is enough.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                w!("STATIC"),
                PCWSTR::null(),
                WINDOW_STYLE(0),
                0,
                0,
                0,
                0,
                None,
                None,
                None,
                None,
            )
        }
        .map_err(api_error("CreateWindowExW"))?;

        Ok(Self {
            window: WindowGuard(hwnd),
        })
    }
}

impl ClipboardBackend for Win32Clipboard {
    type Session = OpenClipboardGuard;

    fn try_open(&mut self) -> Result<Option<OpenClipboardGuard>, ClipboardError> {
        match unsafe { OpenClipboard(Some(self.window.0)) } {
            Ok(()) => Ok(Some(OpenClipboardGuard)),
            // Held by another process, worth another try.
            Err(e) => {
                tracing::trace!(error = %e, "OpenClipboard failed");
                Ok(None)
            }
        }
    }
}

pub(crate) struct OpenClipboardGuard;

impl ClipboardSession for OpenClipboardGuard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        unsafe { EmptyClipboard() }.map_err(api_error("EmptyClipboard"))?;
        if text.is_empty() {
            return Ok(());
        }

        let wide = OS::to_wide_z(text);
        unsafe {
            let mem = GlobalGuard(
                GlobalAlloc(GMEM_MOVEABLE, wide.len() * size_of::<u16>())
                    .map_err(api_error("GlobalAlloc"))?,
            );

            let dst = GlobalLock(mem.0) as *mut u16;
            if dst.is_null() {
                return Err(ClipboardError::Api {
                    call: "GlobalLock",
                    message: std::io::Error::last_os_error().to_string(),
                });
            }
            ptr::copy_nonoverlapping(wide.as_ptr(), dst, wide.len());
            // Reports an error once the lock count drops to zero, which is the expected outcome.
            let _ = GlobalUnlock(mem.0);

            SetClipboardData(u32::from(CF_UNICODETEXT.0), Some(HANDLE(mem.0.0)))
                .map_err(api_error("SetClipboardData"))?;
            // The system owns the memory from here on.
            let _ = mem.into_raw();
        }
        Ok(())
    }
}

impl Drop for OpenClipboardGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseClipboard();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_buffer_is_nul_terminated_and_lossless() {
        let text = "0:10.000\nÜberholt ✓\n";
        let wide = OS::to_wide_z(text);
        assert_eq!(wide.last(), Some(&0));
        assert_eq!(String::from_utf16(&wide[..wide.len() - 1]).unwrap(), text);
    }
}
