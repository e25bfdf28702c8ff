use std::thread;
use std::time::{Duration, Instant};

/// Errors raised while publishing text to the system clipboard.
#[derive(Debug)]
pub enum ClipboardError {
    /// Another process kept the clipboard for the whole retry budget.
    Busy { waited: Duration },
    /// A platform call failed.
    Api { call: &'static str, message: String },
    /// No usable clipboard transport exists in this session.
    Unsupported(String),
    Io(std::io::Error),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Busy { waited } => write!(
                f,
                "clipboard is held by another application (gave up after {} ms)",
                waited.as_millis()
            ),
            ClipboardError::Api { call, message } => write!(f, "{call} failed: {message}"),
            ClipboardError::Unsupported(s) => write!(f, "clipboard unavailable: {s}"),
            ClipboardError::Io(e) => write!(f, "clipboard i/o error: {e}"),
        }
    }
}

impl std::error::Error for ClipboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClipboardError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClipboardError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// How long to keep polling for clipboard ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(500),
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// An open clipboard. Dropping it releases the clipboard.
pub trait ClipboardSession {
    /// Replaces the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// A way to acquire the clipboard.
pub trait ClipboardBackend {
    type Session: ClipboardSession;

    /// Makes one attempt to open the clipboard.
    ///
    /// Returns `Ok(None)` when another process currently owns it and the
    /// attempt may be repeated.
    fn try_open(&mut self) -> Result<Option<Self::Session>, ClipboardError>;
}

/// Opens the clipboard, polling while it is held elsewhere.
///
/// At least one attempt is always made, even with a zero timeout.
pub fn open_with_retry<B: ClipboardBackend>(
    backend: &mut B,
    policy: &RetryPolicy,
) -> Result<B::Session, ClipboardError> {
    let started = Instant::now();
    let deadline = started + policy.timeout;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        if let Some(session) = backend.try_open()? {
            if attempts > 1 {
                tracing::debug!(attempts, "clipboard opened after retrying");
            }
            return Ok(session);
        }

        let now = Instant::now();
        if now >= deadline {
            tracing::warn!(attempts, "clipboard stayed busy, giving up");
            return Err(ClipboardError::Busy {
                waited: now - started,
            });
        }
        thread::sleep(policy.poll_interval.min(deadline - now));
    }
}

/// Puts `text` on the clipboard.
///
/// The session is dropped on every path, so the clipboard is released even
/// when the write fails.
pub fn copy_text<B: ClipboardBackend>(
    backend: &mut B,
    text: &str,
    policy: &RetryPolicy,
) -> Result<(), ClipboardError> {
    let mut session = open_with_retry(backend, policy)?;
    session.write_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeBackend {
        busy_for: usize,
        attempts: usize,
        fail_write: bool,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl FakeBackend {
        fn new(busy_for: usize) -> Self {
            Self {
                busy_for,
                attempts: 0,
                fail_write: false,
                events: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    struct FakeSession {
        fail_write: bool,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ClipboardBackend for FakeBackend {
        type Session = FakeSession;

        fn try_open(&mut self) -> Result<Option<FakeSession>, ClipboardError> {
            self.attempts += 1;
            if self.attempts <= self.busy_for {
                return Ok(None);
            }
            self.events.borrow_mut().push("open".into());
            Ok(Some(FakeSession {
                fail_write: self.fail_write,
                events: Rc::clone(&self.events),
            }))
        }
    }

    impl ClipboardSession for FakeSession {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail_write {
                return Err(ClipboardError::Api {
                    call: "SetClipboardData",
                    message: "access denied".into(),
                });
            }
            self.events.borrow_mut().push(format!("write:{text}"));
            Ok(())
        }
    }

    impl Drop for FakeSession {
        fn drop(&mut self) {
            self.events.borrow_mut().push("close".into());
        }
    }

    fn fast_policy(timeout_ms: u64) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(1),
        }
    }

    #[test]
    fn default_policy_matches_half_second_budget() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.timeout, Duration::from_millis(500));
        assert_eq!(policy.poll_interval, Duration::from_millis(10));
    }

    #[test]
    fn retries_until_clipboard_is_released() {
        let mut backend = FakeBackend::new(3);
        copy_text(&mut backend, "0:10.000\n", &fast_policy(500)).unwrap();

        assert_eq!(backend.attempts, 4);
        assert_eq!(
            *backend.events.borrow(),
            vec!["open", "write:0:10.000\n", "close"]
        );
    }

    #[test]
    fn gives_up_after_timeout() {
        let mut backend = FakeBackend::new(usize::MAX);
        let started = Instant::now();
        let err = copy_text(&mut backend, "x", &fast_policy(30)).unwrap_err();

        assert!(matches!(err, ClipboardError::Busy { .. }));
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert!(backend.attempts > 1);
        assert!(backend.events.borrow().is_empty());
    }

    #[test]
    fn zero_timeout_still_tries_once() {
        let mut backend = FakeBackend::new(0);
        copy_text(&mut backend, "a", &fast_policy(0)).unwrap();
        assert_eq!(backend.attempts, 1);
    }

    #[test]
    fn failed_write_still_releases_clipboard() {
        let mut backend = FakeBackend::new(0);
        backend.fail_write = true;

        let err = copy_text(&mut backend, "a", &fast_policy(10)).unwrap_err();

        assert!(err.to_string().contains("SetClipboardData"));
        assert_eq!(*backend.events.borrow(), vec!["open", "close"]);
    }
}
