use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use crate::clipboard::{ClipboardBackend, ClipboardError, ClipboardSession};

/// Overrides clipboard tool detection, e.g. `CLIPBOARD_COMMAND="xsel -ib"`.
const CLIPBOARD_COMMAND_VAR: &str = "CLIPBOARD_COMMAND";

pub struct OS;

impl OS {
    /// Home directory of the current user.
    pub fn user_profile_dir() -> Option<PathBuf> {
        env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
    }

    pub(crate) fn clipboard_backend() -> Result<PipeClipboard, ClipboardError> {
        PipeClipboard::detect()
    }
}

/// Clipboard transport that pipes text into an external helper
/// (`wl-copy`, `xclip`, or a user supplied command).
pub(crate) struct PipeClipboard {
    program: String,
    args: Vec<String>,
}

impl PipeClipboard {
    fn detect() -> Result<Self, ClipboardError> {
        if let Ok(cmd) = env::var(CLIPBOARD_COMMAND_VAR) {
            return Self::from_command_line(&cmd);
        }
        if env::var_os("WAYLAND_DISPLAY").is_some() {
            return Ok(Self {
                program: "wl-copy".into(),
                args: vec!["--type".into(), "text/plain;charset=utf-8".into()],
            });
        }
        if env::var_os("DISPLAY").is_some() {
            return Ok(Self {
                program: "xclip".into(),
                args: vec!["-selection".into(), "clipboard".into(), "-in".into()],
            });
        }
        Err(ClipboardError::Unsupported(format!(
            "neither WAYLAND_DISPLAY nor DISPLAY is set; set {CLIPBOARD_COMMAND_VAR} to a command reading stdin"
        )))
    }

    fn from_command_line(cmd: &str) -> Result<Self, ClipboardError> {
        let mut parts = shlex::split(cmd)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                ClipboardError::Unsupported(format!("cannot parse {CLIPBOARD_COMMAND_VAR}={cmd:?}"))
            })?
            .into_iter();
        let program = parts.next().ok_or_else(|| {
            ClipboardError::Unsupported(format!("{CLIPBOARD_COMMAND_VAR} is empty"))
        })?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl ClipboardBackend for PipeClipboard {
    type Session = PipeSession;

    fn try_open(&mut self) -> Result<Option<PipeSession>, ClipboardError> {
        // The helpers fork to serve the selection; their output is not ours to read.
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => Ok(Some(PipeSession {
                child,
                program: self.program.clone(),
                finished: false,
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ClipboardError::Unsupported(
                format!("`{}` is not installed", self.program),
            )),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                tracing::debug!(program = %self.program, error = %e, "clipboard helper busy");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub(crate) struct PipeSession {
    child: Child,
    program: String,
    finished: bool,
}

impl ClipboardSession for PipeSession {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stdin = self.child.stdin.take().ok_or_else(|| ClipboardError::Api {
            call: "stdin",
            message: format!("`{}` has no stdin pipe", self.program),
        })?;
        stdin.write_all(text.as_bytes())?;
        drop(stdin);

        let status = self.child.wait()?;
        self.finished = true;
        if !status.success() {
            return Err(ClipboardError::Api {
                call: "clipboard helper",
                message: format!("`{}` exited with {}", self.program, status),
            });
        }
        Ok(())
    }
}

impl Drop for PipeSession {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{RetryPolicy, copy_text};

    #[test]
    fn parses_custom_command_line() {
        let clip = PipeClipboard::from_command_line("xsel --clipboard --input").unwrap();
        assert_eq!(clip.program, "xsel");
        assert_eq!(clip.args, vec!["--clipboard", "--input"]);
    }

    #[test]
    fn rejects_empty_command_line() {
        assert!(PipeClipboard::from_command_line("   ").is_err());
        assert!(PipeClipboard::from_command_line("\"unterminated").is_err());
    }

    #[test]
    fn missing_helper_is_reported_as_unsupported() {
        let mut clip = PipeClipboard {
            program: "definitely-not-a-clipboard-tool-7f3a".into(),
            args: Vec::new(),
        };
        let err = copy_text(&mut clip, "x", &RetryPolicy::default()).unwrap_err();
        assert!(matches!(err, ClipboardError::Unsupported(_)));
    }

    #[test]
    fn pipes_text_through_helper() {
        let dir = std::env::temp_dir().join(format!("os_api_clip_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.join("clip.txt");

        let mut clip = PipeClipboard {
            program: "sh".into(),
            args: vec!["-c".into(), format!("cat > '{}'", out.display())],
        };
        copy_text(&mut clip, "1:00.000\n0:59.999\n", &RetryPolicy::default()).unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "1:00.000\n0:59.999\n");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn failing_helper_is_an_error() {
        let mut clip = PipeClipboard {
            program: "sh".into(),
            args: vec!["-c".into(), "cat > /dev/null; exit 3".into()],
        };
        let err = copy_text(&mut clip, "x", &RetryPolicy::default()).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }
}
