//! Blocking console dialogs.
//!
//! The front-end talks to the user exclusively through these
//! request/response calls. A prompt suspends the event loop until it is
//! answered, which preserves the modal discipline of a windowed form, and
//! the generic reader/writer pair lets tests script whole sessions.

use std::io::{self, BufRead, Write};

/// A console bound to a line-based reader and a writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Blocking prompt; returns the trimmed answer. A closed input stream
    /// yields [`io::ErrorKind::UnexpectedEof`], the window-close analog.
    pub fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(answer.trim().to_string())
    }

    /// Prompt showing the current value; an empty answer keeps it.
    pub fn prompt_with_default(&mut self, label: &str, current: &str) -> io::Result<String> {
        let answer = self.prompt(&format!("{label} [{current}]"))?;
        Ok(if answer.is_empty() {
            current.to_string()
        } else {
            answer
        })
    }

    /// Blocking informational notification.
    pub fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\n  {message}\n")
    }

    /// Blocking error notification.
    pub fn notify_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\n  ERROR: {message}\n")
    }

    /// Hold a modal open until the user dismisses it.
    pub fn pause(&mut self) -> io::Result<()> {
        write!(self.output, "Press Enter to continue... ")?;
        self.output.flush()?;

        let mut dismissed = String::new();
        self.input.read_line(&mut dismissed)?;
        Ok(())
    }
}
