//! Line-based console I/O for the interactive menu.

use std::{
    fmt::Display,
    io::{BufRead, Stdin, Stdout, Write, stdin, stdout},
};

use anyhow::{Context, Result};

/// Answers accepted as "yes" (case-insensitive), including Portuguese ones.
const YES_ANSWERS: &[&str] = &["y", "yes", "s", "sim"];

/// Reads answers from `input` and writes prompts and reports to `output`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<std::io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let input: Stdin = stdin();
        Self::new(input.lock(), stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").context("Failed to write to console")
    }

    /// Show `prompt` and read one trimmed line; `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").context("Failed to write to console")?;
        self.output.flush().context("Failed to flush console")?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read from console")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask a yes/no question. An empty answer or end of input takes `default`.
    pub fn ask_yes_no(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = self.ask(&format!("{question} [{hint}]: "))?;
        Ok(match answer.as_deref() {
            None | Some("") => default,
            Some(answer) => is_yes(answer),
        })
    }

    /// Wait for Enter.
    pub fn pause(&mut self, prompt: &str) -> Result<()> {
        self.ask(prompt).map(drop)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn is_yes(answer: &str) -> bool {
    YES_ANSWERS.iter().any(|yes| answer.eq_ignore_ascii_case(yes))
}
