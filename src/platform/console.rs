//! Line-based console

use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Where prompts go and answers come from
pub trait Console {
    /// Next input line without its line ending, `None` once input is closed
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Print one line of output
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// Line reader/writer pair, by default the process stdin/stdout
///
/// Stdin stays locked for the lifetime of the value.
pub struct Terminal<R = StdinLock<'static>, W = Stdout> {
    input: R,
    output: W,
}

impl Terminal {
    pub fn new() -> Self {
        Self::with_io(io::stdin().lock(), io::stdout())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn with_io(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Everything written so far goes here
    pub fn writer(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    /// Bytes that are not UTF-8 come through as U+FFFD, so they fail to
    /// parse like any other bad token instead of ending the game
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")?;
        self.output.flush()
    }
}

/// In-memory console fed from a script, capturing everything printed
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    /// Lines printed so far
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Unread script lines
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}
