//! Console I/O for the menu.
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `name: `
//! - Feedback: short sentences: `Created category 'Work'.`
//! - `None` from a prompt means the user backed out (Esc, Ctrl-D, end of input)

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, InquireError, Text};
use std::io::{self, BufRead, Write};

/// Line-oriented prompt/response channel.
pub trait Console {
    /// Show `label` and read one raw line, without its line ending.
    fn prompt(&mut self, label: &str) -> Result<Option<String>>;

    /// Print one line of output.
    fn say(&mut self, line: &str);

    fn clear(&mut self) {}
}

/// Interactive terminal console backed by inquire.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for TerminalConsole {
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        let result = Text::new(label)
            .with_render_config(minimal_render_config())
            .prompt_skippable();

        match result {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn clear(&mut self) {
        // If this fails, continue anyway (degraded but functional)
        let _ = clear_screen();
    }
}

/// Console over any reader/writer pair. Used for piped input and tests.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn say(&mut self, line: &str) {
        let _ = writeln!(self.output, "{}", line);
    }
}

/// Clear the screen and move cursor to top-left
pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Minimal render config: no prompt prefix decorations
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}
