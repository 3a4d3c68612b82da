//! User prompting
//!
//! The menu talks to the user only through [`Prompter`], so it can be driven
//! by a terminal or by scripted answers.

use std::io::{self, BufRead, IsTerminal, Stderr, StdinLock, Write};

use anyhow::{bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

/// Source of interactive answers
pub trait Prompter {
    /// Ask for a line of free text; may be empty.
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Ask a yes/no question; anything but an explicit yes is a no.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Pick one of `items`, returning its index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize>;

    /// Wait for the user to acknowledge before continuing.
    fn pause(&mut self, prompt: &str) -> Result<()> {
        self.input(prompt).map(|_| ())
    }
}

/// Prompter backed by the controlling terminal
///
/// Falls back to [`LinePrompter`] over stdin and stderr when stdin is not a
/// terminal, so answers can be piped in.
pub struct TerminalPrompter {
    mode: Mode,
}

enum Mode {
    Interactive(ColorfulTheme),
    Lines(LinePrompter<StdinLock<'static>, Stderr>),
}

impl TerminalPrompter {
    pub fn new() -> Self {
        let mode = if io::stdin().is_terminal() {
            Mode::Interactive(ColorfulTheme::default())
        } else {
            Mode::Lines(LinePrompter::new(io::stdin().lock(), io::stderr()))
        };
        Self { mode }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        match &mut self.mode {
            Mode::Interactive(theme) => Input::<String>::with_theme(&*theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .context("Failed to read input"),
            Mode::Lines(lines) => lines.input(prompt),
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        match &mut self.mode {
            Mode::Interactive(theme) => Confirm::with_theme(&*theme)
                .with_prompt(prompt)
                .default(false)
                .interact()
                .context("Failed to read confirmation"),
            Mode::Lines(lines) => lines.confirm(prompt),
        }
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        match &mut self.mode {
            Mode::Interactive(theme) => Select::with_theme(&*theme)
                .with_prompt(prompt)
                .items(items)
                .default(0)
                .interact()
                .context("Failed to read selection"),
            Mode::Lines(lines) => lines.select(prompt, items),
        }
    }
}

/// Plain line-oriented prompter
///
/// Menus are printed as numbered lists and answered by number; confirmation
/// accepts `y` or `yes`. End of input is an error.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{}: ", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Input ended while waiting for '{}'", prompt);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn input(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{} [y/N]", prompt))?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        loop {
            writeln!(self.writer, "{}", prompt)?;
            for (i, item) in items.iter().enumerate() {
                writeln!(self.writer, "  {}. {}", i + 1, item)?;
            }

            let answer = self.read_line("Choice")?;
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.writer, "Invalid choice, try again")?,
            }
        }
    }
}
