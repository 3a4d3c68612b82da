//! Test utilities for CLI testing
//!
//! Provides a scripted prompter and helpers for building throwaway logs.

use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use sleeplog_core::{RecordStore, SleepLog};
use tempfile::TempDir;

use crate::prompt::Prompter;

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    Select(usize),
}

/// Prompter that replays canned answers and records every prompt it saw.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("script exhausted at prompt '{}'", prompt))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(text),
            other => Err(anyhow!("expected text for '{}', got {:?}", prompt, other)),
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(anyhow!("expected confirm for '{}', got {:?}", prompt, other)),
        }
    }

    fn select(&mut self, prompt: &str, _items: &[&str]) -> Result<usize> {
        match self.next(prompt)? {
            Answer::Select(index) => Ok(index),
            other => Err(anyhow!("expected selection for '{}', got {:?}", prompt, other)),
        }
    }
}

pub fn text(s: &str) -> Answer {
    Answer::Text(s.to_string())
}

/// Empty sleep log in a fresh temp directory; keep the `TempDir` alive.
pub fn temp_log() -> (TempDir, SleepLog) {
    let dir = TempDir::new().expect("create temp dir");
    let store = RecordStore::new(dir.path().join("sleep_records.csv"));
    let log = SleepLog::open(store).expect("open empty log");
    (dir, log)
}
