//! Operator prompt abstraction for interactive input.
//!
//! Everything that reads from the terminal (manual weather entry, diary
//! content, overwrite confirmation, setup answers) goes through the
//! [`OperatorPrompt`] trait, so workflows can be driven by canned answers in
//! tests instead of real terminal I/O.

use crate::errors::{AppError, AppResult};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

/// Trait defining the interface for interactive operator input.
///
/// # Examples
///
/// ```
/// use joplin_diary::prompt::{OperatorPrompt, ScriptedPrompt};
///
/// let prompt = ScriptedPrompt::new(vec!["Sunny +21°C"]);
/// let answer = prompt.ask("Weather? ").unwrap();
/// assert_eq!(answer, "Sunny +21°C");
/// ```
pub trait OperatorPrompt {
    /// Shows `message` and reads one line of input, without the line ending.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cancelled` if input ends before an answer is given.
    fn ask(&self, message: &str) -> AppResult<String>;

    /// Like [`ask`](OperatorPrompt::ask) but the typed text is not echoed.
    fn ask_secret(&self, message: &str) -> AppResult<String> {
        self.ask(message)
    }

    /// Reads one raw line with no prompt; `None` at end of input.
    fn read_line(&self) -> AppResult<Option<String>>;
}

/// Reads from standard input and writes prompts to standard output.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl OperatorPrompt for TerminalPrompt {
    fn ask(&self, message: &str) -> AppResult<String> {
        print!("{}", message);
        io::stdout().flush()?;
        self.read_line()?.ok_or(AppError::Cancelled)
    }

    fn ask_secret(&self, message: &str) -> AppResult<String> {
        rpassword::prompt_password(message).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => AppError::Cancelled,
            _ => AppError::Io(e),
        })
    }

    fn read_line(&self) -> AppResult<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Replays canned answers in order; for tests and scripted runs.
///
/// Running out of answers behaves like end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompt {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Prompt messages shown so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked
            .lock()
            .map(|asked| asked.clone())
            .unwrap_or_default()
    }

    /// Number of answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or_default()
    }

    fn next_answer(&self) -> Option<String> {
        self.answers.lock().ok()?.pop_front()
    }
}

impl OperatorPrompt for ScriptedPrompt {
    fn ask(&self, message: &str) -> AppResult<String> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(message.to_string());
        }
        self.next_answer().ok_or(AppError::Cancelled)
    }

    fn read_line(&self) -> AppResult<Option<String>> {
        Ok(self.next_answer())
    }
}

/// Asks a yes/no question where only `y` (any case) means yes.
///
/// End of input counts as no.
pub fn confirm(prompt: &dyn OperatorPrompt, question: &str) -> AppResult<bool> {
    match prompt.ask(question) {
        Ok(answer) => Ok(answer.trim().eq_ignore_ascii_case("y")),
        Err(AppError::Cancelled) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Collects free-form diary content.
///
/// Lines are read until two consecutive empty lines; those two are dropped.
/// End of input also finishes the capture, so content can be piped in.
pub fn capture_content(prompt: &dyn OperatorPrompt) -> AppResult<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut empty_run = 0;

    while empty_run < 2 {
        let Some(line) = prompt.read_line()? else {
            break;
        };
        if line.is_empty() {
            empty_run += 1;
        } else {
            empty_run = 0;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|line| line.is_empty()) && empty_run > 0 {
        lines.pop();
        empty_run -= 1;
    }

    Ok(lines.join("\n"))
}
