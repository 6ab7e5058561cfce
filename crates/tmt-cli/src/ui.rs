//! Operator-facing messages on stderr, styled with a colored badge.

use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};

pub fn error(msg: &str) {
    eprintln!("{} {msg}", " X ".black().on_red());
}

pub fn warn(msg: &str) {
    eprintln!("{} {msg}", " ! ".black().on_yellow());
}

/// Print `prompt` and read one line of input from stdin.
pub fn ask(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{} {prompt} ", " ? ".black().on_blue())?;
    stderr.flush()?;

    read_answer(&mut io::stdin().lock())
}

/// Read one line, failing with `UnexpectedEof` if input is already closed.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no answer: input closed",
        ));
    }
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

/// Any answer containing a lowercase `y` counts as yes.
pub fn is_yes(answer: &str) -> bool {
    answer.contains('y')
}
