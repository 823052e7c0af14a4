//! Line-oriented prompting over any `BufRead`/`Write` pair.
//!
//! The interactive session and the survey take a [`Prompter`] rather than
//! stdin/stdout so that scripted input can drive them in tests.

use std::io::{self, BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Print `question` and read one trimmed line. `None` on end of input.
    pub fn line(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.out, "{question}")?;
        self.out.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer, printing each rejection.
    /// `None` on end of input.
    pub fn ask<T>(
        &mut self,
        question: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.line(question)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(reason) => writeln!(self.out, "  ✗ {reason}")?,
            }
        }
    }

    /// Ask for an integer in `min..=max`.
    pub fn number(&mut self, question: &str, min: i64, max: i64) -> io::Result<Option<i64>> {
        self.ask(question, |answer| match answer.parse::<i64>() {
            Ok(n) if (min..=max).contains(&n) => Ok(n),
            Ok(_) => Err(format!("Please enter a number between {min} and {max}")),
            Err(_) => Err("Invalid input. Please enter a number.".into()),
        })
    }

    /// Like [`number`](Self::number), but an empty answer picks `default`.
    pub fn number_or(
        &mut self,
        question: &str,
        min: i64,
        max: i64,
        default: i64,
    ) -> io::Result<Option<i64>> {
        self.ask(question, |answer| {
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<i64>() {
                Ok(n) if (min..=max).contains(&n) => Ok(n),
                Ok(_) => Err(format!("Please enter a number between {min} and {max}")),
                Err(_) => Err("Invalid input. Please enter a number.".into()),
            }
        })
    }

    /// Present a numbered list and return the chosen index.
    pub fn choose(&mut self, title: &str, options: &[&str]) -> io::Result<Option<usize>> {
        writeln!(self.out, "{title}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.out, "  {}. {option}", i + 1)?;
        }
        let pick = self.number("Enter number: ", 1, options.len() as i64)?;
        Ok(pick.map(|n| n as usize - 1))
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}
