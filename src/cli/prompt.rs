use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::i18n::Messages;

pub(crate) struct Prompt<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    messages: &'a Messages,
}

impl<'a> Prompt<'a> {
    pub(crate) fn new(
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
        messages: &'a Messages,
    ) -> Self {
        Self {
            input,
            output,
            messages,
        }
    }

    /// Reads one line. Blank input yields `default`, or an empty string.
    pub(crate) fn prompt_text(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        let prompt = format_prompt(label, default);
        let mut line = String::new();
        write!(self.output, "{prompt}")
            .with_context(|| self.messages.error_prompt_write_failed())?;
        self.output
            .flush()
            .with_context(|| self.messages.error_prompt_flush_failed())?;
        self.input
            .read_line(&mut line)
            .with_context(|| self.messages.error_prompt_read_failed())?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty()
            && let Some(value) = default
        {
            return Ok(value.to_string());
        }
        Ok(trimmed.to_string())
    }
}

fn format_prompt(label: &str, default: Option<&str>) -> String {
    match default {
        Some(value) => format!("{label} [{value}]: "),
        None => format!("{label}: "),
    }
}
