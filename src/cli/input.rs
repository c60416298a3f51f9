use std::io::{self, BufRead, Write};

use dialoguer::{theme::ColorfulTheme, Input};

/// Where the session reads its answers from.
pub trait InputSource {
    /// Shows `prompt` and reads one trimmed answer. `Ok(None)` means input is
    /// closed and nothing more will arrive.
    fn read_value(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Interactive prompts for a real terminal.
pub struct TerminalInput {
    theme: ColorfulTheme,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    fn read_value(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();

        match answer {
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }
}

/// Plain line-by-line input, for piped stdin and scripted sessions.
pub struct LineInput<R, P> {
    reader: R,
    prompt_out: P,
}

impl<R: BufRead, P: Write> LineInput<R, P> {
    pub fn new(reader: R, prompt_out: P) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, P: Write> InputSource for LineInput<R, P> {
    fn read_value(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.prompt_out, "{}: ", prompt)?;
        self.prompt_out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
