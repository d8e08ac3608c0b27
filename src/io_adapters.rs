use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Result as IoResult, Write};
use std::path::Path;
use std::rc::Rc;

/// Where the interpreter gets its input lines from.
pub trait LineSource {
    /// Returns the next line without its trailing newline, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Reads lines from any buffered reader, optionally printing a prompt first.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub struct ReaderSource<R> {
    reader: R,
    prompt: Option<(String, Box<dyn Write>)>,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    /// A source that never prints a prompt, as used for scripts.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            prompt: None,
            buf: Vec::new(),
        }
    }

    /// A source that writes `prompt` to `out` before every read.
    pub fn with_prompt(reader: R, prompt: impl Into<String>, out: Box<dyn Write>) -> Self {
        Self {
            reader,
            prompt: Some((prompt.into(), out)),
            buf: Vec::new(),
        }
    }
}

impl ReaderSource<BufReader<File>> {
    /// Opens a script file for batch mode.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("can't open script {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        if let Some((prompt, out)) = &mut self.prompt {
            out.write_all(prompt.as_bytes())?;
            out.flush()?;
        }

        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .context("failed to read input line")?;
        if read == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// Interactive terminal input with line editing and in-memory history.
pub struct EditorSource {
    editor: DefaultEditor,
    prompt: String,
}

impl EditorSource {
    pub fn new(prompt: impl Into<String>) -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            prompt: prompt.into(),
        })
    }
}

impl LineSource for EditorSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                self.editor.add_history_entry(line.as_str())?;
                Ok(Some(line))
            }
            // Ctrl-C drops the current line; the caller prompts again.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// The source for interactive mode.
///
/// A terminal gets line editing; anything else (a pipe, a file) is read plainly,
/// still with the prompt printed to stdout before each line.
pub fn interactive(prompt: &str) -> Result<Box<dyn LineSource>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        Ok(Box::new(EditorSource::new(prompt)?))
    } else {
        Ok(Box::new(ReaderSource::with_prompt(
            stdin.lock(),
            prompt,
            Box::new(io::stdout()),
        )))
    }
}

/// Memory-backed writer for capturing interpreter output.
#[derive(Clone, Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    /// Public constructor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far by this writer and its clones, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}
