use crate::domain::ports::Clipboard;
use crate::utils::error::Result;
use std::io::Write;
use std::sync::Mutex;

/// Terminal stand-in for the system clipboard: the text goes to stdout
/// unchanged so it can be piped into `pbcopy`, `xclip` and friends.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|e| std::io::Error::other(format!("clipboard lock poisoned: {}", e)))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}
