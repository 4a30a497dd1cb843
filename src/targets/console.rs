//! Console target (stdout/stderr)

use super::Target;
use crate::core::error::Result;
use std::io::Write;

/// Which console stream to write to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

pub struct ConsoleTarget {
    stream: ConsoleStream,
}

impl ConsoleTarget {
    pub fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }
}

impl Target for ConsoleTarget {
    fn write_record(&mut self, bytes: &[u8]) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(bytes)?;
            }
            ConsoleStream::Stderr => {
                let stderr = std::io::stderr();
                let mut handle = stderr.lock();
                handle.write_all(bytes)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().flush()?,
            ConsoleStream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            ConsoleStream::Stdout => "stdout",
            ConsoleStream::Stderr => "stderr",
        }
    }
}
