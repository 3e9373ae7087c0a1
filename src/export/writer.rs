//! Output sinks shared by the exporters.

use anyhow::{Context, Result};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::config::STDIO_PATH;

/// Writer wrapper that swallows broken-pipe errors.
///
/// Lets `ip_geo_join ... | head` exit cleanly when the downstream command
/// closes the pipe early.
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Opens the export destination: a file, or stdout when `output` is `None` or `-`.
pub(crate) fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) if path.as_os_str() != STDIO_PATH => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(IgnoreBrokenPipe::new(io::stdout().lock()))),
    }
}
