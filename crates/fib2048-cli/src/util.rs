use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

/// Where a report goes: a file, or stdout when the path is `-`.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn create(target: &Path) -> anyhow::Result<Self> {
        if target == Path::new("-") {
            return Ok(Output::Stdout(io::stdout().lock()));
        }
        let file = File::create(target)
            .with_context(|| format!("Failed to create output file: {}", target.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: target.to_owned(),
        })
    }

    pub fn label(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes `value` as pretty JSON followed by a newline, then flushes.
    pub fn write_json<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        serde_json::to_writer_pretty(&mut self, value)
            .and_then(|()| writeln!(self).map_err(serde_json::Error::io))
            .with_context(|| format!("Failed to write JSON to {}", self.label()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.label()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}
