pub mod page;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::present::OutputTarget;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write output file: {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {source}")]
    Stdout {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Full host document with the markup inside the result container.
    #[default]
    Page,
    /// Only the markup.
    Fragment,
}

impl Layout {
    pub fn wrap(self, input: &str, markup: &str) -> String {
        match self {
            Layout::Page => page::render_page(input, markup),
            Layout::Fragment => {
                let mut out = markup.to_string();
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                out
            }
        }
    }
}

/// Rewrites a file on every write, so a browser pointed at it sees the
/// loading state too.
#[derive(Clone, Debug)]
pub struct PageFile {
    path: PathBuf,
    layout: Layout,
}

impl PageFile {
    pub fn new(path: impl Into<PathBuf>, layout: Layout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl OutputTarget for PageFile {
    async fn write(&self, input: &str, markup: &str) -> Result<(), OutputError> {
        let contents = self.layout.wrap(input, markup);
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| OutputError::FileWrite {
                path: self.path.display().to_string(),
                source: e,
            })
    }
}

/// Keeps every write in memory. The CLI uses it for stdout output and
/// prints only the final state.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    writes: Mutex<Vec<(String, String)>>,
}

impl MemoryTarget {
    pub async fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .await
            .iter()
            .map(|(_, markup)| markup.clone())
            .collect()
    }

    pub async fn last(&self) -> Option<String> {
        self.writes.lock().await.last().map(|(_, m)| m.clone())
    }

    pub async fn last_input(&self) -> Option<String> {
        self.writes.lock().await.last().map(|(i, _)| i.clone())
    }

    pub async fn clear(&self) {
        self.writes.lock().await.clear();
    }
}

#[async_trait]
impl OutputTarget for MemoryTarget {
    async fn write(&self, input: &str, markup: &str) -> Result<(), OutputError> {
        self.writes
            .lock()
            .await
            .push((input.to_string(), markup.to_string()));
        Ok(())
    }
}

pub async fn write_stdout(contents: &str) -> Result<(), OutputError> {
    use tokio::io::AsyncWriteExt;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(contents.as_bytes())
        .await
        .map_err(|e| OutputError::Stdout { source: e })?;
    stdout
        .flush()
        .await
        .map_err(|e| OutputError::Stdout { source: e })
}
