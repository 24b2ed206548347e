use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::{self, Envelope};
use crate::error::ViewError;
use crate::fetcher::OrderSource;
use crate::messages;
use crate::output::OutputError;
use crate::render::{self, markup};

/// Where the presenter puts its markup. Each write replaces the previous
/// content; `input` is the order ID as the user typed it.
#[async_trait]
pub trait OutputTarget: Send + Sync {
    async fn write(&self, input: &str, markup: &str) -> Result<(), OutputError>;
}

#[derive(Debug)]
pub enum Outcome {
    /// The input was blank; the prompt is showing.
    Prompted,
    Rendered { markup: String },
    Failed(ViewError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

pub struct Presenter {
    source: Arc<dyn OrderSource>,
    target: Arc<dyn OutputTarget>,
    envelope: Envelope,
}

impl Presenter {
    pub fn new(
        source: Arc<dyn OrderSource>,
        target: Arc<dyn OutputTarget>,
        envelope: Envelope,
    ) -> Self {
        Self {
            source,
            target,
            envelope,
        }
    }

    /// Look up `raw_id` and show the result. Failures end up in the output
    /// target as a message; only errors writing to the target itself are
    /// returned.
    pub async fn present(&self, raw_id: &str) -> Result<Outcome, OutputError> {
        let id = raw_id.trim();
        if id.is_empty() {
            let prompt = messages::describe_error(&ViewError::EmptyInput);
            self.target
                .write(raw_id, &markup::paragraph(&prompt))
                .await?;
            return Ok(Outcome::Prompted);
        }

        self.target
            .write(id, &markup::paragraph(messages::LOADING))
            .await?;

        match self.load(id).await {
            Ok(html) => {
                tracing::info!(order_id = id, "order rendered");
                self.target.write(id, &html).await?;
                Ok(Outcome::Rendered { markup: html })
            }
            Err(err) => {
                tracing::warn!(order_id = id, error = %err, "order lookup failed");
                self.target
                    .write(id, &markup::error_paragraph(&messages::describe_error(&err)))
                    .await?;
                Ok(Outcome::Failed(err))
            }
        }
    }

    async fn load(&self, id: &str) -> Result<String, ViewError> {
        let raw = self.source.fetch_order(id).await?;
        let order = adapter::adapt(&raw, self.envelope)?;
        Ok(render::render_order(Some(&order)))
    }
}
