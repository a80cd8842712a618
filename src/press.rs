//! The press loop: walk the ordered catalog, append one fragment per
//! problem, and leave a break log behind if anything goes wrong so the next
//! run can resume instead of starting over.

use std::path::PathBuf;

use derive_builder::Builder;
use tracing::warn;

use crate::checkpoint::{BreakLog, Start};
use crate::client::{FetchError, LeetCodeClient, ProblemSource};
use crate::document::{Document, DocumentError};
use crate::ProblemSummary;

pub const DEFAULT_OUTPUT_PATH: &str = "problems.html";
pub const DEFAULT_BREAK_LOG_PATH: &str = "break.log";

#[derive(Debug, thiserror::Error)]
pub enum PressError {
    #[error("network error: {0}")]
    Network(#[from] FetchError),
    #[error("file system error: {0}")]
    FileSystem(#[from] std::io::Error),
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
    /// The break log could not be written while handling a failure; the
    /// resume point is lost. Carries both errors.
    #[error("failed to record the break log while handling: {original}")]
    BreakLogLost {
        original: Box<PressError>,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Builder)]
#[builder(setter(into))]
pub struct LeetPress {
    #[builder(default)]
    client: LeetCodeClient,
    #[builder(default = "DEFAULT_OUTPUT_PATH.into()")]
    output_path: PathBuf,
    #[builder(default = "DEFAULT_BREAK_LOG_PATH.into()")]
    break_log_path: PathBuf,
    #[builder(default)]
    include_paid: bool,
}

impl LeetPress {
    /// Start or resume a run against the real LeetCode endpoints.
    pub async fn run(&self) -> Result<(), PressError> {
        self.run_with(&self.client).await
    }

    /// Start or resume a run against any [`ProblemSource`].
    ///
    /// A fresh run (no break log) recreates the output document and writes
    /// the head fragment; a resumed run appends to the partial document and
    /// skips every id below the recorded one. The foot fragment is written
    /// only once the whole catalog has been processed.
    pub async fn run_with<S: ProblemSource>(&self, source: &S) -> Result<(), PressError> {
        let break_log = BreakLog::new(&self.break_log_path);
        let start = break_log.take()?;

        let mut document = match start {
            Start::Fresh => Document::create(&self.output_path)?,
            Start::ResumeFrom(_) => Document::open_append(&self.output_path)?,
        };

        let problems = source.list_problems(self.include_paid).await?;
        for summary in &problems {
            if let Start::ResumeFrom(start_id) = start {
                if summary.id < start_id {
                    continue;
                }
            }

            if let Err(err) = Self::press_one(source, &mut document, summary).await {
                warn!(id = summary.id, slug = %summary.title_slug, "run interrupted");
                // Best effort: losing the break log must not mask the
                // original failure.
                let err = match break_log.record(summary.id) {
                    Ok(()) => err,
                    Err(source) => PressError::BreakLogLost {
                        original: Box::new(err),
                        source,
                    },
                };
                eprintln!(
                    "Error occurred. Please open LeetCode with a browser to check if the problem loads correctly, then run again."
                );
                return Err(err);
            }
        }

        document.finish()?;
        println!(
            "Congratulations! All done! Output path: {}",
            self.output_path.display()
        );
        Ok(())
    }

    async fn press_one<S: ProblemSource>(
        source: &S,
        document: &mut Document,
        summary: &ProblemSummary,
    ) -> Result<(), PressError> {
        let detail = source.fetch_detail(&summary.title_slug).await?;
        document.append(&detail)?;
        println!("{}. {}", detail.id, detail.title);
        Ok(())
    }
}
