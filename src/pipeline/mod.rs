use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::captions::{concatenate, CaptionSource};
use crate::config::FetchRequest;
use crate::corrections::CorrectionTable;
use crate::output;
use crate::punctuate::Restorer;
use crate::resolver::VideoSource;

/// The full run, five stages in order: resolve metadata, fetch captions,
/// restore punctuation, apply lexical corrections, write JSON. Strictly
/// sequential per video; no concurrency across records.
pub struct TranscriptPipeline<V, S, R> {
    resolver: V,
    captions: S,
    restorer: R,
    corrections: CorrectionTable,
}

impl<V, S, R> TranscriptPipeline<V, S, R>
where
    V: VideoSource,
    S: CaptionSource,
    R: Restorer,
{
    pub fn new(resolver: V, captions: S, restorer: R, corrections: CorrectionTable) -> Self {
        Self {
            resolver,
            captions,
            restorer,
            corrections,
        }
    }

    /// Run the pipeline and return the confirmation message naming the
    /// output file
    pub async fn run(&self, request: &FetchRequest) -> Result<String> {
        let mut records = self
            .resolver
            .resolve(request.video_id.as_deref(), request.playlist_id.as_deref())
            .await?;

        tracing::info!("Resolved {} video(s)", records.len());

        let progress = ProgressBar::new(records.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap(),
        );

        for record in &mut records {
            progress.set_message(format!("Processing {}", record.video_id));
            record.transcript = self.transcript_for(&record.video_id).await;
            progress.inc(1);
        }

        progress.finish_with_message("All videos processed");

        output::write_records(&records, request.tag(), request.output_file.as_deref())
    }

    /// Produce the finished transcript for one video. Any caption or
    /// restoration failure degrades to an absent transcript; the run
    /// continues with the next record.
    async fn transcript_for(&self, video_id: &str) -> Option<String> {
        let segments = match self.captions.fetch_segments(video_id).await {
            Ok(segments) => segments,
            Err(reason) => {
                tracing::debug!("No transcript for {}: {}", video_id, reason);
                return None;
            }
        };

        let raw = concatenate(&segments);
        if raw.is_empty() {
            return None;
        }

        let restored = match self.restorer.restore(&raw).await {
            Ok(text) => text,
            Err(reason) => {
                tracing::debug!("Punctuation restoration failed for {}: {}", video_id, reason);
                return None;
            }
        };

        // A finished transcript is non-empty or absent, never ""
        if restored.is_empty() {
            return None;
        }

        Some(self.corrections.apply(&restored))
    }
}
