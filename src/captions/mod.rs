use async_trait::async_trait;
use serde::Deserialize;

/// A timed caption fragment as returned by the platform
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Why a caption fetch failed. The pipeline collapses every variant to an
/// absent transcript and keeps going, but callers of the source itself can
/// still tell "no captions" from a transport or parse problem.
#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    #[error("no caption track available")]
    NoCaptions,

    #[error("caption request failed: {0}")]
    Http(String),

    #[error("malformed caption payload: {0}")]
    Malformed(String),
}

/// Source of caption segments for a video
#[async_trait]
pub trait CaptionSource: Send + Sync {
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<CaptionSegment>, CaptionError>;
}

/// Join segment text with single spaces. Timing is discarded on purpose;
/// downstream stages only deal in plain text.
pub fn concatenate(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

// json3 timedtext wire format

#[derive(Debug, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
}

/// Caption client that pulls the timedtext track referenced by a video's
/// watch page. Mirrors what the browser player does: the player response
/// embedded in the page lists the caption tracks, and the first track's
/// baseUrl serves the transcript in json3 format.
pub struct YoutubeCaptionClient {
    client: reqwest::Client,
    watch_url_base: String,
}

impl YoutubeCaptionClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            watch_url_base: "https://www.youtube.com/watch?v=".to_string(),
        }
    }
}

#[async_trait]
impl CaptionSource for YoutubeCaptionClient {
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<CaptionSegment>, CaptionError> {
        let watch_url = format!("{}{}", self.watch_url_base, video_id);
        tracing::debug!("Fetching watch page: {}", watch_url);

        let page = self
            .client
            .get(&watch_url)
            .send()
            .await
            .map_err(|e| CaptionError::Http(e.to_string()))?
            .text()
            .await
            .map_err(|e| CaptionError::Http(e.to_string()))?;

        let track_url = extract_caption_track_url(&page)?;

        tracing::debug!("Fetching caption track for video: {}", video_id);

        let payload = self
            .client
            .get(&track_url)
            .query(&[("fmt", "json3")])
            .send()
            .await
            .map_err(|e| CaptionError::Http(e.to_string()))?
            .text()
            .await
            .map_err(|e| CaptionError::Http(e.to_string()))?;

        parse_json3(&payload)
    }
}

impl Default for YoutubeCaptionClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the first caption track's baseUrl out of the player response JSON
/// embedded in the watch page
fn extract_caption_track_url(page: &str) -> Result<String, CaptionError> {
    const MARKER: &str = "\"captionTracks\":";

    let start = page.find(MARKER).ok_or(CaptionError::NoCaptions)?;
    let array = &page[start + MARKER.len()..];
    let end = array
        .find(']')
        .ok_or_else(|| CaptionError::Malformed("unterminated captionTracks array".to_string()))?;

    let tracks: Vec<CaptionTrack> = serde_json::from_str(&array[..=end])
        .map_err(|e| CaptionError::Malformed(format!("captionTracks: {}", e)))?;

    tracks
        .into_iter()
        .next()
        .map(|track| track.base_url)
        .ok_or(CaptionError::NoCaptions)
}

/// Parse a json3 timedtext payload into ordered caption segments. Events
/// without text (timing-only markers) are skipped.
fn parse_json3(payload: &str) -> Result<Vec<CaptionSegment>, CaptionError> {
    let transcript: Json3Transcript = serde_json::from_str(payload)
        .map_err(|e| CaptionError::Malformed(format!("timedtext: {}", e)))?;

    let mut segments = Vec::new();
    for event in transcript.events {
        let Some(segs) = event.segs else {
            continue;
        };

        let text = segs
            .iter()
            .map(|seg| seg.utf8.as_str())
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            continue;
        }

        segments.push(CaptionSegment {
            text,
            start: event.start_ms as f64 / 1000.0,
            duration: event.duration_ms as f64 / 1000.0,
        });
    }

    Ok(segments)
}
