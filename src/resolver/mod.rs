use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::TubescribeError;

/// Base URL for the YouTube Data API v3
const DATA_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Canonical watch URL prefix
const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Playlist page size; only the first page is requested (stated limitation)
const PLAYLIST_MAX_RESULTS: &str = "50";

/// One resolved video. Created without a transcript; the pipeline fills the
/// transcript field exactly once and it is never touched again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub transcript: Option<String>,
}

impl VideoRecord {
    pub fn new(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        let video_id = video_id.into();
        let url = format!("{}{}", WATCH_URL_BASE, video_id);
        Self {
            video_id,
            title: title.into(),
            url,
            transcript: None,
        }
    }
}

// YouTube Data API wire format

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    #[serde(rename = "contentDetails")]
    content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

/// Check that exactly one of a video id or a playlist id was supplied
pub fn validate_selection(video_id: Option<&str>, playlist_id: Option<&str>) -> Result<()> {
    match (video_id, playlist_id) {
        (Some(_), Some(_)) => Err(TubescribeError::InvalidInput(
            "provide exactly one of a video id or a playlist id, not both".to_string(),
        )
        .into()),
        (None, None) => Err(TubescribeError::InvalidInput(
            "provide exactly one of a video id or a playlist id".to_string(),
        )
        .into()),
        _ => Ok(()),
    }
}

/// Source of video metadata for the pipeline
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Resolve exactly one of a video or playlist id into an ordered
    /// sequence of records, without transcripts
    async fn resolve(
        &self,
        video_id: Option<&str>,
        playlist_id: Option<&str>,
    ) -> Result<Vec<VideoRecord>>;
}

/// Resolves a video or playlist id into an ordered list of records with
/// titles and canonical watch URLs, via the YouTube Data API
pub struct VideoResolver {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl VideoResolver {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DATA_API_BASE)
    }

    /// Point the resolver at a different API endpoint (used by tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the first page of playlist items (up to 50) and extract video ids
    async fn playlist_video_ids(&self, playlist_id: &str) -> Result<Vec<String>> {
        tracing::debug!("Resolving playlist: {}", playlist_id);

        let url = format!("{}/playlistItems", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", PLAYLIST_MAX_RESULTS),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("playlistItems request failed")?;

        let response = check_status(response).await?;
        let body: PlaylistItemsResponse = response
            .json()
            .await
            .context("Failed to parse playlistItems response")?;

        Ok(extract_video_ids(body))
    }

    /// Look up a single video's title via the videos endpoint
    async fn video_title(&self, video_id: &str) -> Result<String> {
        tracing::debug!("Fetching metadata for video: {}", video_id);

        let url = format!("{}/videos", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("videos request failed")?;

        let response = check_status(response).await?;
        let body: VideoListResponse = response
            .json()
            .await
            .context("Failed to parse videos response")?;

        extract_title(body, video_id)
    }
}

#[async_trait]
impl VideoSource for VideoResolver {
    /// API errors (bad key, quota, not found) propagate; there is no retry
    /// or backoff.
    async fn resolve(
        &self,
        video_id: Option<&str>,
        playlist_id: Option<&str>,
    ) -> Result<Vec<VideoRecord>> {
        validate_selection(video_id, playlist_id)?;

        let video_ids = match (video_id, playlist_id) {
            (Some(id), None) => vec![id.to_string()],
            (None, Some(id)) => self.playlist_video_ids(id).await?,
            _ => unreachable!("validated above"),
        };

        let mut records = Vec::with_capacity(video_ids.len());
        for id in video_ids {
            let title = self.video_title(&id).await?;
            records.push(VideoRecord::new(id, title));
        }

        Ok(records)
    }
}

fn extract_video_ids(response: PlaylistItemsResponse) -> Vec<String> {
    response
        .items
        .into_iter()
        .map(|item| item.content_details.video_id)
        .collect()
}

fn extract_title(response: VideoListResponse, video_id: &str) -> Result<String> {
    response
        .items
        .into_iter()
        .next()
        .map(|item| item.snippet.title)
        .ok_or_else(|| {
            TubescribeError::Api(format!("no metadata returned for video {}", video_id)).into()
        })
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TubescribeError::Api(format!("HTTP {}: {}", status, body)).into());
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_has_canonical_watch_url() {
        let record = VideoRecord::new("abc123", "Test Video");
        assert_eq!(record.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(record.video_id, "abc123");
        assert!(record.transcript.is_none());
    }

    #[test]
    fn test_validate_selection() {
        assert!(validate_selection(Some("abc"), None).is_ok());
        assert!(validate_selection(None, Some("PLxyz")).is_ok());

        let both = validate_selection(Some("abc"), Some("PLxyz")).unwrap_err();
        assert!(both.to_string().contains("not both"));

        let neither = validate_selection(None, None).unwrap_err();
        assert!(neither.to_string().contains("exactly one"));
    }

    #[tokio::test]
    async fn test_resolve_rejects_invalid_selection_before_network() {
        // Dummy endpoint: the error must surface before any request is made
        let resolver = VideoResolver::with_base_url("key", "http://127.0.0.1:1");

        assert!(resolver.resolve(None, None).await.is_err());
        assert!(resolver.resolve(Some("a"), Some("b")).await.is_err());
    }

    #[test]
    fn test_extract_video_ids_preserves_order() {
        let body = r#"{
            "items": [
                {"contentDetails": {"videoId": "first"}},
                {"contentDetails": {"videoId": "second"}},
                {"contentDetails": {"videoId": "third"}}
            ]
        }"#;
        let response: PlaylistItemsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_video_ids(response), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_extract_video_ids_empty_playlist() {
        let response: PlaylistItemsResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_video_ids(response).is_empty());
    }

    #[test]
    fn test_extract_title() {
        let body = r#"{"items": [{"snippet": {"title": "My Talk"}}]}"#;
        let response: VideoListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_title(response, "abc123").unwrap(), "My Talk");
    }

    #[test]
    fn test_extract_title_missing_video() {
        let response: VideoListResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        let err = extract_title(response, "abc123").unwrap_err();
        assert!(err.to_string().contains("abc123"));
    }
}
