//! Content publishing workflows.
//!
//! Publishing on the Graph API is a two-step container flow: create a
//! staging container for the media, then publish it by `creation_id`.
//! Carousels add one child-container call per item before the aggregate
//! container. Every pipeline here is strictly sequential — each step
//! consumes the container id produced by the previous one — and aborts on
//! the first failure with no compensation for already-created containers
//! (they expire unpublished on the Graph side).

use serde_json::{json, Value};

use super::GraphClient;
use crate::error::Error;

/// File suffixes the Graph API treats as video when classifying carousel
/// items. Matched case-insensitively against the URL path.
const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".mov", ".avi", ".wmv"];

/// Media kind of one carousel item, derived from its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Classify a media URL by file extension. Anything without a known video
/// suffix is treated as an image, matching the Graph API's expectations.
pub fn media_kind_for_url(url: &str) -> MediaKind {
    // Strip query/fragment so "a.mp4?sig=x" still classifies as video.
    let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
    if VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

/// Story media kind, chosen explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
pub enum StoryMediaType {
    #[default]
    #[serde(rename = "IMAGE")]
    Image,
    #[serde(rename = "VIDEO")]
    Video,
}

impl GraphClient {
    /// Publish a single photo: create container, then publish it.
    /// Exactly two upstream calls; publish is never attempted when the
    /// create call fails.
    pub async fn publish_photo(
        &self,
        account_id: &str,
        image_url: &str,
        caption: Option<&str>,
    ) -> Result<Value, Error> {
        let container = self
            .post(
                &format!("{}/media", account_id),
                json!({
                    "image_url": image_url,
                    "caption": caption.unwrap_or(""),
                }),
            )
            .await?;
        self.publish_container(account_id, &container).await
    }

    /// Publish a carousel of 2-10 media URLs. Item count bounds are the
    /// caller's contract; this layer publishes whatever list it is given.
    ///
    /// Call sequence for N items: N child-container creates (in input
    /// order), one aggregate-container create, one publish. A failed child
    /// create aborts immediately — the aggregate and publish calls are
    /// never issued and children already created are left behind.
    pub async fn publish_carousel(
        &self,
        account_id: &str,
        media_urls: &[String],
        caption: Option<&str>,
    ) -> Result<Value, Error> {
        let mut child_ids: Vec<String> = Vec::with_capacity(media_urls.len());
        for url in media_urls {
            let body = match media_kind_for_url(url) {
                MediaKind::Video => json!({
                    "is_carousel_item": true,
                    "video_url": url,
                    "media_type": "VIDEO",
                }),
                MediaKind::Image => json!({
                    "is_carousel_item": true,
                    "image_url": url,
                }),
            };
            let child = self.post(&format!("{}/media", account_id), body).await?;
            child_ids.push(container_id(&child)?);
        }

        let container = self
            .post(
                &format!("{}/media", account_id),
                json!({
                    "media_type": "CAROUSEL",
                    "children": child_ids,
                    "caption": caption.unwrap_or(""),
                }),
            )
            .await?;
        self.publish_container(account_id, &container).await
    }

    /// Publish a Reel. Two upstream calls, create then publish.
    pub async fn publish_reel(
        &self,
        account_id: &str,
        video_url: &str,
        caption: Option<&str>,
        cover_url: Option<&str>,
        share_to_feed: Option<bool>,
    ) -> Result<Value, Error> {
        let mut body = json!({
            "video_url": video_url,
            "media_type": "REELS",
            "caption": caption.unwrap_or(""),
        });
        if let Some(cover_url) = cover_url {
            body["cover_url"] = json!(cover_url);
        }
        if let Some(share_to_feed) = share_to_feed {
            body["share_to_feed"] = json!(share_to_feed);
        }

        let container = self.post(&format!("{}/media", account_id), body).await?;
        self.publish_container(account_id, &container).await
    }

    /// Publish a Story (image or video). Two upstream calls.
    pub async fn publish_story(
        &self,
        account_id: &str,
        media_url: &str,
        media_type: StoryMediaType,
    ) -> Result<Value, Error> {
        let body = match media_type {
            StoryMediaType::Video => json!({ "media_type": "STORIES", "video_url": media_url }),
            StoryMediaType::Image => json!({ "media_type": "STORIES", "image_url": media_url }),
        };

        let container = self.post(&format!("{}/media", account_id), body).await?;
        self.publish_container(account_id, &container).await
    }

    /// Terminal publish step: consume a container id exactly once.
    async fn publish_container(&self, account_id: &str, container: &Value) -> Result<Value, Error> {
        let creation_id = container_id(container)?;
        self.post(
            &format!("{}/media_publish", account_id),
            json!({ "creation_id": creation_id }),
        )
        .await
    }
}

fn container_id(container: &Value) -> Result<String, Error> {
    container
        .get("id")
        .and_then(|id| id.as_str())
        .map(|id| id.to_string())
        .ok_or_else(|| Error::Transport("Container response missing id".to_string()))
}
