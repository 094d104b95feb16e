//! Tool execution.
//!
//! `ToolExecutor` is the boundary where every failure kind becomes a
//! uniform error result: name resolution and argument validation first,
//! then the credential gate, then the gateway call(s). The serving
//! process never sees an unhandled fault from a tool invocation.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::Credentials;
use crate::error::Error;
use crate::graph::{GraphClient, HttpSend};
use crate::tools::params::ToolCall;

/// Executes named tool invocations against the Graph API.
#[derive(Clone)]
pub struct ToolExecutor {
    credentials: Option<Credentials>,
    sender: Arc<dyn HttpSend>,
}

impl ToolExecutor {
    pub fn new(credentials: Option<Credentials>, sender: Arc<dyn HttpSend>) -> Self {
        Self {
            credentials,
            sender,
        }
    }

    /// Derived executor with different credentials, sharing the sender.
    /// Used for per-request credential overrides on the HTTP transport.
    pub fn with_credentials(&self, credentials: Option<Credentials>) -> Self {
        Self {
            credentials,
            sender: self.sender.clone(),
        }
    }

    /// Whether a credential is configured (surfaced via server-info).
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Execute a tool call and return an MCP tool result. Errors of every
    /// kind are reported as `isError` results with the message verbatim.
    pub async fn execute(&self, name: &str, args: Value) -> Value {
        match self.try_execute(name, args).await {
            Ok(value) => tool_result(&value),
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "tool call failed");
                tool_result_error(&format!("Error: {}", err))
            }
        }
    }

    async fn try_execute(&self, name: &str, args: Value) -> Result<Value, Error> {
        let call = ToolCall::parse(name, args)?;

        let credentials = self.credentials.as_ref().ok_or(Error::MissingCredential)?;
        let client = GraphClient::new(self.sender.clone(), credentials.access_token.clone());

        self.dispatch(call, &client).await
    }

    async fn dispatch(&self, call: ToolCall, client: &GraphClient) -> Result<Value, Error> {
        match call {
            // ── Account ──────────────────────────────────────────────────
            ToolCall::GetAccount(p) => client.get_account(&p.account_id, p.fields.as_deref()).await,
            ToolCall::GetAccountInsights(p) => {
                client
                    .get_account_insights(
                        &p.account_id,
                        &p.metric,
                        p.period.as_deref(),
                        p.since.as_deref(),
                        p.until.as_deref(),
                    )
                    .await
            }
            ToolCall::ListMedia(p) => {
                client
                    .list_media(&p.account_id, p.limit, p.fields.as_deref())
                    .await
            }

            // ── Publishing ───────────────────────────────────────────────
            ToolCall::PublishPhoto(p) => {
                client
                    .publish_photo(&p.account_id, &p.image_url, p.caption.as_deref())
                    .await
            }
            ToolCall::PublishCarousel(p) => {
                client
                    .publish_carousel(&p.account_id, &p.media_urls, p.caption.as_deref())
                    .await
            }
            ToolCall::PublishReel(p) => {
                client
                    .publish_reel(
                        &p.account_id,
                        &p.video_url,
                        p.caption.as_deref(),
                        p.cover_url.as_deref(),
                        p.share_to_feed,
                    )
                    .await
            }
            ToolCall::PublishStory(p) => {
                client
                    .publish_story(&p.account_id, &p.media_url, p.media_type)
                    .await
            }

            // ── Media ────────────────────────────────────────────────────
            ToolCall::GetMedia(p) => client.get_media(&p.media_id, p.fields.as_deref()).await,
            ToolCall::GetMediaInsights(p) => {
                client.get_media_insights(&p.media_id, &p.metric).await
            }
            ToolCall::GetChildren(p) => client.get_children(&p.media_id).await,

            // ── Comments ─────────────────────────────────────────────────
            ToolCall::ListComments(p) => client.list_comments(&p.media_id, p.limit).await,
            ToolCall::GetComment(p) => client.get_comment(&p.comment_id).await,
            ToolCall::ReplyComment(p) => client.reply_comment(&p.comment_id, &p.message).await,
            ToolCall::DeleteComment(p) => client.delete_comment(&p.comment_id).await,
            ToolCall::HideComment(p) => client.hide_comment(&p.comment_id, p.hide).await,
            ToolCall::ListReplies(p) => client.list_replies(&p.comment_id, p.limit).await,

            // ── Discovery ────────────────────────────────────────────────
            ToolCall::DiscoverUser(p) => {
                client
                    .discover_user(&p.account_id, &p.username, p.fields.as_deref())
                    .await
            }
            ToolCall::GetContentPublishingLimit(p) => {
                client.get_content_publishing_limit(&p.account_id).await
            }

            // ── Stories ──────────────────────────────────────────────────
            ToolCall::ListStories(p) => client.list_stories(&p.account_id).await,
            ToolCall::GetStoryInsights(p) => {
                client.get_story_insights(&p.story_id, &p.metric).await
            }

            // ── Hashtags ─────────────────────────────────────────────────
            ToolCall::SearchHashtag(p) => client.search_hashtag(&p.account_id, &p.query).await,
            ToolCall::GetHashtagRecent(p) => {
                client
                    .get_hashtag_recent(&p.hashtag_id, &p.account_id, p.fields.as_deref())
                    .await
            }
            ToolCall::GetHashtagTop(p) => {
                client
                    .get_hashtag_top(&p.hashtag_id, &p.account_id, p.fields.as_deref())
                    .await
            }

            // ── Mentions ─────────────────────────────────────────────────
            ToolCall::ListTags(p) => client.list_tags(&p.account_id, p.limit).await,
            ToolCall::GetMentionedMedia(p) => {
                client.get_mentioned_media(&p.account_id, &p.media_id).await
            }
        }
    }
}

fn tool_result(value: &Value) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        }],
        "isError": false,
    })
}

fn tool_result_error(message: &str) -> Value {
    json!({
        "content": [{ "type": "text", "text": message }],
        "isError": true,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::graph::mock::MockSend;

    fn executor(mock: &Arc<MockSend>, credentials: Option<Credentials>) -> ToolExecutor {
        ToolExecutor::new(credentials, mock.clone() as Arc<dyn HttpSend>)
    }

    fn creds() -> Option<Credentials> {
        Some(Credentials::new("tok", None))
    }

    #[tokio::test]
    async fn test_missing_credential_fails_without_upstream_calls() {
        let mock = MockSend::returning(vec![json!({"id": "1"})]);
        let result = executor(&mock, None)
            .execute("ig_get_account", json!({"account_id": "17890"}))
            .await;

        assert_eq!(result["isError"], true);
        assert_eq!(
            result["content"][0]["text"],
            "Error: INSTAGRAM_ACCESS_TOKEN is required"
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_tool_reported_without_upstream_calls() {
        let mock = MockSend::returning(vec![json!({})]);
        let result = executor(&mock, creds())
            .execute("ig_send_dm", json!({}))
            .await;

        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Error: Unknown tool: ig_send_dm");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_precedes_network() {
        let mock = MockSend::returning(vec![json!({})]);
        let result = executor(&mock, creds())
            .execute("ig_reply_comment", json!({"comment_id": "c1"}))
            .await;

        assert_eq!(result["isError"], true);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_result_carries_pretty_json_payload() {
        let mock = MockSend::returning(vec![json!({"id": "17890", "username": "acme"})]);
        let result = executor(&mock, creds())
            .execute("ig_get_account", json!({"account_id": "17890"}))
            .await;

        assert_eq!(result["isError"], false);
        let text = result["content"][0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["username"], "acme");
    }

    #[tokio::test]
    async fn test_upstream_error_surfaces_verbatim() {
        let mock = MockSend::returning(vec![MockSend::error_body(190, "Invalid OAuth access token.")]);
        let result = executor(&mock, creds())
            .execute("ig_get_account", json!({"account_id": "17890"}))
            .await;

        assert_eq!(result["isError"], true);
        assert_eq!(
            result["content"][0]["text"],
            "Error: Instagram API Error (190): Invalid OAuth access token."
        );
    }

    #[tokio::test]
    async fn test_carousel_scenario_two_items_four_calls() {
        let mock = MockSend::returning(vec![
            json!({"id": "child-1"}),
            json!({"id": "child-2"}),
            json!({"id": "agg-1"}),
            json!({"id": "published-media-1"}),
        ]);
        let result = executor(&mock, creds())
            .execute(
                "ig_publish_carousel",
                json!({"account_id": "17890", "media_urls": ["a.jpg", "b.mp4"]}),
            )
            .await;

        assert_eq!(result["isError"], false);
        assert_eq!(mock.call_count(), 4);

        let calls = mock.calls();
        assert!(calls[0].body.as_ref().unwrap().get("image_url").is_some());
        assert!(calls[1].body.as_ref().unwrap().get("video_url").is_some());

        let text = result["content"][0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["id"], "published-media-1");
    }
}
