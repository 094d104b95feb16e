//! Read-side Graph API operations.
//!
//! One thin wrapper per logical operation: account info and insights,
//! media lookup, comment moderation, stories, business discovery,
//! hashtags, and mentions. Each wrapper issues exactly one gateway call.
//! Publishing pipelines live in [`super::publish`].

use serde_json::{json, Value};

use super::GraphClient;
use crate::error::Error;

const ACCOUNT_FIELDS: &str =
    "id,username,name,biography,followers_count,follows_count,media_count,profile_picture_url,website";
const MEDIA_FIELDS: &str =
    "id,caption,media_type,media_url,thumbnail_url,permalink,timestamp,like_count,comments_count";
const HASHTAG_MEDIA_FIELDS: &str =
    "id,caption,media_type,permalink,timestamp,like_count,comments_count";
const COMMENT_FIELDS: &str = "id,text,username,timestamp,like_count,hidden";
const DISCOVERY_FIELDS: &str =
    "username,name,biography,followers_count,follows_count,media_count,profile_picture_url,website";

impl GraphClient {
    // ── Account ──────────────────────────────────────────────────────────

    pub async fn get_account(&self, account_id: &str, fields: Option<&str>) -> Result<Value, Error> {
        let fields = fields.unwrap_or(ACCOUNT_FIELDS);
        self.get(account_id, &[("fields", fields)]).await
    }

    pub async fn get_account_insights(
        &self,
        account_id: &str,
        metric: &str,
        period: Option<&str>,
        since: Option<&str>,
        until: Option<&str>,
    ) -> Result<Value, Error> {
        let mut params = vec![("metric", metric), ("period", period.unwrap_or("day"))];
        if let Some(since) = since {
            params.push(("since", since));
        }
        if let Some(until) = until {
            params.push(("until", until));
        }
        self.get_list(&format!("{}/insights", account_id), &params).await
    }

    pub async fn list_media(
        &self,
        account_id: &str,
        limit: Option<u32>,
        fields: Option<&str>,
    ) -> Result<Value, Error> {
        let fields = fields.unwrap_or(MEDIA_FIELDS);
        let limit = limit.map(|l| l.to_string());
        let mut params = vec![("fields", fields)];
        if let Some(limit) = limit.as_deref() {
            params.push(("limit", limit));
        }
        self.get_list(&format!("{}/media", account_id), &params).await
    }

    // ── Media ────────────────────────────────────────────────────────────

    pub async fn get_media(&self, media_id: &str, fields: Option<&str>) -> Result<Value, Error> {
        let fields = fields.unwrap_or(MEDIA_FIELDS);
        self.get(media_id, &[("fields", fields)]).await
    }

    pub async fn get_media_insights(&self, media_id: &str, metric: &str) -> Result<Value, Error> {
        self.get_list(&format!("{}/insights", media_id), &[("metric", metric)])
            .await
    }

    pub async fn get_children(&self, media_id: &str) -> Result<Value, Error> {
        self.get_list(
            &format!("{}/children", media_id),
            &[("fields", "id,media_type,media_url,timestamp")],
        )
        .await
    }

    // ── Comments ─────────────────────────────────────────────────────────

    pub async fn list_comments(&self, media_id: &str, limit: Option<u32>) -> Result<Value, Error> {
        let limit = limit.map(|l| l.to_string());
        let mut params = vec![("fields", COMMENT_FIELDS)];
        if let Some(limit) = limit.as_deref() {
            params.push(("limit", limit));
        }
        self.get_list(&format!("{}/comments", media_id), &params).await
    }

    pub async fn get_comment(&self, comment_id: &str) -> Result<Value, Error> {
        let fields = format!("{},replies{{id,text,username,timestamp}}", COMMENT_FIELDS);
        self.get(comment_id, &[("fields", fields.as_str())]).await
    }

    pub async fn reply_comment(&self, comment_id: &str, message: &str) -> Result<Value, Error> {
        self.post(&format!("{}/replies", comment_id), json!({ "message": message }))
            .await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<Value, Error> {
        self.delete(comment_id).await
    }

    pub async fn hide_comment(&self, comment_id: &str, hide: bool) -> Result<Value, Error> {
        self.post(comment_id, json!({ "hide": hide })).await
    }

    pub async fn list_replies(&self, comment_id: &str, limit: Option<u32>) -> Result<Value, Error> {
        let limit = limit.map(|l| l.to_string());
        let mut params = vec![("fields", "id,text,username,timestamp,like_count")];
        if let Some(limit) = limit.as_deref() {
            params.push(("limit", limit));
        }
        self.get_list(&format!("{}/replies", comment_id), &params).await
    }

    // ── Discovery ────────────────────────────────────────────────────────

    /// Business Discovery: look up another Business/Creator account by
    /// username through the caller's own account node.
    pub async fn discover_user(
        &self,
        account_id: &str,
        username: &str,
        fields: Option<&str>,
    ) -> Result<Value, Error> {
        let discovery_fields = fields.unwrap_or(DISCOVERY_FIELDS);
        let full_fields = format!("business_discovery.fields({})", discovery_fields);
        self.get(account_id, &[("fields", full_fields.as_str()), ("username", username)])
            .await
    }

    pub async fn get_content_publishing_limit(&self, account_id: &str) -> Result<Value, Error> {
        self.get(
            &format!("{}/content_publishing_limit", account_id),
            &[("fields", "config,quota_usage")],
        )
        .await
    }

    // ── Stories ──────────────────────────────────────────────────────────

    pub async fn list_stories(&self, account_id: &str) -> Result<Value, Error> {
        self.get_list(
            &format!("{}/stories", account_id),
            &[("fields", "id,media_type,media_url,timestamp")],
        )
        .await
    }

    pub async fn get_story_insights(&self, story_id: &str, metric: &str) -> Result<Value, Error> {
        self.get_list(&format!("{}/insights", story_id), &[("metric", metric)])
            .await
    }

    // ── Hashtags ─────────────────────────────────────────────────────────

    pub async fn search_hashtag(&self, account_id: &str, query: &str) -> Result<Value, Error> {
        self.get_list("ig_hashtag_search", &[("user_id", account_id), ("q", query)])
            .await
    }

    pub async fn get_hashtag_recent(
        &self,
        hashtag_id: &str,
        account_id: &str,
        fields: Option<&str>,
    ) -> Result<Value, Error> {
        let fields = fields.unwrap_or(HASHTAG_MEDIA_FIELDS);
        self.get_list(
            &format!("{}/recent_media", hashtag_id),
            &[("user_id", account_id), ("fields", fields)],
        )
        .await
    }

    pub async fn get_hashtag_top(
        &self,
        hashtag_id: &str,
        account_id: &str,
        fields: Option<&str>,
    ) -> Result<Value, Error> {
        let fields = fields.unwrap_or(HASHTAG_MEDIA_FIELDS);
        self.get_list(
            &format!("{}/top_media", hashtag_id),
            &[("user_id", account_id), ("fields", fields)],
        )
        .await
    }

    // ── Mentions ─────────────────────────────────────────────────────────

    pub async fn list_tags(&self, account_id: &str, limit: Option<u32>) -> Result<Value, Error> {
        let limit = limit.map(|l| l.to_string());
        let mut params = vec![("fields", "id,caption,media_type,permalink,timestamp")];
        if let Some(limit) = limit.as_deref() {
            params.push(("limit", limit));
        }
        self.get_list(&format!("{}/tags", account_id), &params).await
    }

    pub async fn get_mentioned_media(
        &self,
        account_id: &str,
        media_id: &str,
    ) -> Result<Value, Error> {
        self.get(
            &format!("{}/mentioned_media", account_id),
            &[("fields", HASHTAG_MEDIA_FIELDS), ("mentioned_media_id", media_id)],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::graph::mock::MockSend;
    use crate::graph::{GraphClient, HttpSend};

    fn client(mock: &Arc<MockSend>) -> GraphClient {
        GraphClient::new(mock.clone() as Arc<dyn HttpSend>, "tok")
    }

    #[tokio::test]
    async fn test_get_account_uses_default_fields() {
        let mock = MockSend::returning(vec![json!({"id": "17890", "username": "acme"})]);
        client(&mock).get_account("17890", None).await.unwrap();

        let call = &mock.calls()[0];
        assert_eq!(call.path(), "/v22.0/17890");
        assert!(call.url.contains("followers_count"));
    }

    #[tokio::test]
    async fn test_account_insights_defaults_period_to_day() {
        let mock = MockSend::returning(vec![json!({"data": []})]);
        client(&mock)
            .get_account_insights("17890", "reach", None, None, None)
            .await
            .unwrap();

        let call = &mock.calls()[0];
        assert!(call.url.contains("period=day"));
        assert!(call.url.contains("metric=reach"));
        assert!(!call.url.contains("since="));
    }

    #[tokio::test]
    async fn test_hide_comment_posts_flag_body() {
        let mock = MockSend::returning(vec![json!({"success": true})]);
        client(&mock).hide_comment("c1", true).await.unwrap();

        let call = &mock.calls()[0];
        assert_eq!(call.method, "POST");
        assert_eq!(call.body, Some(json!({"hide": true})));
    }

    #[tokio::test]
    async fn test_delete_comment_issues_delete_verb() {
        let mock = MockSend::returning(vec![json!({"success": true})]);
        client(&mock).delete_comment("c1").await.unwrap();

        let call = &mock.calls()[0];
        assert_eq!(call.method, "DELETE");
        assert_eq!(call.path(), "/v22.0/c1");
        assert!(call.body.is_none());
    }

    #[tokio::test]
    async fn test_discover_user_wraps_fields_in_business_discovery() {
        let mock = MockSend::returning(vec![json!({"business_discovery": {}})]);
        client(&mock).discover_user("17890", "rival", None).await.unwrap();

        let call = &mock.calls()[0];
        assert!(call.url.contains("business_discovery.fields"));
        assert!(call.url.contains("username=rival"));
    }

    #[tokio::test]
    async fn test_search_hashtag_targets_search_node() {
        let mock = MockSend::returning(vec![json!({"data": [{"id": "ht1"}]})]);
        let result = client(&mock).search_hashtag("17890", "travel").await.unwrap();

        assert_eq!(result, json!([{"id": "ht1"}]));
        let call = &mock.calls()[0];
        assert_eq!(call.path(), "/v22.0/ig_hashtag_search");
        assert!(call.url.contains("q=travel"));
        assert!(call.url.contains("user_id=17890"));
    }
}
