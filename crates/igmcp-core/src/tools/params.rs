//! Typed tool inputs.
//!
//! Each catalog entry has exactly one params struct and one [`ToolCall`]
//! variant. Arguments are validated once, here, when the raw argument map
//! is deserialized — a missing or ill-typed required argument becomes
//! [`Error::InvalidArguments`] before any credential check or network
//! call. Unknown argument keys are ignored, matching the wire contract of
//! MCP clients that pass extra metadata alongside tool arguments.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::graph::publish::StoryMediaType;

#[derive(Debug, Clone, Deserialize)]
pub struct GetAccountParams {
    pub account_id: String,
    pub fields: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountInsightsParams {
    pub account_id: String,
    pub metric: String,
    pub period: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListMediaParams {
    pub account_id: String,
    pub limit: Option<u32>,
    pub fields: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishPhotoParams {
    pub account_id: String,
    pub image_url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishCarouselParams {
    pub account_id: String,
    pub media_urls: Vec<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishReelParams {
    pub account_id: String,
    pub video_url: String,
    pub caption: Option<String>,
    pub cover_url: Option<String>,
    pub share_to_feed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishStoryParams {
    pub account_id: String,
    pub media_url: String,
    #[serde(default)]
    pub media_type: StoryMediaType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetMediaParams {
    pub media_id: String,
    pub fields: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaInsightsParams {
    pub media_id: String,
    pub metric: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetChildrenParams {
    pub media_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListCommentsParams {
    pub media_id: String,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetCommentParams {
    pub comment_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyCommentParams {
    pub comment_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCommentParams {
    pub comment_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HideCommentParams {
    pub comment_id: String,
    pub hide: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListRepliesParams {
    pub comment_id: String,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverUserParams {
    pub account_id: String,
    pub username: String,
    pub fields: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingLimitParams {
    pub account_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListStoriesParams {
    pub account_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoryInsightsParams {
    pub story_id: String,
    pub metric: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHashtagParams {
    pub account_id: String,
    pub query: String,
}

/// Shared by the recent-media and top-media hashtag tools.
#[derive(Debug, Clone, Deserialize)]
pub struct HashtagMediaParams {
    pub hashtag_id: String,
    pub account_id: String,
    pub fields: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListTagsParams {
    pub account_id: String,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MentionedMediaParams {
    pub account_id: String,
    pub media_id: String,
}

/// One variant per catalog entry. Constructed only by [`ToolCall::parse`].
#[derive(Debug, Clone)]
pub enum ToolCall {
    GetAccount(GetAccountParams),
    GetAccountInsights(AccountInsightsParams),
    ListMedia(ListMediaParams),
    PublishPhoto(PublishPhotoParams),
    PublishCarousel(PublishCarouselParams),
    PublishReel(PublishReelParams),
    PublishStory(PublishStoryParams),
    GetMedia(GetMediaParams),
    GetMediaInsights(MediaInsightsParams),
    GetChildren(GetChildrenParams),
    ListComments(ListCommentsParams),
    GetComment(GetCommentParams),
    ReplyComment(ReplyCommentParams),
    DeleteComment(DeleteCommentParams),
    HideComment(HideCommentParams),
    ListReplies(ListRepliesParams),
    DiscoverUser(DiscoverUserParams),
    GetContentPublishingLimit(PublishingLimitParams),
    ListStories(ListStoriesParams),
    GetStoryInsights(StoryInsightsParams),
    SearchHashtag(SearchHashtagParams),
    GetHashtagRecent(HashtagMediaParams),
    GetHashtagTop(HashtagMediaParams),
    ListTags(ListTagsParams),
    GetMentionedMedia(MentionedMediaParams),
}

fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, Error> {
    serde_json::from_value(args).map_err(|e| Error::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

impl ToolCall {
    /// Resolve a tool name and validate its argument map in one step.
    pub fn parse(name: &str, args: Value) -> Result<Self, Error> {
        match name {
            "ig_get_account" => parse_args(name, args).map(Self::GetAccount),
            "ig_get_account_insights" => parse_args(name, args).map(Self::GetAccountInsights),
            "ig_list_media" => parse_args(name, args).map(Self::ListMedia),
            "ig_publish_photo" => parse_args(name, args).map(Self::PublishPhoto),
            "ig_publish_carousel" => parse_args(name, args).map(Self::PublishCarousel),
            "ig_publish_reel" => parse_args(name, args).map(Self::PublishReel),
            "ig_publish_story" => parse_args(name, args).map(Self::PublishStory),
            "ig_get_media" => parse_args(name, args).map(Self::GetMedia),
            "ig_get_media_insights" => parse_args(name, args).map(Self::GetMediaInsights),
            "ig_get_children" => parse_args(name, args).map(Self::GetChildren),
            "ig_list_comments" => parse_args(name, args).map(Self::ListComments),
            "ig_get_comment" => parse_args(name, args).map(Self::GetComment),
            "ig_reply_comment" => parse_args(name, args).map(Self::ReplyComment),
            "ig_delete_comment" => parse_args(name, args).map(Self::DeleteComment),
            "ig_hide_comment" => parse_args(name, args).map(Self::HideComment),
            "ig_list_replies" => parse_args(name, args).map(Self::ListReplies),
            "ig_discover_user" => parse_args(name, args).map(Self::DiscoverUser),
            "ig_get_content_publishing_limit" => {
                parse_args(name, args).map(Self::GetContentPublishingLimit)
            }
            "ig_list_stories" => parse_args(name, args).map(Self::ListStories),
            "ig_get_story_insights" => parse_args(name, args).map(Self::GetStoryInsights),
            "ig_search_hashtag" => parse_args(name, args).map(Self::SearchHashtag),
            "ig_get_hashtag_recent" => parse_args(name, args).map(Self::GetHashtagRecent),
            "ig_get_hashtag_top" => parse_args(name, args).map(Self::GetHashtagTop),
            "ig_list_tags" => parse_args(name, args).map(Self::ListTags),
            "ig_get_mentioned_media" => parse_args(name, args).map(Self::GetMentionedMedia),
            _ => Err(Error::UnknownTool(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tools::catalog::tool_definitions;

    /// Minimal valid argument map for a tool, built from its own schema's
    /// `required` list so the catalog and the parser cannot drift apart.
    fn minimal_args(def: &Value) -> Value {
        let required = def["inputSchema"]["required"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        let mut args = serde_json::Map::new();
        for field in required {
            let field = field.as_str().unwrap();
            let value = match def["inputSchema"]["properties"][field]["type"].as_str() {
                Some("array") => json!(["https://cdn.example/a.jpg", "https://cdn.example/b.mp4"]),
                Some("boolean") => json!(true),
                Some("number") => json!(5),
                _ => json!("value"),
            };
            args.insert(field.to_string(), value);
        }
        Value::Object(args)
    }

    #[test]
    fn test_every_catalog_name_parses_to_exactly_one_call() {
        for def in tool_definitions() {
            let name = def["name"].as_str().unwrap();
            let parsed = ToolCall::parse(name, minimal_args(&def));
            assert!(parsed.is_ok(), "{name}: {:?}", parsed.err());
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = ToolCall::parse("ig_block_user", json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: ig_block_user");
    }

    #[test]
    fn test_missing_required_argument_is_a_validation_error() {
        let err = ToolCall::parse("ig_publish_photo", json!({"account_id": "17890"})).unwrap_err();
        match err {
            Error::InvalidArguments { tool, message } => {
                assert_eq!(tool, "ig_publish_photo");
                assert!(message.contains("image_url"));
            }
            other => panic!("expected InvalidArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_ill_typed_argument_is_a_validation_error() {
        let err = ToolCall::parse(
            "ig_publish_carousel",
            json!({"account_id": "17890", "media_urls": "not-an-array"}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { .. }));
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let call = ToolCall::parse(
            "ig_get_account",
            json!({"account_id": "17890", "INSTAGRAM_ACCESS_TOKEN": "tok"}),
        )
        .unwrap();
        assert!(matches!(call, ToolCall::GetAccount(_)));
    }

    #[test]
    fn test_story_media_type_defaults_to_image() {
        let call = ToolCall::parse(
            "ig_publish_story",
            json!({"account_id": "17890", "media_url": "https://cdn.example/s.jpg"}),
        )
        .unwrap();
        match call {
            ToolCall::PublishStory(p) => {
                assert_eq!(p.media_type, crate::graph::publish::StoryMediaType::Image)
            }
            other => panic!("expected PublishStory, got {:?}", other),
        }
    }
}
