//! Static tool catalog.
//!
//! One entry per exposed tool: name, description, MCP annotations
//! (advisory hints for the calling agent — nothing here is enforced by
//! the dispatcher), and the raw JSON-Schema input shape. The catalog is
//! configuration reproducible from the Graph API reference; the behavior
//! behind each name lives in [`crate::tools::exec`].

use serde_json::{json, Value};

fn tool_def(name: &str, description: &str, annotations: Value, input_schema: Value) -> Value {
    json!({
        "name": name,
        "description": description,
        "annotations": annotations,
        "inputSchema": input_schema,
    })
}

fn read_only(title: &str) -> Value {
    json!({ "title": title, "readOnlyHint": true, "destructiveHint": false, "openWorldHint": true })
}

fn publishing(title: &str) -> Value {
    json!({ "title": title, "readOnlyHint": false, "destructiveHint": false, "openWorldHint": true })
}

/// Number of tools in the catalog.
pub fn tool_count() -> usize {
    tool_definitions().len()
}

/// Tool counts per category, surfaced through the server-info resource.
pub fn tool_categories() -> Value {
    json!({
        "account": 3,
        "publishing": 4,
        "media": 3,
        "comments": 6,
        "stories": 2,
        "discovery": 1,
        "content_publishing_limit": 1,
        "hashtags": 3,
        "mentions": 2,
    })
}

/// The full catalog, in stable order.
pub fn tool_definitions() -> Vec<Value> {
    vec![
        // ── Account ──────────────────────────────────────────────────────
        tool_def(
            "ig_get_account",
            "Get Instagram Business/Creator account info: username, name, bio, followers, following, media count, profile picture, and website.",
            read_only("Get Account"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "fields": { "type": "string", "description": "Comma-separated fields (e.g. \"username,followers_count,media_count\"). Default: all basic fields." }
                },
                "required": ["account_id"]
            }),
        ),
        tool_def(
            "ig_get_account_insights",
            "Get account-level analytics. Metrics: impressions, reach, follower_count, email_contacts, phone_call_clicks, text_message_clicks, website_clicks, profile_views. Period: day, week, days_28, lifetime.",
            read_only("Account Insights"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "metric": { "type": "string", "description": "Comma-separated metrics (e.g. \"impressions,reach,follower_count,profile_views\")" },
                    "period": { "type": "string", "description": "Aggregation period: \"day\", \"week\", \"days_28\", or \"lifetime\" (default: day)" },
                    "since": { "type": "string", "description": "Start date YYYY-MM-DD or Unix timestamp" },
                    "until": { "type": "string", "description": "End date YYYY-MM-DD or Unix timestamp (max 30 days range)" }
                },
                "required": ["account_id", "metric"]
            }),
        ),
        tool_def(
            "ig_list_media",
            "List media posts from an Instagram account. Returns ID, caption, type (IMAGE/VIDEO/CAROUSEL_ALBUM), URL, permalink, timestamp, likes, and comments count.",
            read_only("List Media"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "limit": { "type": "number", "description": "Number of media to return (default: 25, max: 100)" },
                    "fields": { "type": "string", "description": "Comma-separated fields (default: id,caption,media_type,media_url,permalink,timestamp,like_count,comments_count)" }
                },
                "required": ["account_id"]
            }),
        ),
        // ── Publishing ───────────────────────────────────────────────────
        tool_def(
            "ig_publish_photo",
            "Publish a photo post to Instagram. Requires a public image URL. Handles the 2-step process (create container → publish) automatically.",
            publishing("Publish Photo"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "image_url": { "type": "string", "description": "Public URL of the image (JPEG recommended, max 8MB)" },
                    "caption": { "type": "string", "description": "Post caption (max 2200 characters, up to 30 hashtags)" }
                },
                "required": ["account_id", "image_url"]
            }),
        ),
        tool_def(
            "ig_publish_carousel",
            "Publish a carousel post (multiple images/videos) to Instagram. Provide 2-10 media URLs. Each item can be an image or video URL.",
            publishing("Publish Carousel"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "media_urls": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of 2-10 public media URLs (images or videos). Videos auto-detected by extension (.mp4, .mov, .avi, .wmv)."
                    },
                    "caption": { "type": "string", "description": "Post caption (max 2200 characters)" }
                },
                "required": ["account_id", "media_urls"]
            }),
        ),
        tool_def(
            "ig_publish_reel",
            "Publish a Reel (short video) to Instagram. Video must be publicly accessible. Supports cover image and share-to-feed option.",
            publishing("Publish Reel"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "video_url": { "type": "string", "description": "Public URL of the video file (MP4, max 15 min, max 1GB)" },
                    "caption": { "type": "string", "description": "Reel caption (max 2200 characters)" },
                    "cover_url": { "type": "string", "description": "Public URL of cover image (optional)" },
                    "share_to_feed": { "type": "boolean", "description": "Also show in profile grid feed (default: true)" }
                },
                "required": ["account_id", "video_url"]
            }),
        ),
        tool_def(
            "ig_publish_story",
            "Publish a Story (image or video) to Instagram. Stories disappear after 24 hours.",
            publishing("Publish Story"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "media_url": { "type": "string", "description": "Public URL of image or video" },
                    "media_type": { "type": "string", "description": "\"IMAGE\" or \"VIDEO\" (default: IMAGE)" }
                },
                "required": ["account_id", "media_url"]
            }),
        ),
        // ── Media ────────────────────────────────────────────────────────
        tool_def(
            "ig_get_media",
            "Get details of a single Instagram media post: caption, type, URL, permalink, timestamp, likes, and comments count.",
            read_only("Get Media"),
            json!({
                "type": "object",
                "properties": {
                    "media_id": { "type": "string", "description": "Instagram Media ID" },
                    "fields": { "type": "string", "description": "Comma-separated fields to return" }
                },
                "required": ["media_id"]
            }),
        ),
        tool_def(
            "ig_get_media_insights",
            "Get analytics for a specific media post. Image/Carousel metrics: impressions, reach, engagement, saved. Video/Reel metrics: plays, reach, total_interactions, saved.",
            read_only("Media Insights"),
            json!({
                "type": "object",
                "properties": {
                    "media_id": { "type": "string", "description": "Instagram Media ID" },
                    "metric": { "type": "string", "description": "Comma-separated metrics (e.g. \"impressions,reach,engagement,saved\" for images or \"plays,reach,total_interactions\" for reels)" }
                },
                "required": ["media_id", "metric"]
            }),
        ),
        tool_def(
            "ig_get_children",
            "Get individual items from a carousel post. Returns each child media with ID, type, and URL.",
            read_only("Get Carousel Children"),
            json!({
                "type": "object",
                "properties": {
                    "media_id": { "type": "string", "description": "Carousel media ID (must be CAROUSEL_ALBUM type)" }
                },
                "required": ["media_id"]
            }),
        ),
        // ── Comments ─────────────────────────────────────────────────────
        tool_def(
            "ig_list_comments",
            "List comments on an Instagram media post. Returns comment ID, text, username, timestamp, like count, and hidden status.",
            read_only("List Comments"),
            json!({
                "type": "object",
                "properties": {
                    "media_id": { "type": "string", "description": "Instagram Media ID to get comments from" },
                    "limit": { "type": "number", "description": "Number of comments to return (default: 25)" }
                },
                "required": ["media_id"]
            }),
        ),
        tool_def(
            "ig_get_comment",
            "Get a single comment with its replies. Returns comment text, author, timestamp, like count, and threaded replies.",
            read_only("Get Comment"),
            json!({
                "type": "object",
                "properties": {
                    "comment_id": { "type": "string", "description": "Instagram Comment ID" }
                },
                "required": ["comment_id"]
            }),
        ),
        tool_def(
            "ig_reply_comment",
            "Reply to an Instagram comment. Creates a threaded reply under the comment.",
            publishing("Reply to Comment"),
            json!({
                "type": "object",
                "properties": {
                    "comment_id": { "type": "string", "description": "Comment ID to reply to" },
                    "message": { "type": "string", "description": "Reply text" }
                },
                "required": ["comment_id", "message"]
            }),
        ),
        tool_def(
            "ig_delete_comment",
            "Permanently delete a comment from an Instagram post.",
            json!({ "title": "Delete Comment", "readOnlyHint": false, "destructiveHint": true, "openWorldHint": false }),
            json!({
                "type": "object",
                "properties": {
                    "comment_id": { "type": "string", "description": "Comment ID to delete" }
                },
                "required": ["comment_id"]
            }),
        ),
        tool_def(
            "ig_hide_comment",
            "Hide or unhide a comment. Hidden comments are only visible to the commenter.",
            json!({ "title": "Hide/Unhide Comment", "readOnlyHint": false, "destructiveHint": false, "idempotentHint": true, "openWorldHint": false }),
            json!({
                "type": "object",
                "properties": {
                    "comment_id": { "type": "string", "description": "Comment ID to hide/unhide" },
                    "hide": { "type": "boolean", "description": "true to hide, false to unhide" }
                },
                "required": ["comment_id", "hide"]
            }),
        ),
        tool_def(
            "ig_list_replies",
            "List threaded replies under a comment. Returns reply ID, text, username, timestamp, and like count.",
            read_only("List Replies"),
            json!({
                "type": "object",
                "properties": {
                    "comment_id": { "type": "string", "description": "Comment ID to list replies from" },
                    "limit": { "type": "number", "description": "Number of replies to return (default: 25)" }
                },
                "required": ["comment_id"]
            }),
        ),
        // ── Discovery ────────────────────────────────────────────────────
        tool_def(
            "ig_discover_user",
            "Look up another Business/Creator account by username (Business Discovery): bio, followers, following, and media count.",
            read_only("Discover User"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Your Instagram Business Account ID" },
                    "username": { "type": "string", "description": "Username to look up (without @)" },
                    "fields": { "type": "string", "description": "Comma-separated fields to return for the discovered account" }
                },
                "required": ["account_id", "username"]
            }),
        ),
        // ── Content Publishing Limit ─────────────────────────────────────
        tool_def(
            "ig_get_content_publishing_limit",
            "Get the account's publishing quota usage. Instagram allows max 100 API-published posts per 24 hours.",
            read_only("Content Publishing Limit"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" }
                },
                "required": ["account_id"]
            }),
        ),
        // ── Stories ──────────────────────────────────────────────────────
        tool_def(
            "ig_list_stories",
            "List currently active Stories on the account. Stories disappear after 24 hours.",
            read_only("List Stories"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" }
                },
                "required": ["account_id"]
            }),
        ),
        tool_def(
            "ig_get_story_insights",
            "Get insights for a specific Story. Metrics: impressions, reach, replies, taps_forward, taps_back, exits.",
            read_only("Story Insights"),
            json!({
                "type": "object",
                "properties": {
                    "story_id": { "type": "string", "description": "Story media ID" },
                    "metric": { "type": "string", "description": "Comma-separated metrics (e.g. \"impressions,reach,replies,taps_forward,taps_back,exits\")" }
                },
                "required": ["story_id", "metric"]
            }),
        ),
        // ── Hashtags ─────────────────────────────────────────────────────
        tool_def(
            "ig_search_hashtag",
            "Search for a hashtag by name and get its ID. Use the returned ID with ig_get_hashtag_recent or ig_get_hashtag_top. Limited to 30 searches per 7 days.",
            read_only("Search Hashtag"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID (required for hashtag search)" },
                    "query": { "type": "string", "description": "Hashtag name without # (e.g. \"travel\")" }
                },
                "required": ["account_id", "query"]
            }),
        ),
        tool_def(
            "ig_get_hashtag_recent",
            "Get recent media posts for a hashtag. Returns public posts from the last 24 hours. Use ig_search_hashtag first to get the hashtag_id.",
            read_only("Hashtag Recent Media"),
            json!({
                "type": "object",
                "properties": {
                    "hashtag_id": { "type": "string", "description": "Hashtag ID from ig_search_hashtag" },
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "fields": { "type": "string", "description": "Comma-separated fields (default: id,caption,media_type,permalink,timestamp,like_count,comments_count)" }
                },
                "required": ["hashtag_id", "account_id"]
            }),
        ),
        tool_def(
            "ig_get_hashtag_top",
            "Get top (most popular) media posts for a hashtag. Returns the most engaged public posts. Use ig_search_hashtag first to get the hashtag_id.",
            read_only("Hashtag Top Media"),
            json!({
                "type": "object",
                "properties": {
                    "hashtag_id": { "type": "string", "description": "Hashtag ID from ig_search_hashtag" },
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "fields": { "type": "string", "description": "Comma-separated fields" }
                },
                "required": ["hashtag_id", "account_id"]
            }),
        ),
        // ── Mentions ─────────────────────────────────────────────────────
        tool_def(
            "ig_list_tags",
            "List media posts where the account has been tagged (photo tags, not @mentions). Returns post details.",
            read_only("List Tagged Media"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "limit": { "type": "number", "description": "Number of tagged media to return (default: 25)" }
                },
                "required": ["account_id"]
            }),
        ),
        tool_def(
            "ig_get_mentioned_media",
            "Get details of a media post where the account was @mentioned in a caption. Requires the mentioned_media_id from a webhook notification.",
            read_only("Get Mentioned Media"),
            json!({
                "type": "object",
                "properties": {
                    "account_id": { "type": "string", "description": "Instagram Business Account ID" },
                    "media_id": { "type": "string", "description": "Mentioned media ID (from webhook notification or mention data)" }
                },
                "required": ["account_id", "media_id"]
            }),
        ),
    ]
}
