//! Wall posts and comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attachment::Attachment;

/// A wall post.
///
/// A repost carries the chain it reposts in `copy_history`, which may in turn
/// contain reposts of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallPost {
    pub id: i64,
    pub from_id: i64,
    pub owner_id: i64,
    pub to_id: i64,
    pub date: i64,
    #[serde(rename = "marked_as_ads", with = "crate::flag")]
    pub marked_as_ad: bool,
    #[serde(with = "crate::flag")]
    pub is_pinned: bool,
    /// `"post"`, `"copy"`, `"reply"`, `"postpone"` or `"suggest"`.
    pub post_type: String,
    pub copy_post_date: i64,
    pub copy_post_type: String,
    pub copy_owner_id: i64,
    pub copy_post_id: i64,
    pub copy_history: Vec<WallPost>,
    pub created_by: i64,
    pub text: String,
    #[serde(with = "crate::flag")]
    pub can_delete: bool,
    #[serde(with = "crate::flag")]
    pub can_pin: bool,
    pub attachments: Vec<Attachment>,
    pub post_source: Option<PostSource>,
    pub comments: Option<CommentsInfo>,
    pub likes: Option<LikesInfo>,
    pub reposts: Option<RepostsInfo>,
    pub views: Option<ViewsInfo>,
    pub online: i64,
    pub reply_count: i64,
    pub signer_id: Option<i64>,
}

impl WallPost {
    /// Returns the publication time.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        crate::time::from_unix(self.date)
    }

    /// Returns true when this post reposts another one.
    pub fn is_repost(&self) -> bool {
        !self.copy_history.is_empty()
    }

    /// Returns the `{owner_id}_{id}` key used by `wall.getById`.
    pub fn full_id(&self) -> String {
        format!("{}_{}", self.owner_id, self.id)
    }
}

/// Comment counter of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsInfo {
    pub count: i64,
    #[serde(with = "crate::flag")]
    pub can_post: bool,
    pub groups_can_post: bool,
}

/// Like counter of a post, relative to the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikesInfo {
    pub count: i64,
    #[serde(with = "crate::flag")]
    pub user_likes: bool,
    #[serde(with = "crate::flag")]
    pub can_like: bool,
    #[serde(with = "crate::flag")]
    pub can_publish: bool,
}

/// Repost counter of a post, relative to the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepostsInfo {
    pub count: i64,
    #[serde(with = "crate::flag")]
    pub user_reposted: bool,
}

/// View counter of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsInfo {
    pub count: i64,
}

/// How a post was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSource {
    /// `"vk"`, `"widget"`, `"api"`, `"rss"` or `"sms"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub platform: Option<String>,
}

/// A comment on a wall post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallComment {
    pub id: i64,
    pub from_id: i64,
    pub post_id: i64,
    pub owner_id: i64,
    pub date: i64,
    pub text: String,
    pub donut: Option<Donut>,
    pub reply_to_user: Option<i64>,
    pub reply_to_comment: Option<i64>,
    pub attachments: Vec<Attachment>,
    /// Ids of the ancestor comments, root first.
    pub parents_stack: Vec<i64>,
    pub thread: Option<CommentThread>,
}

impl WallComment {
    /// Returns true for a reply inside another comment's thread.
    pub fn is_reply(&self) -> bool {
        !self.parents_stack.is_empty()
    }
}

/// Paid-subscriber ("donut") marker on a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Donut {
    pub is_don: bool,
    pub placeholder: String,
}

/// The reply thread under a comment.
///
/// `items` is kept as raw JSON: the API only includes a preview of the
/// thread, and callers fetch the full thread separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentThread {
    pub count: i64,
    pub items: Option<Value>,
    pub can_post: bool,
    pub show_reply_button: bool,
    pub groups_can_post: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_post_with_counters() {
        let json = r#"{
            "id": 2442,
            "from_id": -1,
            "owner_id": -1,
            "date": 1710496800,
            "marked_as_ads": 0,
            "is_pinned": 1,
            "post_type": "post",
            "text": "release notes",
            "can_delete": 0,
            "can_pin": 1,
            "comments": {"count": 12, "can_post": 1, "groups_can_post": true},
            "likes": {"count": 300, "user_likes": 0, "can_like": 1, "can_publish": 1},
            "reposts": {"count": 7, "user_reposted": 0},
            "views": {"count": 10000},
            "post_source": {"type": "api"}
        }"#;

        let post: WallPost = serde_json::from_str(json).unwrap();
        assert!(post.is_pinned);
        assert!(!post.marked_as_ad);
        assert!(post.can_pin);
        assert_eq!(post.full_id(), "-1_2442");
        assert!(post.posted_at().is_some());

        let comments = post.comments.unwrap();
        assert_eq!(comments.count, 12);
        assert!(comments.can_post);
        assert!(comments.groups_can_post);

        let likes = post.likes.unwrap();
        assert_eq!(likes.count, 300);
        assert!(!likes.user_likes);
        assert!(likes.can_publish);

        assert_eq!(post.reposts.unwrap().count, 7);
        assert_eq!(post.post_source.as_ref().unwrap().kind, "api");
        assert!(!post.is_repost());
    }

    #[test]
    fn absent_counters_stay_absent() {
        let post: WallPost = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(post.comments.is_none());
        assert!(post.likes.is_none());
        assert!(post.reposts.is_none());
        assert!(post.views.is_none());
    }

    #[test]
    fn copy_history_chain() {
        let json = r#"{
            "id": 3,
            "owner_id": 100,
            "text": "repost of a repost",
            "copy_history": [{
                "id": 2,
                "owner_id": 200,
                "text": "repost",
                "copy_history": [{
                    "id": 1,
                    "owner_id": 300,
                    "text": "original",
                    "attachments": [{"type": "photo", "photo": {"id": 9, "owner_id": 300}}]
                }]
            }]
        }"#;

        let post: WallPost = serde_json::from_str(json).unwrap();
        assert!(post.is_repost());
        let middle = &post.copy_history[0];
        let original = &middle.copy_history[0];
        assert_eq!(middle.full_id(), "200_2");
        assert_eq!(original.text, "original");
        assert!(post.attachments.is_empty());
        assert!(middle.attachments.is_empty());
        assert_eq!(original.attachments.len(), 1);
    }

    #[test]
    fn parse_comment_with_thread() {
        let json = r#"{
            "id": 5,
            "from_id": 42,
            "date": 1710496800,
            "text": "first",
            "donut": {"is_don": false, "placeholder": ""},
            "parents_stack": [],
            "thread": {
                "count": 2,
                "items": [{"id": 6, "text": "reply"}],
                "can_post": true,
                "show_reply_button": true,
                "groups_can_post": false
            }
        }"#;

        let comment: WallComment = serde_json::from_str(json).unwrap();
        assert!(!comment.is_reply());
        let thread = comment.thread.unwrap();
        assert_eq!(thread.count, 2);
        assert!(thread.can_post);
        assert!(thread.items.unwrap().is_array());
    }

    #[test]
    fn thread_flags_are_booleans() {
        let json = r#"{"id": 5, "thread": {"count": 0, "can_post": 1}}"#;
        assert!(serde_json::from_str::<WallComment>(json).is_err());
    }

    #[test]
    fn reply_has_parent_chain() {
        let json = r#"{"id": 8, "reply_to_comment": 6, "parents_stack": [5, 6]}"#;
        let comment: WallComment = serde_json::from_str(json).unwrap();
        assert!(comment.is_reply());
        assert_eq!(comment.parents_stack, vec![5, 6]);
    }
}
