//! Operations on walls and wall comments (`wall.*`).

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use vkapi_core::{Extended, Group, User, WallComment, WallPost};

use crate::client::Client;
use crate::envelope;
use crate::error::Result;
use crate::params::{Params, Target};

/// `{items, profiles, groups}` without a count.
#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct SideTabled<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    profiles: Vec<User>,
    #[serde(default)]
    groups: Vec<Group>,
}

impl<T> From<SideTabled<T>> for Extended<T> {
    fn from(raw: SideTabled<T>) -> Self {
        Extended::from_items(raw.items, raw.profiles, raw.groups)
    }
}

fn decode_side_tabled<T: DeserializeOwned>(
    method: &str,
    payload: &RawValue,
) -> Result<Extended<T>> {
    let raw: SideTabled<T> = envelope::decode(method, payload)?;
    Ok(raw.into())
}

impl Client {
    /// Returns posts from a wall addressed by owner id or screen name
    /// (`wall.get`).
    ///
    /// Pass `extended=1` in `params` to receive the side tables.
    pub async fn wall_get(
        &self,
        target: impl Into<Target>,
        count: i64,
        mut params: Params,
    ) -> Result<Extended<WallPost>> {
        params
            .set_int("count", count)
            .set_target("owner_id", &target.into())?;

        self.call("wall.get", &params).await
    }

    /// Returns posts by their full ids, e.g. `"-1_340364,1_45558"`
    /// (`wall.getById`).
    ///
    /// The response shape follows the `extended` flag in `params`: a bare
    /// list without it, `{items, profiles, groups}` with it. Both come back
    /// as [`Extended`] with `count` set to the number of posts.
    pub async fn wall_get_by_id(&self, posts: &str, mut params: Params) -> Result<Extended<WallPost>> {
        const METHOD: &str = "wall.getById";
        params.set("posts", posts);

        let extended = params.is_flag_set("extended");
        self.call_with(METHOD, &params, |payload| {
            if extended {
                decode_side_tabled(METHOD, payload)
            } else {
                let items: Vec<WallPost> = envelope::decode(METHOD, payload)?;
                Ok(Extended::from_items(items, Vec::new(), Vec::new()))
            }
        })
        .await
    }

    /// Publishes a post and returns its id (`wall.post`).
    pub async fn wall_post(&self, owner_id: i64, message: &str, mut params: Params) -> Result<i64> {
        const METHOD: &str = "wall.post";
        params
            .set_int("owner_id", owner_id)
            .set("message", message);

        self.call_with(METHOD, &params, |payload| {
            envelope::extract_id(METHOD, payload, "post_id")
        })
        .await
    }

    /// Comments on a post and returns the comment id (`wall.createComment`).
    pub async fn wall_create_comment(
        &self,
        owner_id: i64,
        post_id: i64,
        message: &str,
        mut params: Params,
    ) -> Result<i64> {
        const METHOD: &str = "wall.createComment";
        params
            .set_int("owner_id", owner_id)
            .set_int("post_id", post_id)
            .set("message", message);

        self.call_with(METHOD, &params, |payload| {
            envelope::extract_id(METHOD, payload, "comment_id")
        })
        .await
    }

    /// Returns one comment (`wall.getComment`).
    ///
    /// `fields` is only sent together with `extended`.
    pub async fn wall_get_comment(
        &self,
        owner_id: i64,
        comment_id: i64,
        extended: bool,
        fields: &[&str],
    ) -> Result<Extended<WallComment>> {
        const METHOD: &str = "wall.getComment";
        let mut params = Params::new();
        params
            .set_int("owner_id", owner_id)
            .set_int("comment_id", comment_id)
            .set_flag("extended", extended);
        if extended && !fields.is_empty() {
            params.set_list("fields", fields);
        }

        self.call_with(METHOD, &params, |payload| decode_side_tabled(METHOD, payload))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::transport::StaticTransport;
    use std::sync::Arc;
    use vkapi_core::Attachment;

    fn client(body: &str) -> (Client, Arc<StaticTransport>) {
        let transport = Arc::new(StaticTransport::with_body(body));
        (Client::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn get_by_id_bare_list() {
        let body = r#"{"response": [
            {"id": 340364, "owner_id": -1, "from_id": -1, "text": "first"},
            {"id": 45558, "owner_id": 1, "from_id": 1, "text": "second", "likes": {"count": 9, "user_likes": 1}}
        ]}"#;
        let (client, transport) = client(body);

        let posts = client
            .wall_get_by_id("-1_340364,1_45558", Params::new())
            .await
            .unwrap();
        assert_eq!(posts.count, 2);
        assert!(posts.profiles.is_empty());
        assert!(posts.groups.is_empty());
        assert_eq!(posts.items[0].full_id(), "-1_340364");
        assert!(posts.items[1].likes.as_ref().unwrap().user_likes);

        assert_eq!(
            transport.last_call().unwrap().params.get("posts"),
            Some("-1_340364,1_45558")
        );
    }

    #[tokio::test]
    async fn get_by_id_extended() {
        let body = r#"{"response": {
            "items": [{"id": 1, "owner_id": -1, "from_id": -1, "text": "hi"}],
            "profiles": [],
            "groups": [{"id": 1, "name": "VK API", "screen_name": "apiclub"}]
        }}"#;
        let (client, _) = client(body);

        let posts = client
            .wall_get_by_id("-1_1", Params::from([("extended", "1")]))
            .await
            .unwrap();
        assert_eq!(posts.count, 1);
        assert_eq!(posts.group(posts.items[0].owner_id).unwrap().name, "VK API");
    }

    #[tokio::test]
    async fn get_by_id_shape_follows_flag() {
        // An extended object without the flag is not a bare list.
        let body = r#"{"response": {"items": [], "profiles": [], "groups": []}}"#;
        let (client, _) = client(body);

        let err = client.wall_get_by_id("1_1", Params::new()).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn get_by_domain_and_owner() {
        let body = r#"{"response": {"count": 120, "items": [
            {"id": 5, "owner_id": -1, "from_id": -1, "copy_history": [
                {"id": 3, "owner_id": 7, "from_id": 7, "text": "original", "attachments": [
                    {"type": "wall", "wall": {"id": 2, "owner_id": 8, "text": "deeper"}}
                ]}
            ]}
        ]}}"#;
        let (client, transport) = client(body);

        let wall = client.wall_get("apiclub", 1, Params::new()).await.unwrap();
        assert_eq!(wall.count, 120);
        let repost = &wall.items[0];
        assert!(repost.is_repost());
        let original = &repost.copy_history[0];
        assert_eq!(original.text, "original");
        match &original.attachments[0] {
            Attachment::Wall(post) => assert_eq!(post.text, "deeper"),
            other => panic!("expected wall attachment, got {other:?}"),
        }

        let params = transport.last_call().unwrap().params;
        assert_eq!(params.get("domain"), Some("apiclub"));
        assert_eq!(params.get("owner_id"), None);
        assert_eq!(params.get("count"), Some("1"));

        client
            .wall_get(-1_i64, 1, Params::from([("domain", "stale")]))
            .await
            .unwrap();
        let params = transport.last_call().unwrap().params;
        assert_eq!(params.get("owner_id"), Some("-1"));
        assert_eq!(params.get("domain"), None);
    }

    #[tokio::test]
    async fn post_returns_id() {
        let (client, transport) = client(r#"{"response": {"post_id": 2443}}"#);

        let id = client.wall_post(-1, "release notes", Params::new()).await.unwrap();
        assert_eq!(id, 2443);

        let params = transport.last_call().unwrap().params;
        insta::assert_json_snapshot!(params, @r#"
        {
          "message": "release notes",
          "owner_id": "-1"
        }
        "#);
    }

    #[tokio::test]
    async fn post_without_id_is_decode_error() {
        let (client, _) = client(r#"{"response": {}}"#);

        let err = client.wall_post(1, "x", Params::new()).await.unwrap_err();
        match err {
            Error::Decode(err) => assert_eq!(err.context(), "wall.post"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_comment_returns_id() {
        let (client, transport) = client(r#"{"response": {"comment_id": 77, "parents_stack": []}}"#);

        let id = client
            .wall_create_comment(-1, 2443, "nice", Params::new())
            .await
            .unwrap();
        assert_eq!(id, 77);
        assert_eq!(transport.last_call().unwrap().params.get("post_id"), Some("2443"));
    }

    #[tokio::test]
    async fn get_comment_counts_items() {
        let body = r#"{"response": {
            "items": [{
                "id": 77,
                "from_id": 42,
                "date": 1710496800,
                "text": "nice",
                "parents_stack": [70, 71],
                "thread": {"count": 2, "items": [], "can_post": true, "show_reply_button": true, "groups_can_post": false}
            }],
            "profiles": [{"id": 42, "first_name": "Ann", "last_name": "Lee"}]
        }}"#;
        let (client, transport) = client(body);

        let comments = client
            .wall_get_comment(-1, 77, true, &["photo_50", "sex"])
            .await
            .unwrap();
        assert_eq!(comments.count, 1);
        let comment = &comments.items[0];
        assert_eq!(comment.parents_stack, vec![70, 71]);
        assert_eq!(comment.thread.as_ref().unwrap().count, 2);
        assert_eq!(comments.profile(42).unwrap().full_name(), "Ann Lee");

        let params = transport.last_call().unwrap().params;
        assert_eq!(params.get("extended"), Some("1"));
        assert_eq!(params.get("fields"), Some("photo_50,sex"));
    }

    #[tokio::test]
    async fn get_comment_without_extended_skips_fields() {
        let (client, transport) = client(r#"{"response": {"items": []}}"#);

        let comments = client
            .wall_get_comment(-1, 77, false, &["photo_50"])
            .await
            .unwrap();
        assert_eq!(comments.count, 0);

        let params = transport.last_call().unwrap().params;
        assert_eq!(params.get("extended"), Some("0"));
        assert_eq!(params.get("fields"), None);
    }

    #[tokio::test]
    async fn api_error_is_surfaced() {
        let (client, _) = client(r#"{"error":{"error_code":15,"error_msg":"Access denied"}}"#);

        let err = client.wall_get(1_i64, 10, Params::new()).await.unwrap_err();
        assert!(err.as_api().unwrap().is_access_denied());
    }
}
