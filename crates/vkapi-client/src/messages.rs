//! Operations on private messages (`messages.*`).

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use vkapi_core::{ConversationMessage, Counted, DialogItem, Extended, Geo, HistoryAttachments, Message};

use crate::client::Client;
use crate::config::GeoPolicy;
use crate::envelope;
use crate::error::{DecodeError, Result};
use crate::params::{Activity, MediaType, Params, Target, dialog_peer};

impl Client {
    /// Lists dialogs with their last message (`messages.getDialogs`).
    ///
    /// How a malformed `geo` block on a message is handled depends on
    /// [`ClientConfig::geo_policy`](crate::ClientConfig::geo_policy).
    pub async fn dialogs_get(&self, count: i64, mut params: Params) -> Result<Counted<DialogItem>> {
        const METHOD: &str = "messages.getDialogs";
        params.set_int("count", count);

        let policy = self.config().geo_policy;
        self.call_with(METHOD, &params, |payload| {
            let mut value: Value = envelope::decode(METHOD, payload)?;
            if policy == GeoPolicy::Tolerant {
                drop_malformed_geo(&mut value);
            }
            serde_json::from_value(value).map_err(|e| DecodeError::json(METHOD, e).into())
        })
        .await
    }

    /// Lists attachments shared in a conversation
    /// (`messages.getHistoryAttachments`).
    pub async fn history_attachments_get(
        &self,
        peer_id: i64,
        media_type: MediaType,
        count: i64,
        mut params: Params,
    ) -> Result<HistoryAttachments> {
        params
            .set_int("count", count)
            .set("media_type", media_type.as_str())
            .set_int("peer_id", peer_id);

        self.call("messages.getHistoryAttachments", &params).await
    }

    /// Returns the message history of a conversation (`messages.getHistory`).
    ///
    /// With `is_dialog` set, `chat_id` addresses a multi-user chat;
    /// otherwise it is a user id.
    pub async fn messages_get_history(
        &self,
        count: i64,
        chat_id: i64,
        is_dialog: bool,
        mut params: Params,
    ) -> Result<(i64, Vec<Message>)> {
        params
            .set_int("user_id", dialog_peer(chat_id, is_dialog))
            .set_int("count", count);

        let history: Counted<Message> = self.call("messages.getHistory", &params).await?;
        Ok(history.into_parts())
    }

    /// Returns messages by id (`messages.getById`).
    pub async fn messages_get_by_id(
        &self,
        message_ids: &[i64],
        mut params: Params,
    ) -> Result<(i64, Vec<Message>)> {
        params.set_ids("message_ids", message_ids);

        let messages: Counted<Message> = self.call("messages.getById", &params).await?;
        Ok(messages.into_parts())
    }

    /// Sends a message to a peer id or a screen name (`messages.send`).
    ///
    /// Returns the id of the sent message.
    pub async fn messages_send(
        &self,
        target: impl Into<Target>,
        message: &str,
        mut params: Params,
    ) -> Result<i64> {
        params
            .set("message", message)
            .set_target("peer_id", &target.into())?;

        self.call("messages.send", &params).await
    }

    /// Deletes messages (`messages.delete`).
    ///
    /// Returns how many of `message_ids` were actually deleted.
    pub async fn messages_delete(
        &self,
        message_ids: &[i64],
        spam: bool,
        delete_for_all: bool,
    ) -> Result<usize> {
        const METHOD: &str = "messages.delete";
        let mut params = Params::new();
        params
            .set_ids("message_ids", message_ids)
            .set_flag("spam", spam)
            .set_flag("delete_for_all", delete_for_all);

        self.call_with(METHOD, &params, |payload| {
            envelope::count_successes(METHOD, payload)
        })
        .await
    }

    /// Shows an activity indicator to a user (`messages.setActivity`).
    pub async fn messages_set_activity(
        &self,
        user_id: i64,
        activity: Activity,
        mut params: Params,
    ) -> Result<()> {
        params
            .set_int("user_id", user_id)
            .set("type", activity.as_str());

        let _: i64 = self.call("messages.setActivity", &params).await?;
        Ok(())
    }

    /// Returns messages by their per-conversation ids
    /// (`messages.getByConversationMessageId`).
    ///
    /// `fields` selects the profile fields of the side tables and is only
    /// sent when non-empty.
    pub async fn messages_get_by_conversation_message_id(
        &self,
        peer_id: i64,
        conversation_message_ids: &[i64],
        extended: bool,
        fields: &[&str],
        group_id: Option<i64>,
    ) -> Result<Extended<ConversationMessage>> {
        let mut params = Params::new();
        params
            .set_int("peer_id", peer_id)
            .set_ids("conversation_message_ids", conversation_message_ids)
            .set_flag("extended", extended);
        if !fields.is_empty() {
            params.set_list("fields", fields);
        }
        if let Some(group_id) = group_id {
            params.set_int("group_id", group_id);
        }

        self.call("messages.getByConversationMessageId", &params)
            .await
    }
}

/// Drops `geo` blocks that do not decode as [`Geo`] from dialog items.
///
/// A `null` geo is absent, not malformed. Returns the number of dropped
/// blocks.
fn drop_malformed_geo(payload: &mut Value) -> usize {
    let Some(items) = payload.get_mut("items").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut dropped = 0;
    for message in items.iter_mut().filter_map(|item| item.get_mut("message")) {
        let Some(object) = message.as_object_mut() else {
            continue;
        };
        let malformed = object
            .get("geo")
            .filter(|geo| !geo.is_null())
            .is_some_and(|geo| Geo::deserialize(geo).is_err());
        if malformed {
            let id = object.get("id").and_then(Value::as_i64).unwrap_or_default();
            warn!(message_id = id, "dropping malformed geo block");
            object.remove("geo");
            dropped += 1;
        }
    }
    dropped
}
