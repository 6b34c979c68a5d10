//! Bot keyboards sent alongside `messages.send`.
//!
//! The keyboard travels as a JSON string in the `keyboard` parameter.

use serde::{Deserialize, Serialize};

/// A bot keyboard: rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    /// Hide the keyboard after the first press.
    #[serde(default)]
    pub one_time: bool,
    pub buttons: Vec<Vec<Button>>,
    /// Attach the keyboard to the message instead of the input field.
    #[serde(default)]
    pub inline: bool,
}

impl Keyboard {
    /// Creates an empty keyboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row of buttons.
    pub fn with_row(mut self, row: Vec<Button>) -> Self {
        self.buttons.push(row);
        self
    }

    /// Marks the keyboard as one-time.
    pub fn one_time(mut self) -> Self {
        self.one_time = true;
        self
    }

    /// Marks the keyboard as inline.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

/// A keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub action: ButtonAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ButtonColor>,
}

impl Button {
    /// Creates a text button.
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            action: ButtonAction::Text {
                label: label.into(),
                payload: None,
            },
            color: None,
        }
    }

    /// Sets the button color.
    pub fn with_color(mut self, color: ButtonColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// What pressing a button does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ButtonAction {
    Text {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<String>,
    },
    OpenLink {
        link: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<String>,
    },
    Location {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<String>,
    },
    Callback {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<String>,
    },
}

/// Button color, only honored for text and callback buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonColor {
    Primary,
    Secondary,
    Negative,
    Positive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_wire_shape() {
        let keyboard = Keyboard::new()
            .one_time()
            .with_row(vec![Button::text("Yes").with_color(ButtonColor::Positive)]);

        let value = serde_json::to_value(&keyboard).unwrap();
        assert_eq!(value["one_time"], true);
        assert_eq!(value["inline"], false);
        let button = &value["buttons"][0][0];
        assert_eq!(button["action"]["type"], "text");
        assert_eq!(button["action"]["label"], "Yes");
        assert!(button["action"].get("payload").is_none());
        assert_eq!(button["color"], "positive");
    }

    #[test]
    fn open_link_tag() {
        let action = ButtonAction::OpenLink {
            link: "https://vk.com".to_string(),
            label: "Open".to_string(),
            payload: None,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "open_link");
    }
}
