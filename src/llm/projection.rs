//! Maps the conversation log onto the chat-completions message shape.
//!
//! Projection is pure: the same log always yields the same message list, and
//! every call re-sends the full history including earlier images.

use serde::{ Deserialize, Serialize };

use crate::image::encode_data_url;
use crate::models::chat::{ ContentPart, Role, Turn };

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: Role,
    pub content: ApiContent,
}

/// The boundary accepts either a bare string or a list of typed parts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiContent {
    Text(String),
    Parts(Vec<ContentItem>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Text {
        text: String,
    },
    ImageUrl {
        image_url: ImageUrl,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ContentItem {
    fn from_part(part: &ContentPart) -> Self {
        match part {
            ContentPart::Text { value } => ContentItem::Text { text: value.clone() },
            ContentPart::Image { mime_type, bytes } =>
                ContentItem::ImageUrl {
                    image_url: ImageUrl { url: encode_data_url(mime_type, bytes) },
                },
        }
    }
}

pub fn project_turn(turn: &Turn) -> ApiMessage {
    let items = match turn.role {
        Role::User => turn.parts.iter().map(ContentItem::from_part).collect(),
        Role::Assistant =>
            vec![ContentItem::Text {
                text: turn.text().unwrap_or_default().to_string(),
            }],
    };
    ApiMessage {
        role: turn.role,
        content: ApiContent::Parts(items),
    }
}

pub fn project(log: &[Turn]) -> Vec<ApiMessage> {
    log.iter().map(project_turn).collect()
}
