use serde::{ Deserialize, Serialize };
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One atomic piece of a turn. Image bytes are owned by the turn that holds them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentPart {
    Text {
        value: String,
    },
    Image {
        mime_type: String,
        bytes: Vec<u8>,
    },
}

impl ContentPart {
    pub fn text(value: impl Into<String>) -> Self {
        ContentPart::Text { value: value.into() }
    }

    pub fn image(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        ContentPart::Image { mime_type: mime_type.into(), bytes }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, ContentPart::Image { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<ContentPart>,
}

impl Turn {
    /// Builds a user turn with the text first and the image second.
    /// Returns `None` when neither is present; blank text counts as absent.
    pub fn user(text: Option<String>, image: Option<ContentPart>) -> Option<Self> {
        let mut parts = Vec::with_capacity(2);
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            parts.push(ContentPart::Text { value: text });
        }
        if let Some(image) = image {
            parts.push(image);
        }
        if parts.is_empty() {
            return None;
        }
        Some(Self { role: Role::User, parts })
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            parts: vec![ContentPart::text(text)],
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            ContentPart::Text { value } => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn image(&self) -> Option<&ContentPart> {
        self.parts.iter().find(|part| part.is_image())
    }
}

/// What the input surface hands over for one interaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserInput {
    pub text: Option<String>,
    pub image: Option<ContentPart>,
}

impl UserInput {
    pub fn is_empty(&self) -> bool {
        let no_text = self.text
            .as_deref()
            .map(|t| t.trim().is_empty())
            .unwrap_or(true);
        no_text && self.image.is_none()
    }
}
