//! A2A message types
//!
//! Messages are the unit of communication between agents. Each message has a
//! role (user, agent, or system), one or more parts (text, image, file, or
//! data), and optional metadata the core never interprets.

use std::collections::HashMap;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::error::A2AError;

/// A message in the A2A protocol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,

    /// Message content parts (at least one required); order is rendering order
    pub parts: Vec<MessagePart>,

    /// Unique message identifier, assigned at creation
    #[serde(rename = "messageId")]
    pub message_id: String,

    /// Optional back-reference to the task this message belongs to
    #[serde(rename = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Optional metadata for the message, opaque to the core
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl Message {
    /// Create a new message with text content and a generated id
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![MessagePart::text(text)],
            message_id: Uuid::now_v7().to_string(),
            task_id: None,
            metadata: None,
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Create a system message with text content
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    /// Create a new message builder
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Associate this message with a task
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Add a metadata field to the message
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Add a message part
    pub fn with_part(mut self, part: MessagePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Check this message against the data-model rules
    ///
    /// Agents must validate inbound messages before acting on them. A message
    /// is malformed when it has no parts or when any part's declared kind
    /// lacks its required payload.
    pub fn validate(&self) -> Result<(), A2AError> {
        if self.parts.is_empty() {
            return Err(A2AError::MalformedMessage(
                "message must have at least one part".into(),
            ));
        }

        for part in &self.parts {
            part.validate()?;
        }

        Ok(())
    }
}

/// Builder for constructing Message instances
#[derive(Debug, Default)]
pub struct MessageBuilder {
    role: Option<Role>,
    parts: Vec<MessagePart>,
    message_id: Option<String>,
    task_id: Option<String>,
    metadata: Option<HashMap<String, Value>>,
}

impl MessageBuilder {
    /// Create a new message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role of the message
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the message parts
    pub fn parts(mut self, parts: Vec<MessagePart>) -> Self {
        self.parts = parts;
        self
    }

    /// Add a single part to the message
    pub fn part(mut self, part: MessagePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Set the message ID; a UUIDv7 is generated when unset
    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    /// Set the task ID
    pub fn task_id(mut self, id: impl Into<String>) -> Self {
        self.task_id = Some(id.into());
        self
    }

    /// Add a metadata field
    pub fn metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Build the message
    ///
    /// # Panics
    ///
    /// Panics if role is not set or if parts are empty
    pub fn build(self) -> Message {
        let role = self.role.expect("Message role is required");
        assert!(
            !self.parts.is_empty(),
            "Message must have at least one part"
        );

        Message {
            role,
            parts: self.parts,
            message_id: self
                .message_id
                .unwrap_or_else(|| Uuid::now_v7().to_string()),
            task_id: self.task_id,
            metadata: self.metadata,
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from an agent
    Agent,

    /// Message injected by the surrounding system
    System,
}

/// A part of a message
///
/// A part carries exactly one payload, selected by its `kind` tag. Payload
/// fields default to empty on deserialization so that a part whose declared
/// kind lacks its payload is caught by [`MessagePart::validate`] rather than
/// rejected as unparseable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessagePart {
    /// Text content
    Text {
        /// The text content
        #[serde(default)]
        text: String,
    },

    /// Inline image content
    Image {
        /// Base64-encoded image bytes
        #[serde(default)]
        data: String,

        /// MIME type of the image
        #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },

    /// Inline file content
    File {
        /// Base64-encoded file bytes
        #[serde(default)]
        data: String,

        /// MIME type of the file
        #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,

        /// Name of the file
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Structured data
    Data {
        /// The structured data
        #[serde(default)]
        data: Value,
    },
}

impl MessagePart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image part from raw bytes
    pub fn image(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::Image {
            data: general_purpose::STANDARD.encode(bytes),
            mime_type: Some(mime_type.into()),
        }
    }

    /// Create a file part from raw bytes
    pub fn file(name: impl Into<String>, bytes: &[u8], mime_type: Option<String>) -> Self {
        Self::File {
            data: general_purpose::STANDARD.encode(bytes),
            mime_type,
            name: Some(name.into()),
        }
    }

    /// Create a data part
    pub fn data(data: Value) -> Self {
        Self::Data { data }
    }

    /// Check that this part carries the payload its kind requires
    pub fn validate(&self) -> Result<(), A2AError> {
        match self {
            MessagePart::Text { text } if text.is_empty() => Err(A2AError::MalformedMessage(
                "text part is missing its text payload".into(),
            )),
            MessagePart::Image { data, .. } if data.is_empty() => Err(A2AError::MalformedMessage(
                "image part is missing its data payload".into(),
            )),
            MessagePart::File { data, .. } if data.is_empty() => Err(A2AError::MalformedMessage(
                "file part is missing its data payload".into(),
            )),
            MessagePart::Data { data } if data.is_null() => Err(A2AError::MalformedMessage(
                "data part is missing its data payload".into(),
            )),
            _ => Ok(()),
        }
    }
}
