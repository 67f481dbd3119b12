/// A service-owned conversation thread.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Thread {
    /// The service-assigned thread identifier.
    pub id: String,
}

/// The role that authored a thread message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageRole {
    /// A user turn.
    User,
    /// An assistant turn.
    Assistant,
    /// A role this crate doesn't know about.
    Other(String),
}

impl MessageRole {
    /// Returns the lowercase wire name of this role.
    pub fn as_str(&self) -> &str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Other(role) => role,
        }
    }
}

/// A reference to an image file produced by a run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageFile {
    /// The service-assigned file identifier.
    pub file_id: String,
}

/// An ordered record of one conversation turn, retrieved after run
/// completion for display. Read-only from the caller's perspective.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadMessage {
    /// Who authored the message.
    pub role: MessageRole,
    /// The text content of the message.
    pub text: String,
    /// Image attachments produced alongside the text.
    pub attachments: Vec<ImageFile>,
}
