//! Gateway events.
//!
//! ```text
//! Event (post_type)
//! ├── Message(MessageEvent)  message_type: group | private
//! ├── Notice(NoticeEvent)    notice_type: group_upload | group_admin | ...
//! ├── Request(RequestEvent)  request_type: friend | group
//! └── Meta(MetaEvent)        meta_event_type: heartbeat | lifecycle
//! ```
//!
//! `message` and `message_sent` both decode to [`MessageEvent`].

mod message;
mod meta;
mod notice;
mod request;

pub use message::*;
pub use meta::*;
pub use notice::*;
pub use request::*;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{ModelError, Result},
    registry::{Context, Discriminator, ModelRegistry},
    serializable::{i64_field, Serializable},
};

wire_enum! {
    pub enum PostType {
        Meta = "meta_event",
        Message = "message",
        /// Messages the bot account sent itself.
        MessageSent = "message_sent",
        Notice = "notice",
        Request = "request",
    }
}

/// Fields every event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BasicEvent {
    pub time: i64,
    pub post_type: PostType,
    pub self_id: i64,
}

impl BasicEvent {
    fn read(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ModelError::Parameter(format!(
                "event must be a JSON object, got {value}"
            )));
        }
        Ok(Self {
            time: i64_field(value, "time")?,
            self_id: i64_field(value, "self_id")?,
            post_type: PostType::read(value)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Message(MessageEvent),
    Notice(NoticeEvent),
    Request(RequestEvent),
    Meta(MetaEvent),
}

impl Event {
    pub fn basic(&self) -> &BasicEvent {
        match self {
            Self::Message(e) => e.basic(),
            Self::Notice(e) => e.basic(),
            Self::Request(e) => e.basic(),
            Self::Meta(e) => e.basic(),
        }
    }

    pub fn time(&self) -> i64 {
        self.basic().time
    }

    pub fn self_id(&self) -> i64 {
        self.basic().self_id
    }

    pub fn post_type(&self) -> PostType {
        self.basic().post_type
    }

    pub fn as_message(&self) -> Option<&MessageEvent> {
        match self {
            Self::Message(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_notice(&self) -> Option<&NoticeEvent> {
        match self {
            Self::Notice(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_request(&self) -> Option<&RequestEvent> {
        match self {
            Self::Request(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_meta(&self) -> Option<&MetaEvent> {
        match self {
            Self::Meta(e) => Some(e),
            _ => None,
        }
    }
}

impl Serializable for Event {
    fn to_json(&self) -> Result<Value> {
        Err(ModelError::NonSerializable("event"))
    }

    fn from_json(value: &Value) -> Result<Self> {
        parse_event(value)
    }
}

/// Decodes one gateway event with the global registry.
pub fn parse_event(value: &Value) -> Result<Event> {
    ModelRegistry::global().parse_event(value)
}

/// Decodes one gateway frame from its JSON text.
pub fn parse_event_str(s: &str) -> Result<Event> {
    let value: Value = serde_json::from_str(s)?;
    parse_event(&value)
}

pub(crate) fn parse_event_in(value: &Value, cx: &Context<'_>) -> Result<Event> {
    let basic = BasicEvent::read(value)?;
    cx.registry().events().dispatch(basic.post_type, value, cx)
}

pub(crate) fn register_defaults(r: &mut ModelRegistry) -> Result<()> {
    let events = r.events_mut();
    events.register(PostType::Message, message::parse_root)?;
    events.register(PostType::MessageSent, message::parse_root)?;
    events.register(PostType::Notice, notice::parse_root)?;
    events.register(PostType::Request, request::parse_root)?;
    events.register(PostType::Meta, meta::parse_root)?;

    message::register_defaults(r.messages_mut())?;
    notice::register_defaults(r.notices_mut())?;
    request::register_defaults(r.requests_mut())?;
    meta::register_defaults(r.metas_mut())?;
    Ok(())
}
