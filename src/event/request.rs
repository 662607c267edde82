use serde::Deserialize;
use serde_json::Value;

use super::{BasicEvent, Event};
use crate::{
    error::Result,
    registry::{Context, Discriminator, Registry},
    serializable::decode_fields,
};

wire_enum! {
    pub enum RequestType {
        Friend = "friend",
        Group = "group",
    }
}

wire_enum! {
    pub enum GroupRequestSubType {
        /// Someone asks to join the group.
        Add = "add",
        /// The bot is invited into the group.
        Invite = "invite",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FriendRequestEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    /// Opaque token used to answer the request.
    pub flag: String,
    pub user_id: i64,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupRequestEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub flag: String,
    pub user_id: i64,
    pub comment: String,
    pub sub_type: GroupRequestSubType,
    pub group_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    Friend(FriendRequestEvent),
    Group(GroupRequestEvent),
}

impl RequestEvent {
    pub fn basic(&self) -> &BasicEvent {
        match self {
            Self::Friend(e) => &e.basic,
            Self::Group(e) => &e.basic,
        }
    }

    pub fn request_type(&self) -> RequestType {
        match self {
            Self::Friend(_) => RequestType::Friend,
            Self::Group(_) => RequestType::Group,
        }
    }

    pub fn flag(&self) -> &str {
        match self {
            Self::Friend(e) => &e.flag,
            Self::Group(e) => &e.flag,
        }
    }

    pub fn user_id(&self) -> i64 {
        match self {
            Self::Friend(e) => e.user_id,
            Self::Group(e) => e.user_id,
        }
    }

    pub fn comment(&self) -> &str {
        match self {
            Self::Friend(e) => &e.comment,
            Self::Group(e) => &e.comment,
        }
    }
}

pub(super) fn parse_root(value: &Value, cx: &Context<'_>) -> Result<Event> {
    let request_type = RequestType::read(value)?;
    cx.registry()
        .requests()
        .dispatch(request_type, value, cx)
        .map(Event::Request)
}

pub(super) fn register_defaults(r: &mut Registry<RequestType, RequestEvent>) -> Result<()> {
    r.register(RequestType::Friend, |v, _| {
        decode_fields(v).map(RequestEvent::Friend)
    })?;
    r.register(RequestType::Group, |v, _| {
        decode_fields(v).map(RequestEvent::Group)
    })?;
    Ok(())
}
