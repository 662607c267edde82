use serde::Deserialize;
use serde_json::Value;

use super::{BasicEvent, Event};
use crate::{
    error::Result,
    registry::{Context, Discriminator, Registry},
    serializable::decode_fields,
};

wire_enum! {
    pub enum MetaType {
        Heartbeat = "heartbeat",
        Lifecycle = "lifecycle",
    }
}

wire_enum! {
    pub enum LifecycleSubType {
        Enable = "enable",
        Disable = "disable",
        Connect = "connect",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HeartbeatStatus {
    pub online: bool,
    pub good: bool,
}

receive_only! {
    HeartbeatStatus => "heartbeat status",
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeartbeatEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub status: HeartbeatStatus,
    /// Milliseconds until the next heartbeat.
    pub interval: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LifecycleEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub sub_type: LifecycleSubType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaEvent {
    Heartbeat(HeartbeatEvent),
    Lifecycle(LifecycleEvent),
}

impl MetaEvent {
    pub fn basic(&self) -> &BasicEvent {
        match self {
            Self::Heartbeat(e) => &e.basic,
            Self::Lifecycle(e) => &e.basic,
        }
    }

    pub fn meta_type(&self) -> MetaType {
        match self {
            Self::Heartbeat(_) => MetaType::Heartbeat,
            Self::Lifecycle(_) => MetaType::Lifecycle,
        }
    }
}

pub(super) fn parse_root(value: &Value, cx: &Context<'_>) -> Result<Event> {
    let meta_type = MetaType::read(value)?;
    cx.registry()
        .metas()
        .dispatch(meta_type, value, cx)
        .map(Event::Meta)
}

pub(super) fn register_defaults(r: &mut Registry<MetaType, MetaEvent>) -> Result<()> {
    r.register(MetaType::Heartbeat, |v, _| {
        decode_fields(v).map(MetaEvent::Heartbeat)
    })?;
    r.register(MetaType::Lifecycle, |v, _| {
        decode_fields(v).map(MetaEvent::Lifecycle)
    })?;
    Ok(())
}
