use serde::Deserialize;
use serde_json::Value;

use super::{BasicEvent, Event};
use crate::{
    error::Result,
    message::{join_text, Element},
    registry::{Context, Discriminator, Registry},
    sender::{FriendSender, GroupSender},
};

wire_enum! {
    pub enum MessageType {
        Group = "group",
        Private = "private",
    }
}

wire_enum! {
    pub enum GroupMessageSubType {
        Normal = "normal",
        Anonymous = "anonymous",
        Notice = "notice",
    }
}

wire_enum! {
    pub enum FriendMessageSubType {
        Friend = "friend",
        /// Temporary session started from a group.
        Group = "group",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupMessageEvent {
    pub basic: BasicEvent,
    pub message_id: i64,
    pub user_id: i64,
    pub font: i32,
    pub message: Vec<Element>,
    pub raw_message: String,
    pub sub_type: GroupMessageSubType,
    pub group_id: i64,
    pub sender: GroupSender,
}

impl GroupMessageEvent {
    pub fn is_anonymous_message(&self) -> bool {
        self.sub_type == GroupMessageSubType::Anonymous
    }

    pub fn is_notice_message(&self) -> bool {
        self.sub_type == GroupMessageSubType::Notice
    }

    pub fn is_normal_message(&self) -> bool {
        self.sub_type == GroupMessageSubType::Normal
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FriendMessageEvent {
    pub basic: BasicEvent,
    pub message_id: i64,
    pub user_id: i64,
    pub font: i32,
    pub message: Vec<Element>,
    pub raw_message: String,
    pub sub_type: FriendMessageSubType,
    pub sender: FriendSender,
    pub target_id: Option<i64>,
    pub temp_source: Option<i64>,
}

impl FriendMessageEvent {
    pub fn is_friend_message(&self) -> bool {
        self.sub_type == FriendMessageSubType::Friend
    }

    pub fn is_temporary_message(&self) -> bool {
        self.sub_type == FriendMessageSubType::Group
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageEvent {
    Group(GroupMessageEvent),
    Friend(FriendMessageEvent),
}

impl MessageEvent {
    pub fn basic(&self) -> &BasicEvent {
        match self {
            Self::Group(e) => &e.basic,
            Self::Friend(e) => &e.basic,
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Group(_) => MessageType::Group,
            Self::Friend(_) => MessageType::Private,
        }
    }

    pub fn message_id(&self) -> i64 {
        match self {
            Self::Group(e) => e.message_id,
            Self::Friend(e) => e.message_id,
        }
    }

    pub fn user_id(&self) -> i64 {
        match self {
            Self::Group(e) => e.user_id,
            Self::Friend(e) => e.user_id,
        }
    }

    pub fn font(&self) -> i32 {
        match self {
            Self::Group(e) => e.font,
            Self::Friend(e) => e.font,
        }
    }

    pub fn message(&self) -> &[Element] {
        match self {
            Self::Group(e) => &e.message,
            Self::Friend(e) => &e.message,
        }
    }

    pub fn raw_message(&self) -> &str {
        match self {
            Self::Group(e) => &e.raw_message,
            Self::Friend(e) => &e.raw_message,
        }
    }

    /// Element texts joined by a single space.
    pub fn text(&self) -> String {
        join_text(self.message())
    }

    pub fn is_group_message(&self) -> bool {
        self.message_type() == MessageType::Group
    }

    pub fn is_private_message(&self) -> bool {
        self.message_type() == MessageType::Private
    }
}

#[derive(Deserialize)]
struct WireGroupMessage {
    #[serde(flatten)]
    basic: BasicEvent,
    message_id: i64,
    user_id: i64,
    font: i32,
    message: Vec<Value>,
    raw_message: String,
    sub_type: GroupMessageSubType,
    group_id: i64,
    sender: GroupSender,
}

#[derive(Deserialize)]
struct WireFriendMessage {
    #[serde(flatten)]
    basic: BasicEvent,
    message_id: i64,
    user_id: i64,
    font: i32,
    message: Vec<Value>,
    raw_message: String,
    sub_type: FriendMessageSubType,
    sender: FriendSender,
    #[serde(default)]
    target_id: Option<i64>,
    #[serde(default)]
    temp_source: Option<i64>,
}

fn parse_group(value: &Value, cx: &Context<'_>) -> Result<MessageEvent> {
    let wire: WireGroupMessage = WireGroupMessage::deserialize(value)?;
    Ok(MessageEvent::Group(GroupMessageEvent {
        basic: wire.basic,
        message_id: wire.message_id,
        user_id: wire.user_id,
        font: wire.font,
        message: cx.parse_elements(&wire.message)?,
        raw_message: wire.raw_message,
        sub_type: wire.sub_type,
        group_id: wire.group_id,
        sender: wire.sender,
    }))
}

fn parse_friend(value: &Value, cx: &Context<'_>) -> Result<MessageEvent> {
    let wire: WireFriendMessage = WireFriendMessage::deserialize(value)?;
    Ok(MessageEvent::Friend(FriendMessageEvent {
        basic: wire.basic,
        message_id: wire.message_id,
        user_id: wire.user_id,
        font: wire.font,
        message: cx.parse_elements(&wire.message)?,
        raw_message: wire.raw_message,
        sub_type: wire.sub_type,
        sender: wire.sender,
        target_id: wire.target_id,
        temp_source: wire.temp_source,
    }))
}

pub(super) fn parse_root(value: &Value, cx: &Context<'_>) -> Result<Event> {
    let message_type = MessageType::read(value)?;
    cx.registry()
        .messages()
        .dispatch(message_type, value, cx)
        .map(Event::Message)
}

pub(super) fn register_defaults(r: &mut Registry<MessageType, MessageEvent>) -> Result<()> {
    r.register(MessageType::Group, parse_group)?;
    r.register(MessageType::Private, parse_friend)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{FriendMessageSubType, GroupMessageSubType, MessageEvent, MessageType};
    use crate::{
        event::{parse_event, Event, PostType},
        message::Element,
        sender::UserRole,
    };

    fn group_message(message: Value) -> Value {
        json!({
            "self_id": 111, "user_id": 111, "time": 111, "message_id": 111, "message_seq": 111,
            "real_id": 111, "real_seq": "111", "message_type": "group",
            "sender": { "user_id": 111, "nickname": "111", "card": "HAZ0921/5740/1928832/mc就很难", "role": "member" },
            "raw_message": "[CQ:reply,id=576826342]好看", "font": 14, "sub_type": "normal",
            "message": message, "message_format": "array", "post_type": "message", "group_id": 111
        })
    }

    fn friend_message(message: Value) -> Value {
        json!({
            "self_id": 111, "user_id": 111, "time": 111, "message_id": 111, "message_seq": 111,
            "real_id": 111, "real_seq": "23", "message_type": "private",
            "sender": { "user_id": 111, "nickname": "半旧无妨", "card": "" },
            "raw_message": "111", "font": 14, "sub_type": "friend", "message": message,
            "message_format": "array", "post_type": "message", "target_id": 111
        })
    }

    fn message_event(value: &Value) -> MessageEvent {
        match parse_event(value).unwrap() {
            Event::Message(e) => e,
            other => panic!("expected message event, got {other:?}"),
        }
    }

    #[test]
    fn test_group_message() {
        let e = message_event(&group_message(json!([
            { "type": "reply", "data": { "id": "576826342" } },
            { "type": "text", "data": { "text": "好看" } }
        ])));
        assert_eq!(e.text(), "[回复](576826342) 好看");
        assert_eq!(e.message(), [Element::reply("576826342"), Element::text("好看")]);
        assert!(e.is_group_message());
        assert_eq!(e.message_type(), MessageType::Group);
        assert_eq!(e.raw_message(), "[CQ:reply,id=576826342]好看");
        assert_eq!((e.message_id(), e.user_id(), e.font()), (111, 111, 14));

        let MessageEvent::Group(group) = &e else {
            panic!("expected group message");
        };
        assert_eq!(group.group_id, 111);
        assert_eq!(group.sub_type, GroupMessageSubType::Normal);
        assert!(group.is_normal_message());
        assert!(!group.is_anonymous_message());
        assert!(!group.is_notice_message());
        assert_eq!(group.sender.role, UserRole::Member);
        assert_eq!(group.basic.post_type, PostType::Message);

        let e = message_event(&group_message(json!([{ "type": "text", "data": { "text": "6" } }])));
        assert_eq!(e.text(), "6");
    }

    #[test]
    fn test_friend_message() {
        let e = message_event(&friend_message(json!([{
            "type": "image",
            "data": { "summary": "[动画表情]", "file": "123.gif", "sub_type": 2, "url": "111", "file_size": "111" }
        }])));
        assert_eq!(e.text(), "[动画表情]");
        assert!(e.is_private_message());

        let MessageEvent::Friend(friend) = &e else {
            panic!("expected friend message");
        };
        assert_eq!(friend.target_id, Some(111));
        assert_eq!(friend.temp_source, None);
        assert_eq!(friend.sub_type, FriendMessageSubType::Friend);
        assert!(friend.is_friend_message());
        assert!(!friend.is_temporary_message());
        assert_eq!(friend.sender.nickname, "半旧无妨");

        let e = message_event(&friend_message(json!([{
            "type": "face", "data": { "id": "368", "raw": { "faceIndex": 368, "faceText": "/奥特笑哭" } }
        }])));
        assert_eq!(e.text(), "/奥特笑哭");
    }

    #[test]
    fn test_message_sent() {
        let mut value = group_message(json!([]));
        value["post_type"] = json!("message_sent");
        let e = message_event(&value);
        assert_eq!(e.basic().post_type, PostType::MessageSent);
        assert_eq!(e.text(), "");
    }

    #[test]
    fn test_errors() {
        let mut value = group_message(json!([]));
        value.as_object_mut().unwrap().remove("group_id");
        let err = parse_event(&value).unwrap_err();
        assert_eq!(err.variant(), Some("group message event"));
        assert!(err.root_cause().is_parameter());

        let mut value = group_message(json!([]));
        value["sub_type"] = json!("secret");
        let err = parse_event(&value).unwrap_err();
        assert_eq!(err.variant(), Some("group message event"));

        let mut value = group_message(json!([]));
        value["sender"]["role"] = json!("king");
        assert!(parse_event(&value).unwrap_err().is_parse());

        let err = parse_event(&group_message(json!([{ "type": "reply", "data": {} }]))).unwrap_err();
        assert_eq!(err.variant(), Some("reply element"));
        assert!(err.root_cause().is_parameter());

        let err = parse_event(&friend_message(json!([{ "type": "unknown", "data": {} }]))).unwrap_err();
        assert_eq!(err.variant(), Some("private message event"));

        let mut value = friend_message(json!([]));
        value["message_type"] = json!("channel");
        assert!(parse_event(&value).unwrap_err().is_unregistered());
    }
}
