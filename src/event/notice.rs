use serde::Deserialize;
use serde_json::Value;

use super::{BasicEvent, Event};
use crate::{
    error::Result,
    registry::{Context, Discriminator, Registry},
    serializable::{decode_fields, lenient},
};

wire_enum! {
    pub enum NoticeType {
        GroupUpload = "group_upload",
        GroupAdmin = "group_admin",
        GroupDecrease = "group_decrease",
        GroupIncrease = "group_increase",
        GroupBan = "group_ban",
        GroupRecall = "group_recall",
        GroupCard = "group_card",
        GroupMsgEmojiLike = "group_msg_emoji_like",
        FriendAdd = "friend_add",
        FriendRecall = "friend_recall",
        LuckyKing = "lucky_king",
        Essence = "essence",
        Honor = "honor",
        Poke = "poke",
    }
}

wire_enum! {
    pub enum GroupAdminSubType {
        Set = "set",
        Unset = "unset",
    }
}

wire_enum! {
    pub enum GroupDecreaseSubType {
        Leave = "leave",
        Kick = "kick",
        KickMe = "kick_me",
    }
}

wire_enum! {
    pub enum GroupIncreaseSubType {
        Approve = "approve",
        Invite = "invite",
    }
}

wire_enum! {
    pub enum GroupBanSubType {
        Ban = "ban",
        LiftBan = "lift_ban",
    }
}

wire_enum! {
    pub enum EssenceSubType {
        Add = "add",
        Delete = "delete",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedFile {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    pub size: i64,
    pub busid: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupUploadNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub user_id: i64,
    #[serde(rename = "file")]
    pub file_info: UploadedFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupAdminNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub user_id: i64,
    pub sub_type: GroupAdminSubType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupDecreaseNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub operator_id: i64,
    pub user_id: i64,
    pub sub_type: GroupDecreaseSubType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupIncreaseNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub operator_id: i64,
    pub user_id: i64,
    pub sub_type: GroupIncreaseSubType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupBanNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub operator_id: i64,
    pub user_id: i64,
    /// Seconds; zero when lifting.
    pub duration: i64,
    pub sub_type: GroupBanSubType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupRecallNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub user_id: i64,
    pub operator_id: i64,
    pub message_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupCardNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub user_id: i64,
    pub card_new: String,
    pub card_old: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupMsgEmojiLikeNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub message_id: i64,
    pub count: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub operator_id: Option<i64>,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FriendAddNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FriendRecallNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub user_id: i64,
    pub message_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LuckyKingNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    /// Red packet sender.
    pub user_id: i64,
    /// The lucky king.
    pub target_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EssenceNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub message_id: i64,
    pub sender_id: i64,
    pub operator_id: i64,
    pub sub_type: EssenceSubType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HonorNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub group_id: i64,
    pub user_id: i64,
    pub honor_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokeNoticeEvent {
    #[serde(flatten)]
    pub basic: BasicEvent,
    pub user_id: i64,
    pub target_id: i64,
    /// Absent for pokes between friends.
    #[serde(default)]
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeEvent {
    GroupUpload(GroupUploadNoticeEvent),
    GroupAdmin(GroupAdminNoticeEvent),
    GroupDecrease(GroupDecreaseNoticeEvent),
    GroupIncrease(GroupIncreaseNoticeEvent),
    GroupBan(GroupBanNoticeEvent),
    GroupRecall(GroupRecallNoticeEvent),
    GroupCard(GroupCardNoticeEvent),
    GroupMsgEmojiLike(GroupMsgEmojiLikeNoticeEvent),
    FriendAdd(FriendAddNoticeEvent),
    FriendRecall(FriendRecallNoticeEvent),
    LuckyKing(LuckyKingNoticeEvent),
    Essence(EssenceNoticeEvent),
    Honor(HonorNoticeEvent),
    Poke(PokeNoticeEvent),
}

macro_rules! notice_variants {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        impl NoticeEvent {
            pub fn notice_type(&self) -> NoticeType {
                match self {
                    $(Self::$variant(_) => NoticeType::$variant,)+
                }
            }

            pub fn basic(&self) -> &BasicEvent {
                match self {
                    $(Self::$variant(e) => &e.basic,)+
                }
            }
        }

        $(
            impl From<$ty> for NoticeEvent {
                fn from(e: $ty) -> Self {
                    Self::$variant(e)
                }
            }
        )+

        pub(super) fn register_defaults(r: &mut Registry<NoticeType, NoticeEvent>) -> Result<()> {
            $(r.register(NoticeType::$variant, decode::<$ty>)?;)+
            Ok(())
        }
    };
}

notice_variants! {
    GroupUpload(GroupUploadNoticeEvent),
    GroupAdmin(GroupAdminNoticeEvent),
    GroupDecrease(GroupDecreaseNoticeEvent),
    GroupIncrease(GroupIncreaseNoticeEvent),
    GroupBan(GroupBanNoticeEvent),
    GroupRecall(GroupRecallNoticeEvent),
    GroupCard(GroupCardNoticeEvent),
    GroupMsgEmojiLike(GroupMsgEmojiLikeNoticeEvent),
    FriendAdd(FriendAddNoticeEvent),
    FriendRecall(FriendRecallNoticeEvent),
    LuckyKing(LuckyKingNoticeEvent),
    Essence(EssenceNoticeEvent),
    Honor(HonorNoticeEvent),
    Poke(PokeNoticeEvent),
}

impl NoticeEvent {
    /// The group the notice happened in, if any.
    pub fn group_id(&self) -> Option<i64> {
        match self {
            Self::GroupUpload(e) => Some(e.group_id),
            Self::GroupAdmin(e) => Some(e.group_id),
            Self::GroupDecrease(e) => Some(e.group_id),
            Self::GroupIncrease(e) => Some(e.group_id),
            Self::GroupBan(e) => Some(e.group_id),
            Self::GroupRecall(e) => Some(e.group_id),
            Self::GroupCard(e) => Some(e.group_id),
            Self::GroupMsgEmojiLike(e) => Some(e.group_id),
            Self::LuckyKing(e) => Some(e.group_id),
            Self::Essence(e) => Some(e.group_id),
            Self::Honor(e) => Some(e.group_id),
            Self::Poke(e) => e.group_id,
            Self::FriendAdd(_) | Self::FriendRecall(_) => None,
        }
    }
}

receive_only! {
    UploadedFile => "uploaded file",
}

fn decode<T>(value: &Value, _: &Context<'_>) -> Result<NoticeEvent>
where
    T: serde::de::DeserializeOwned + Into<NoticeEvent>,
{
    decode_fields::<T>(value).map(Into::into)
}

pub(super) fn parse_root(value: &Value, cx: &Context<'_>) -> Result<Event> {
    let notice_type = NoticeType::read(value)?;
    cx.registry()
        .notices()
        .dispatch(notice_type, value, cx)
        .map(Event::Notice)
}
