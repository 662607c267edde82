use serde::Deserialize;

wire_enum! {
    pub enum UserRole {
        Owner = "owner",
        Admin = "admin",
        Member = "member",
    }
}

/// Author of a group message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupSender {
    pub user_id: i64,
    pub nickname: String,
    pub role: UserRole,
    #[serde(default)]
    pub card: Option<String>,
}

impl GroupSender {
    /// Group card when set, nickname otherwise.
    pub fn display_name(&self) -> &str {
        match self.card.as_deref() {
            Some(card) if !card.is_empty() => card,
            _ => &self.nickname,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Owner | UserRole::Admin)
    }
}

/// Author of a private message. `group_id` is set for temporary sessions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FriendSender {
    pub user_id: i64,
    pub nickname: String,
    #[serde(default)]
    pub group_id: Option<i64>,
}

receive_only! {
    GroupSender => "group sender",
    FriendSender => "friend sender",
}
