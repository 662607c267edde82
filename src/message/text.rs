use std::borrow::Cow;

use serde_json::Value;

use super::elements::{Element, FaceData};

impl FaceData {
    /// The label the client embeds in `raw.faceText`, when non-empty.
    pub fn label(&self) -> Option<&str> {
        self.raw
            .as_ref()
            .and_then(|raw| raw.get("faceText"))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }
}

impl Element {
    /// Human-readable rendering used for previews and logs.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(data) => Cow::Borrowed(&data.text),
            Self::At(data) => Cow::Owned(format!("@{}", data.target)),
            Self::Reply(data) => Cow::Owned(format!("[回复]({})", data.message_id)),
            Self::Face(data) => match data.label() {
                Some(label) => Cow::Borrowed(label),
                None => Cow::Owned(format!("[表情]({})", data.id)),
            },
            Self::MFace(data) => match &data.summary {
                Some(summary) => Cow::Borrowed(summary),
                None => Cow::Owned(format!("[表情]({})", data.emoji_id)),
            },
            Self::Dice(data) => match &data.result {
                Some(result) => Cow::Owned(format!("[骰子]({result})")),
                None => Cow::Borrowed("[骰子]"),
            },
            Self::Rps(data) => match data.result {
                Some(result) => Cow::Owned(format!("[石头剪刀布]({})", result.name())),
                None => Cow::Borrowed("[石头剪刀布]"),
            },
            Self::Poke(_) => Cow::Borrowed("[戳一戳]"),
            Self::Image(data) => match data.summary.as_deref() {
                Some(summary) if !summary.is_empty() => Cow::Borrowed(summary),
                _ => Cow::Borrowed("[图片]"),
            },
            Self::Record(_) => Cow::Borrowed("[语音]"),
            Self::Video(_) => Cow::Borrowed("[视频]"),
            Self::File(_) => Cow::Borrowed("[文件]"),
            Self::Json(_) => Cow::Borrowed("[JSON]"),
            Self::Music(_) => Cow::Borrowed("音乐分享"),
            Self::Forward(_) => Cow::Borrowed("[合并消息]"),
        }
    }
}

/// Joins the text of each element with a single space, in order.
pub fn join_text(elements: &[Element]) -> String {
    elements
        .iter()
        .map(Element::to_text)
        .collect::<Vec<_>>()
        .join(" ")
}
