use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{
    error::{ModelError, Result},
    registry::{Context, ModelRegistry, Registry},
    serializable::{decode_fields, lenient, Serializable},
};

wire_enum! {
    pub enum ElementType {
        Text = "text",
        At = "at",
        Reply = "reply",
        /// Built-in QQ face.
        Face = "face",
        /// Marketplace sticker.
        MFace = "mface",
        Dice = "dice",
        Rps = "rps",
        Poke = "poke",
        Image = "image",
        Record = "record",
        Video = "video",
        File = "file",
        Json = "json",
        Music = "music",
        Forward = "forward",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TextData {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AtData {
    /// Target account, or `"all"` for everyone.
    #[serde(rename = "qq")]
    pub target: String,
}

impl AtData {
    pub fn is_all(&self) -> bool {
        self.target == "all"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplyData {
    #[serde(rename = "id")]
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FaceData {
    pub id: String,
    #[serde(default, skip_serializing)]
    pub raw: Option<Value>,
    #[serde(
        rename = "resultId",
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing
    )]
    pub result_id: Option<String>,
    #[serde(rename = "chainCount", default, skip_serializing)]
    pub chain_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MFaceData {
    #[serde(rename(deserialize = "emojiId", serialize = "emoji_id"), alias = "emoji_id")]
    pub emoji_id: String,
    #[serde(
        rename(deserialize = "emojiPackageId", serialize = "emoji_package_id"),
        alias = "emoji_package_id"
    )]
    pub emoji_package_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl MFaceData {
    pub fn new(emoji_id: impl Into<String>, emoji_package_id: impl Into<String>) -> Self {
        Self {
            emoji_id: emoji_id.into(),
            emoji_package_id: emoji_package_id.into(),
            key: None,
            summary: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Dice roll. The result only exists on received elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiceData {
    #[serde(deserialize_with = "lenient::required_string", skip_serializing)]
    pub result: Option<String>,
}

wire_enum! {
    pub enum RpsResult {
        Cloth = "1",
        Shears = "2",
        Stone = "3",
    }
}

impl RpsResult {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cloth => "CLOTH",
            Self::Shears => "SHEARS",
            Self::Stone => "STONE",
        }
    }
}

/// Rock-paper-scissors. The result only exists on received elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RpsData {
    #[serde(deserialize_with = "lenient::required", skip_serializing)]
    pub result: Option<RpsResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PokeData {
    #[serde(rename = "type")]
    pub poke_type: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageData {
    /// Received: file name. Sent: path, URL or `base64://` payload.
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing)]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing)]
    pub key: Option<String>,
    #[serde(default, skip_serializing)]
    pub emoji_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub emoji_package_id: Option<String>,
}

impl ImageData {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            url: None,
            summary: None,
            sub_type: None,
            file_size: None,
            key: None,
            emoji_id: None,
            emoji_package_id: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecordData {
    pub file: String,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing)]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing)]
    pub path: Option<String>,
}

impl RecordData {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            file_size: None,
            path: None,
        }
    }
}

fn is_blank(s: &Option<String>) -> bool {
    s.as_deref().map_or(true, str::is_empty)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoData {
    pub file: String,
    #[serde(default, skip_serializing)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing)]
    pub file_size: Option<u64>,
    #[serde(skip_deserializing, skip_serializing_if = "is_blank")]
    pub thumb: Option<String>,
}

impl VideoData {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            url: None,
            file_size: None,
            thumb: None,
        }
    }

    pub fn with_thumb(mut self, thumb: impl Into<String>) -> Self {
        self.thumb = Some(thumb.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileData {
    pub file: String,
    #[serde(default, skip_serializing)]
    pub file_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64", skip_serializing)]
    pub file_size: Option<u64>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FileData {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            file_id: None,
            file_size: None,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Card message; `data` is the raw JSON document as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JsonData {
    pub data: String,
}

wire_enum! {
    pub enum MusicPlatform {
        Qq = "qq",
        NetEase = "163",
        KuGou = "kugou",
        KuWo = "kuwo",
        MiGu = "migu",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomMusic {
    pub url: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub singer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl CustomMusic {
    pub fn new(url: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            image: image.into(),
            singer: None,
            title: None,
            content: None,
        }
    }

    pub fn with_singer(mut self, singer: impl Into<String>) -> Self {
        self.singer = Some(singer.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Music share. Send-only: the gateway never delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicData {
    Platform { platform: MusicPlatform, id: String },
    Custom(CustomMusic),
}

impl Serialize for MusicData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Platform { platform, id } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", platform)?;
                map.serialize_entry("id", id)?;
                map.end()
            }
            Self::Custom(custom) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "custom")?;
                map.serialize_entry("url", &custom.url)?;
                map.serialize_entry("image", &custom.image)?;
                for (key, value) in [
                    ("singer", &custom.singer),
                    ("title", &custom.title),
                    ("content", &custom.content),
                ] {
                    if let Some(value) = value {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
        }
    }
}

impl Serializable for MusicData {
    fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_json(_: &Value) -> Result<Self> {
        Err(ModelError::SendElementOnly("music element"))
    }
}

/// Merged forward. `content` is only present when the gateway expanded the
/// forwarded messages; outbound forwards carry just the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardData {
    pub id: String,
    #[serde(skip_serializing)]
    pub content: Option<Vec<Element>>,
}

#[derive(Deserialize)]
struct WireForward {
    id: String,
    #[serde(default)]
    content: Option<Vec<Value>>,
}

impl ForwardData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
        }
    }

    /// Forwarded elements in order; empty when not expanded.
    pub fn elements(&self) -> &[Element] {
        self.content.as_deref().unwrap_or_default()
    }

    fn decode(data: &Value, cx: &Context<'_>) -> Result<Self> {
        let wire: WireForward = decode_fields(data)?;
        let content = match wire.content {
            Some(items) => Some(cx.nested()?.parse_elements(&items)?),
            None => None,
        };
        Ok(Self {
            id: wire.id,
            content,
        })
    }
}

impl Serializable for ForwardData {
    fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_json(value: &Value) -> Result<Self> {
        Self::decode(value, &Context::new(ModelRegistry::global()))
    }
}

serde_serializable!(
    TextData, AtData, ReplyData, FaceData, MFaceData, DiceData, RpsData, PokeData, ImageData,
    RecordData, VideoData, FileData, JsonData,
);

/// One segment of a message.
///
/// Serializes to the gateway's `{"type": ..., "data": {...}}` form, keeping
/// only the fields an outbound element may carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Element {
    Text(TextData),
    At(AtData),
    Reply(ReplyData),
    Face(FaceData),
    MFace(MFaceData),
    Dice(DiceData),
    Rps(RpsData),
    Poke(PokeData),
    Image(ImageData),
    Record(RecordData),
    Video(VideoData),
    File(FileData),
    Json(JsonData),
    Music(MusicData),
    Forward(ForwardData),
}

macro_rules! element_from {
    ($($data:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$data> for Element {
                fn from(data: $data) -> Self {
                    Self::$variant(data)
                }
            }
        )+
    };
}

element_from! {
    TextData => Text,
    AtData => At,
    ReplyData => Reply,
    FaceData => Face,
    MFaceData => MFace,
    DiceData => Dice,
    RpsData => Rps,
    PokeData => Poke,
    ImageData => Image,
    RecordData => Record,
    VideoData => Video,
    FileData => File,
    JsonData => Json,
    MusicData => Music,
    ForwardData => Forward,
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text(_) => ElementType::Text,
            Self::At(_) => ElementType::At,
            Self::Reply(_) => ElementType::Reply,
            Self::Face(_) => ElementType::Face,
            Self::MFace(_) => ElementType::MFace,
            Self::Dice(_) => ElementType::Dice,
            Self::Rps(_) => ElementType::Rps,
            Self::Poke(_) => ElementType::Poke,
            Self::Image(_) => ElementType::Image,
            Self::Record(_) => ElementType::Record,
            Self::Video(_) => ElementType::Video,
            Self::File(_) => ElementType::File,
            Self::Json(_) => ElementType::Json,
            Self::Music(_) => ElementType::Music,
            Self::Forward(_) => ElementType::Forward,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextData { text: text.into() })
    }

    pub fn at(target: impl Into<String>) -> Self {
        Self::At(AtData {
            target: target.into(),
        })
    }

    pub fn at_all() -> Self {
        Self::at("all")
    }

    pub fn reply(message_id: impl Into<String>) -> Self {
        Self::Reply(ReplyData {
            message_id: message_id.into(),
        })
    }

    pub fn face(id: impl Into<String>) -> Self {
        Self::Face(FaceData {
            id: id.into(),
            raw: None,
            result_id: None,
            chain_count: None,
        })
    }

    pub fn mface(emoji_id: impl Into<String>, emoji_package_id: impl Into<String>) -> Self {
        Self::MFace(MFaceData::new(emoji_id, emoji_package_id))
    }

    pub fn dice() -> Self {
        Self::Dice(DiceData::default())
    }

    pub fn rps() -> Self {
        Self::Rps(RpsData::default())
    }

    pub fn poke(poke_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Poke(PokeData {
            poke_type: poke_type.into(),
            id: id.into(),
        })
    }

    pub fn image(file: impl Into<String>) -> Self {
        Self::Image(ImageData::new(file))
    }

    pub fn record(file: impl Into<String>) -> Self {
        Self::Record(RecordData::new(file))
    }

    pub fn video(file: impl Into<String>) -> Self {
        Self::Video(VideoData::new(file))
    }

    pub fn file(file: impl Into<String>) -> Self {
        Self::File(FileData::new(file))
    }

    pub fn json(data: impl Into<String>) -> Self {
        Self::Json(JsonData { data: data.into() })
    }

    pub fn music(platform: MusicPlatform, id: impl Into<String>) -> Self {
        Self::Music(MusicData::Platform {
            platform,
            id: id.into(),
        })
    }

    pub fn custom_music(custom: CustomMusic) -> Self {
        Self::Music(MusicData::Custom(custom))
    }

    pub fn forward(id: impl Into<String>) -> Self {
        Self::Forward(ForwardData::new(id))
    }
}

impl Serializable for Element {
    fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_json(value: &Value) -> Result<Self> {
        ModelRegistry::global().parse_element(value)
    }
}

fn decode<T>(data: &Value, _: &Context<'_>) -> Result<Element>
where
    T: serde::de::DeserializeOwned + Into<Element>,
{
    decode_fields::<T>(data).map(Into::into)
}

pub(crate) fn register_defaults(r: &mut Registry<ElementType, Element>) -> Result<()> {
    r.register(ElementType::Text, decode::<TextData>)?;
    r.register(ElementType::At, decode::<AtData>)?;
    r.register(ElementType::Reply, decode::<ReplyData>)?;
    r.register(ElementType::Face, decode::<FaceData>)?;
    r.register(ElementType::MFace, decode::<MFaceData>)?;
    r.register(ElementType::Dice, decode::<DiceData>)?;
    r.register(ElementType::Rps, decode::<RpsData>)?;
    r.register(ElementType::Poke, decode::<PokeData>)?;
    r.register(ElementType::Image, decode::<ImageData>)?;
    r.register(ElementType::Record, decode::<RecordData>)?;
    r.register(ElementType::Video, decode::<VideoData>)?;
    r.register(ElementType::File, decode::<FileData>)?;
    r.register(ElementType::Json, decode::<JsonData>)?;
    r.register(ElementType::Music, |data, _| {
        MusicData::from_json(data).map(Element::Music)
    })?;
    r.register(ElementType::Forward, |data, cx| {
        ForwardData::decode(data, cx).map(Element::Forward)
    })?;
    Ok(())
}
