mod elements;
pub use elements::*;

mod text;
pub use text::join_text;

use serde_json::Value;

use crate::{
    error::{ModelError, Result},
    registry::{Context, Discriminator, ModelRegistry},
};

pub(crate) use elements::register_defaults;

/// Decodes one `{"type": ..., "data": {...}}` element with the global
/// registry.
pub fn parse_element(value: &Value) -> Result<Element> {
    ModelRegistry::global().parse_element(value)
}

/// Decodes an ordered element array with the global registry.
pub fn parse_elements(values: &[Value]) -> Result<Vec<Element>> {
    ModelRegistry::global().parse_elements(values)
}

/// Encodes elements into the array an outbound message carries.
pub fn to_json(elements: &[Element]) -> Result<Value> {
    Ok(serde_json::to_value(elements)?)
}

pub(crate) fn parse_element_in(value: &Value, cx: &Context<'_>) -> Result<Element> {
    let element_type = ElementType::read(value)?;
    let data = value.get("data").ok_or_else(|| ModelError::missing("data"))?;
    cx.registry().elements().dispatch(element_type, data, cx)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{parse_element, parse_elements, to_json, Element, ElementType, RpsResult};
    use crate::{
        config::DecodeConfig,
        error::ModelError,
        message::{CustomMusic, FileData, ImageData, MusicPlatform, VideoData},
        registry::ModelRegistry,
        serializable::Serializable,
    };

    #[test]
    fn test_parse_simple() {
        let e = parse_element(&json!({ "type": "text", "data": { "text": "好看" } })).unwrap();
        assert_eq!(e, Element::text("好看"));
        assert_eq!(e.element_type(), ElementType::Text);

        let e = parse_element(&json!({ "type": "reply", "data": { "id": "576826342" } })).unwrap();
        assert!(matches!(&e, Element::Reply(data) if data.message_id == "576826342"));

        let e = parse_element(&json!({ "type": "rps", "data": { "result": "1" } })).unwrap();
        assert!(matches!(&e, Element::Rps(data) if data.result == Some(RpsResult::Cloth)));

        let e = parse_element(&json!({ "type": "poke", "data": { "type": "1", "id": "1" } })).unwrap();
        assert_eq!(e, Element::poke("1", "1"));
    }

    #[test]
    fn test_parse_receive_only_fields() {
        let e = parse_element(&json!({
            "type": "image",
            "data": {
                "summary": "[动画表情]", "file": "123.gif", "sub_type": 1, "url": "123",
                "file_size": "76620", "key": "k", "emoji_id": "e", "emoji_package_id": "p"
            }
        }))
        .unwrap();
        let Element::Image(data) = &e else {
            panic!("expected image, got {e:?}");
        };
        assert_eq!(data.sub_type.as_deref(), Some("1"));
        assert_eq!(data.file_size, Some(76620));
        assert_eq!(data.key.as_deref(), Some("k"));

        let e = parse_element(&json!({
            "type": "face",
            "data": { "id": "368", "raw": { "faceText": "/奥特笑哭" }, "resultId": "2", "chainCount": 0 }
        }))
        .unwrap();
        let Element::Face(data) = &e else {
            panic!("expected face, got {e:?}");
        };
        assert_eq!(data.result_id.as_deref(), Some("2"));
        assert_eq!(data.chain_count, Some(0));

        let e = parse_element(&json!({
            "type": "mface",
            "data": { "emojiId": "a", "emojiPackageId": "b", "key": "c", "summary": "[开心]" }
        }))
        .unwrap();
        let Element::MFace(data) = &e else {
            panic!("expected mface, got {e:?}");
        };
        assert_eq!(data.key.as_deref(), Some("c"));
        assert_eq!(data.summary, None);
    }

    #[test]
    fn test_encode() {
        let image = Element::from(
            ImageData::new("https://example.com/a.png")
                .with_summary("猫")
                .with_sub_type("0"),
        );
        assert_eq!(
            image.to_json().unwrap(),
            json!({ "type": "image", "data": { "file": "https://example.com/a.png", "summary": "猫", "sub_type": "0" } })
        );
        assert_eq!(
            Element::from(VideoData::new("a.mp4").with_thumb("a.jpg")).to_json().unwrap(),
            json!({ "type": "video", "data": { "file": "a.mp4", "thumb": "a.jpg" } })
        );
        assert_eq!(
            Element::from(VideoData::new("a.mp4").with_thumb("")).to_json().unwrap(),
            json!({ "type": "video", "data": { "file": "a.mp4" } })
        );
        assert_eq!(
            Element::from(FileData::new("/tmp/a.zip").with_name("a.zip")).to_json().unwrap(),
            json!({ "type": "file", "data": { "file": "/tmp/a.zip", "name": "a.zip" } })
        );
        assert_eq!(
            Element::dice().to_json().unwrap(),
            json!({ "type": "dice", "data": {} })
        );
        assert_eq!(
            Element::mface("a", "b").to_json().unwrap(),
            json!({ "type": "mface", "data": { "emoji_id": "a", "emoji_package_id": "b" } })
        );
        assert_eq!(
            Element::at_all().to_json().unwrap(),
            json!({ "type": "at", "data": { "qq": "all" } })
        );
    }

    #[test]
    fn test_encode_drops_received_fields() {
        let e = parse_element(&json!({
            "type": "image",
            "data": { "file": "123.jpg", "url": "u", "file_size": 10, "key": "k" }
        }))
        .unwrap();
        assert_eq!(
            e.to_json().unwrap(),
            json!({ "type": "image", "data": { "file": "123.jpg", "url": "u" } })
        );

        let e = parse_element(&json!({ "type": "dice", "data": { "result": 4 } })).unwrap();
        assert_eq!(e.to_json().unwrap(), json!({ "type": "dice", "data": {} }));

        let e = parse_element(&json!({
            "type": "forward",
            "data": { "id": "99", "content": [{ "type": "text", "data": { "text": "a" } }] }
        }))
        .unwrap();
        assert_eq!(e.to_json().unwrap(), json!({ "type": "forward", "data": { "id": "99" } }));
    }

    #[test]
    fn test_round_trip_required_fields() {
        let cases = [
            json!({ "type": "text", "data": { "text": "hi" } }),
            json!({ "type": "at", "data": { "qq": "10001" } }),
            json!({ "type": "reply", "data": { "id": "1" } }),
            json!({ "type": "face", "data": { "id": "14" } }),
            json!({ "type": "poke", "data": { "type": "1", "id": "2" } }),
            json!({ "type": "image", "data": { "file": "a.jpg" } }),
            json!({ "type": "record", "data": { "file": "a.amr" } }),
            json!({ "type": "video", "data": { "file": "a.mp4" } }),
            json!({ "type": "file", "data": { "file": "a.zip" } }),
            json!({ "type": "json", "data": { "data": "{\"app\":1}" } }),
            json!({ "type": "forward", "data": { "id": "7" } }),
        ];
        for case in cases {
            let e = parse_element(&case).unwrap();
            assert_eq!(e.to_json().unwrap(), case);
            assert_eq!(parse_element(&e.to_json().unwrap()).unwrap(), e);
        }
    }

    #[test]
    fn test_music() {
        assert_eq!(
            Element::music(MusicPlatform::NetEase, "28949129").to_json().unwrap(),
            json!({ "type": "music", "data": { "type": "163", "id": "28949129" } })
        );
        let custom = CustomMusic::new("https://a", "https://b.png").with_title("t");
        assert_eq!(
            Element::custom_music(custom).to_json().unwrap(),
            json!({
                "type": "music",
                "data": { "type": "custom", "url": "https://a", "image": "https://b.png", "title": "t" }
            })
        );

        let err = parse_element(&json!({ "type": "music", "data": { "type": "qq", "id": "1" } }))
            .unwrap_err();
        assert!(matches!(err, ModelError::SendElementOnly(_)));
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_element(&json!({ "data": { "text": "x" } })).unwrap_err();
        assert!(err.is_parameter());

        let err = parse_element(&json!({ "type": "marquee", "data": {} })).unwrap_err();
        assert!(err.is_parameter());

        let err = parse_element(&json!({ "type": "text" })).unwrap_err();
        assert!(err.is_parameter());

        let err = parse_element(&json!({ "type": "text", "data": {} })).unwrap_err();
        assert_eq!(err.variant(), Some("text element"));
        assert!(err.root_cause().is_parameter());

        let err = parse_element(&json!({ "type": "rps", "data": { "result": "4" } })).unwrap_err();
        assert_eq!(err.variant(), Some("rps element"));

        let err = parse_element(&json!({ "type": "dice", "data": {} })).unwrap_err();
        assert_eq!(err.variant(), Some("dice element"));

        let err = parse_element(&json!({ "type": "at", "data": { "qq": 10001 } })).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_forward() {
        let e = parse_element(&json!({
            "type": "forward",
            "data": {
                "id": "1",
                "content": [
                    { "type": "reply", "data": { "id": "576826342" } },
                    { "type": "text", "data": { "text": "好看" } },
                    { "type": "forward", "data": { "id": "2", "content": [
                        { "type": "face", "data": { "id": "14" } }
                    ] } }
                ]
            }
        }))
        .unwrap();
        let Element::Forward(data) = &e else {
            panic!("expected forward, got {e:?}");
        };
        assert_eq!(
            data.elements()[..2],
            [Element::reply("576826342"), Element::text("好看")]
        );
        let Element::Forward(inner) = &data.elements()[2] else {
            panic!("expected nested forward");
        };
        assert_eq!(inner.elements(), [Element::face("14")]);

        let e = parse_element(&json!({ "type": "forward", "data": { "id": "1" } })).unwrap();
        let Element::Forward(data) = &e else {
            panic!("expected forward, got {e:?}");
        };
        assert!(data.content.is_none());
        assert!(data.elements().is_empty());
    }

    #[test]
    fn test_forward_child_error_wrapped_once() {
        let err = parse_element(&json!({
            "type": "forward",
            "data": { "id": "1", "content": [{ "type": "text", "data": {} }] }
        }))
        .unwrap_err();
        assert_eq!(err.variant(), Some("text element"));

        let err = parse_element(&json!({
            "type": "forward",
            "data": { "id": "1", "content": [{ "type": "music", "data": {} }] }
        }))
        .unwrap_err();
        assert!(matches!(err, ModelError::SendElementOnly(_)));
    }

    #[test]
    fn test_forward_depth_limit() {
        let registry = ModelRegistry::build()
            .unwrap()
            .with_config(DecodeConfig {
                max_forward_depth: 2,
            });
        let mut value = json!({ "type": "text", "data": { "text": "leaf" } });
        for i in 0..3 {
            value = json!({ "type": "forward", "data": { "id": i.to_string(), "content": [value] } });
        }
        let err = registry.parse_element(&value).unwrap_err();
        assert_eq!(err.variant(), Some("forward element"));
        assert!(err.root_cause().is_parameter());

        let Element::Forward(data) = parse_element(&value).unwrap() else {
            panic!("expected forward");
        };
        assert_eq!(data.id, "2");
    }

    #[test]
    fn test_parse_elements_and_to_json() {
        let values = vec![
            json!({ "type": "at", "data": { "qq": "1" } }),
            json!({ "type": "text", "data": { "text": " hello" } }),
        ];
        let elements = parse_elements(&values).unwrap();
        assert_eq!(elements, [Element::at("1"), Element::text(" hello")]);
        assert_eq!(to_json(&elements).unwrap(), json!(values));
    }
}
