use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
    hash::Hash,
    str::FromStr,
    sync::OnceLock,
};

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::{
    config::DecodeConfig,
    error::{ModelError, Result, UnregisteredError},
    event::{self, Event, MessageEvent, MessageType, MetaEvent, MetaType, NoticeEvent, NoticeType,
        PostType, RequestEvent, RequestType},
    message::{self, Element, ElementType},
    serializable::str_field,
    NAPCAT,
};

pub type DecodeFn<T> = fn(&Value, &Context<'_>) -> Result<T>;

/// A wire field whose value selects a decoder.
pub trait Discriminator:
    Copy + Eq + Hash + fmt::Display + FromStr<Err = ModelError> + 'static
{
    /// Name of the wire field carrying the discriminator.
    const FIELD: &'static str;

    fn unregistered(self) -> UnregisteredError;

    /// Error for a wire value outside the enum.
    fn unknown(raw: &str) -> ModelError;

    fn read(value: &Value) -> Result<Self> {
        let raw = str_field(value, Self::FIELD)?;
        raw.parse().map_err(|_| Self::unknown(raw))
    }
}

macro_rules! event_discriminator {
    ($($ty:ty => $field:literal),+ $(,)?) => {
        $(
            impl Discriminator for $ty {
                const FIELD: &'static str = $field;

                fn unregistered(self) -> UnregisteredError {
                    UnregisteredError::Event(self.to_string())
                }

                fn unknown(raw: &str) -> ModelError {
                    UnregisteredError::Event(raw.to_string()).into()
                }
            }
        )+
    };
}

event_discriminator! {
    PostType => "post_type",
    MessageType => "message_type",
    NoticeType => "notice_type",
    RequestType => "request_type",
    MetaType => "meta_event_type",
}

impl Discriminator for ElementType {
    const FIELD: &'static str = "type";

    fn unregistered(self) -> UnregisteredError {
        UnregisteredError::Element(self.to_string())
    }

    fn unknown(raw: &str) -> ModelError {
        ModelError::Parameter(format!("unknown element type: {raw}"))
    }
}

/// Maps each value of one discriminator to its decoder.
pub struct Registry<K, T> {
    name: &'static str,
    table: HashMap<K, DecodeFn<T>>,
}

impl<K: Discriminator, T> Registry<K, T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            table: HashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn register(&mut self, key: K, decoder: DecodeFn<T>) -> Result<()> {
        match self.table.entry(key) {
            Entry::Occupied(_) => Err(ModelError::ParserRegistered(format!(
                "{key} {}",
                self.name
            ))),
            Entry::Vacant(slot) => {
                debug!(target: NAPCAT, %key, registry = self.name, "register parser");
                slot.insert(decoder);
                Ok(())
            }
        }
    }

    pub fn resolve(&self, key: &K) -> Option<DecodeFn<T>> {
        self.table.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.table.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Runs the decoder registered for `key`.
    ///
    /// Decoder failures are wrapped once as [`ModelError::Parse`] naming the
    /// variant. Errors that already crossed a boundary, unregistered
    /// discriminators and send-only violations pass through unchanged.
    pub fn dispatch(&self, key: K, value: &Value, cx: &Context<'_>) -> Result<T> {
        let Some(decoder) = self.resolve(&key) else {
            warn!(target: NAPCAT, %key, registry = self.name, "no parser registered");
            return Err(key.unregistered().into());
        };
        trace!(target: NAPCAT, %key, registry = self.name, depth = cx.depth, "dispatch");
        decoder(value, cx).map_err(|e| {
            if e.passes_through() {
                e
            } else {
                ModelError::Parse {
                    variant: format!("{key} {}", self.name),
                    source: Box::new(e),
                }
            }
        })
    }
}

impl<K, T> fmt::Debug for Registry<K, T>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("keys", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// State threaded through one decode call.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    registry: &'a ModelRegistry,
    depth: usize,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry, depth: 0 }
    }

    pub fn registry(&self) -> &'a ModelRegistry {
        self.registry
    }

    pub fn config(&self) -> &'a DecodeConfig {
        &self.registry.config
    }

    /// Forward nesting level of the element being decoded.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for the content of a forward element one level deeper.
    pub fn nested(&self) -> Result<Self> {
        let depth = self.depth + 1;
        if depth > self.config().max_forward_depth {
            return Err(ModelError::Parameter(format!(
                "forward content nested deeper than {} levels",
                self.config().max_forward_depth
            )));
        }
        Ok(Self { depth, ..*self })
    }

    pub fn parse_element(&self, value: &Value) -> Result<Element> {
        message::parse_element_in(value, self)
    }

    pub fn parse_elements(&self, values: &[Value]) -> Result<Vec<Element>> {
        values.iter().map(|v| self.parse_element(v)).collect()
    }
}

/// Every decoder table, one per discriminator.
#[derive(Debug)]
pub struct ModelRegistry {
    config: DecodeConfig,
    events: Registry<PostType, Event>,
    messages: Registry<MessageType, MessageEvent>,
    notices: Registry<NoticeType, NoticeEvent>,
    requests: Registry<RequestType, RequestEvent>,
    metas: Registry<MetaType, MetaEvent>,
    elements: Registry<ElementType, Element>,
}

static GLOBAL_REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();

impl ModelRegistry {
    /// Tables with no decoders at all.
    pub fn empty() -> Self {
        Self {
            config: DecodeConfig::default(),
            events: Registry::new("event"),
            messages: Registry::new("message event"),
            notices: Registry::new("notice event"),
            requests: Registry::new("request event"),
            metas: Registry::new("meta event"),
            elements: Registry::new("element"),
        }
    }

    /// Tables holding every built-in decoder.
    pub fn build() -> Result<Self> {
        let mut registry = Self::empty();
        event::register_defaults(&mut registry)?;
        message::register_defaults(&mut registry.elements)?;
        debug!(
            target: NAPCAT,
            events = registry.events.len(),
            elements = registry.elements.len(),
            "registry built"
        );
        Ok(registry)
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY
            .get_or_init(|| Self::build().expect("built-in parsers never collide"))
    }

    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    pub fn events(&self) -> &Registry<PostType, Event> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut Registry<PostType, Event> {
        &mut self.events
    }

    pub fn messages(&self) -> &Registry<MessageType, MessageEvent> {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut Registry<MessageType, MessageEvent> {
        &mut self.messages
    }

    pub fn notices(&self) -> &Registry<NoticeType, NoticeEvent> {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Registry<NoticeType, NoticeEvent> {
        &mut self.notices
    }

    pub fn requests(&self) -> &Registry<RequestType, RequestEvent> {
        &self.requests
    }

    pub fn requests_mut(&mut self) -> &mut Registry<RequestType, RequestEvent> {
        &mut self.requests
    }

    pub fn metas(&self) -> &Registry<MetaType, MetaEvent> {
        &self.metas
    }

    pub fn metas_mut(&mut self) -> &mut Registry<MetaType, MetaEvent> {
        &mut self.metas
    }

    pub fn elements(&self) -> &Registry<ElementType, Element> {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Registry<ElementType, Element> {
        &mut self.elements
    }

    pub fn parse_event(&self, value: &Value) -> Result<Event> {
        event::parse_event_in(value, &Context::new(self))
    }

    pub fn parse_element(&self, value: &Value) -> Result<Element> {
        Context::new(self).parse_element(value)
    }

    pub fn parse_elements(&self, values: &[Value]) -> Result<Vec<Element>> {
        Context::new(self).parse_elements(values)
    }
}
