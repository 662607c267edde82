use thiserror::Error;

pub type Result<T, E = ModelError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum UnregisteredError {
    #[error("no parser registered for event type: {0}")]
    Event(String),
    #[error("no parser registered for element type: {0}")]
    Element(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid parameter: {0}")]
    Parameter(String),
    #[error("failed to parse {variant}")]
    Parse {
        variant: String,
        #[source]
        source: Box<ModelError>,
    },
    #[error(transparent)]
    Unregistered(#[from] UnregisteredError),
    #[error("parser for {0} already registered")]
    ParserRegistered(String),
    #[error("{0} is non-serializable")]
    NonSerializable(&'static str),
    #[error("{0} can only be sent")]
    SendElementOnly(&'static str),
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parameter(e.to_string())
    }
}

impl ModelError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::Parameter(format!("missing required field: {field}"))
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub fn is_unregistered(&self) -> bool {
        matches!(self, Self::Unregistered(_))
    }

    /// The variant name of the outermost [`ModelError::Parse`], if any.
    pub fn variant(&self) -> Option<&str> {
        match self {
            Self::Parse { variant, .. } => Some(variant.as_str()),
            _ => None,
        }
    }

    /// Follows `Parse` wrappers down to the error that caused them.
    pub fn root_cause(&self) -> &ModelError {
        let mut e = self;
        while let Self::Parse { source, .. } = e {
            e = source.as_ref();
        }
        e
    }

    /// Errors that cross a dispatch boundary unchanged.
    pub(crate) fn passes_through(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Unregistered(_) | Self::SendElementOnly(_)
        )
    }
}
