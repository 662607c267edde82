use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// How many forward elements may be nested inside one another before
    /// decoding is refused.
    pub max_forward_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_forward_depth: 16,
        }
    }
}
