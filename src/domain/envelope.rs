//! JSON envelope exchanged between the config server and its clients.
//!
//! Every response body is `{"message": string, "data": object}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const MESSAGE_OK: &str = "ok";
pub const MESSAGE_NO_SUCH_SECTION: &str = "no such section";
pub const MESSAGE_NO_SUCH_OPTION: &str = "no such option";
pub const MESSAGE_NOT_FOUND: &str = "not found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            message: MESSAGE_OK.to_string(),
            data,
        }
    }
}

/// Payload of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootData {
    pub default_section: String,
    pub sections: Vec<String>,
}

/// Payload of `GET /section/{section}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionData {
    pub section: String,
    pub options: Vec<String>,
}

/// Payload of `GET /section/{section}/option/{option}`. `option` carries the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionData {
    pub section: String,
    pub option: String,
}

/// Empty `data` object sent alongside error messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Empty {}

/// Options of the default section, in declaration order.
pub type Defaults = IndexMap<String, String>;
