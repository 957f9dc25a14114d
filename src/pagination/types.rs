//! Page and accumulator types

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use std::fmt;

/// Top-level shape of a decoded response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Ordered list of records
    Sequence,
    /// Mapping of field names to sequences or nested objects
    Envelope,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Sequence => f.write_str("list"),
            Shape::Envelope => f.write_str("object"),
        }
    }
}

/// One decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// `[...]` body
    Sequence(Vec<JsonValue>),
    /// `{...}` body
    Envelope(JsonObject),
}

impl Page {
    /// Decode a response body.
    ///
    /// Only JSON arrays and objects are pages; anything else is a decode error.
    pub fn decode(body: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(body)?;
        Self::try_from(value)
    }

    /// Shape of this page
    pub fn shape(&self) -> Shape {
        match self {
            Page::Sequence(_) => Shape::Sequence,
            Page::Envelope(_) => Shape::Envelope,
        }
    }

    /// Convert back into a plain JSON value
    pub fn into_value(self) -> JsonValue {
        match self {
            Page::Sequence(items) => JsonValue::Array(items),
            Page::Envelope(fields) => JsonValue::Object(fields),
        }
    }
}

impl TryFrom<JsonValue> for Page {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Array(items) => Ok(Page::Sequence(items)),
            JsonValue::Object(fields) => Ok(Page::Envelope(fields)),
            other => Err(Error::decode(format!(
                "expected a JSON list or object at the top level, got {}",
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "an object",
    }
}

/// Running merged result of one fetch sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    data: Page,
    pages: usize,
}

impl Accumulator {
    /// Start an accumulator from the first page; this fixes its shape
    pub fn new(first: Page) -> Self {
        Self {
            data: first,
            pages: 1,
        }
    }

    /// Shape fixed by the first page
    pub fn shape(&self) -> Shape {
        self.data.shape()
    }

    /// Number of pages folded in so far, including the first
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Borrow the merged data
    pub fn data(&self) -> &Page {
        &self.data
    }

    /// Records of a list-shaped accumulator
    pub fn as_sequence(&self) -> Option<&[JsonValue]> {
        match &self.data {
            Page::Sequence(items) => Some(items),
            Page::Envelope(_) => None,
        }
    }

    /// Fields of an envelope-shaped accumulator
    pub fn as_envelope(&self) -> Option<&JsonObject> {
        match &self.data {
            Page::Envelope(fields) => Some(fields),
            Page::Sequence(_) => None,
        }
    }

    /// Take the merged data
    pub fn into_page(self) -> Page {
        self.data
    }

    /// Take the merged data as a plain JSON value
    pub fn into_value(self) -> JsonValue {
        self.data.into_value()
    }

    /// Take the records of a list-shaped accumulator
    pub fn into_sequence(self) -> Result<Vec<JsonValue>> {
        match self.data {
            Page::Sequence(items) => Ok(items),
            Page::Envelope(_) => Err(Error::decode("expected a list response, got an object")),
        }
    }

    /// Take the fields of an envelope-shaped accumulator
    pub fn into_envelope(self) -> Result<JsonObject> {
        match self.data {
            Page::Envelope(fields) => Ok(fields),
            Page::Sequence(_) => Err(Error::decode("expected an object response, got a list")),
        }
    }

    pub(super) fn parts_mut(&mut self) -> (&mut Page, &mut usize) {
        (&mut self.data, &mut self.pages)
    }
}
