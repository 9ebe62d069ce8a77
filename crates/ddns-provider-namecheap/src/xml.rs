//! XML response parser
//!
//! Converts an XML document into a [`serde_json::Value`] tree so the update
//! client can classify responses with plain key lookups.
//!
//! ## Mapping
//!
//! - The document becomes `{ "<root>": <root value> }`
//! - An element with no children, attributes or text becomes `null`
//! - An element with only text becomes a string (trimmed, unescaped)
//! - Otherwise an element becomes an object: child elements by name,
//!   attributes as `@name`, remaining text as `#text`
//! - Repeated child names collapse into an array, in document order
//!
//! ```text
//! <interface-response>             {"interface-response": {
//!   <ErrCount>1</ErrCount>            "ErrCount": "1",
//!   <errors>                   →      "errors": {"Err1": "Passwords do not match"},
//!     <Err1>Passwords do not match</Err1>
//!   </errors>                         "Done": "true"
//!   <Done>true</Done>               }}
//! </interface-response>
//! ```

use ddns_core::traits::ResponseParser;
use ddns_core::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

/// Production [`ResponseParser`] built on `quick-xml`
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlResponseParser;

impl XmlResponseParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }
}

impl ResponseParser for XmlResponseParser {
    fn parse(&self, body: &str) -> Result<Value> {
        parse_document(body)
    }
}

/// An element whose end tag has not been read yet
struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = decode_name(start.name().as_ref())?;
        let mut children = Map::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::parse(format!("Invalid attribute in <{}>: {}", name, e)))?;
            let key = decode_name(attr.key.as_ref())?;
            let value = attr
                .unescape_value()
                .map_err(|e| Error::parse(format!("Invalid attribute value in <{}>: {}", name, e)))?;
            children.insert(format!("@{}", key), Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn into_value(self) -> (String, Value) {
        let text = self.text.trim();
        let value = if self.children.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_string())
            }
        } else {
            let mut map = self.children;
            if !text.is_empty() {
                map.insert("#text".to_string(), Value::String(text.to_string()));
            }
            Value::Object(map)
        };
        (self.name, value)
    }
}

/// Parse a complete XML document
pub fn parse_document(body: &str) -> Result<Value> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::parse(format!(
                "Malformed XML at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(start) => {
                ensure_single_root(&stack, &root)?;
                stack.push(Frame::open(&start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&stack, &root)?;
                let (name, value) = Frame::open(&start)?.into_value();
                close_element(&mut stack, &mut root, name, value);
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| Error::parse("Closing tag without an open element"))?;
                let (name, value) = frame.into_value();
                close_element(&mut stack, &mut root, name, value);
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| Error::parse(format!("Invalid text content: {}", e)))?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8(cdata.into_inner().into_owned())
                    .map_err(|e| Error::parse(format!("Invalid CDATA content: {}", e)))?;
                append_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::parse(format!("Unclosed element <{}>", open.name)));
    }

    let (name, value) = root.ok_or_else(|| Error::parse("Document has no root element"))?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

fn ensure_single_root(stack: &[Frame], root: &Option<(String, Value)>) -> Result<()> {
    if stack.is_empty() && root.is_some() {
        return Err(Error::parse("Document has more than one root element"));
    }
    Ok(())
}

fn append_text(stack: &mut [Frame], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(frame) => {
            frame.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::parse("Text outside the root element")),
    }
}

/// Attach a finished element to its parent, or make it the root
fn close_element(
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
    name: String,
    value: Value,
) {
    match stack.last_mut() {
        Some(parent) => insert_child(&mut parent.children, name, value),
        None => *root = Some((name, value)),
    }
}

fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

fn decode_name(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| Error::parse(format!("Element name is not UTF-8: {}", e)))
}
