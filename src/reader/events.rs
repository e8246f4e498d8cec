//! Element Event Types
//!
//! Event types for pull-parser style processing, one level above raw
//! tokens: an open tag and its attribute list arrive as a single event.

use crate::core::attributes::{split_name, Attribute};

/// Element-level parsing event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BxEvent<'a> {
    /// Open tag together with its attributes
    StartElement(StartElement<'a>),
    /// End tag
    EndElement(EndElement<'a>),
    /// Text content
    Text(&'a [u8]),
    /// Comment content
    Comment(&'a [u8]),
}

/// Start element event data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartElement<'a> {
    /// Full element name (may include prefix)
    pub name: &'a [u8],
    /// Element attributes, in document order
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> StartElement<'a> {
    pub fn new(name: &'a [u8], attributes: Vec<Attribute<'a>>) -> Self {
        StartElement { name, attributes }
    }

    /// Get the name as a string
    pub fn name_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.name).ok()
    }

    /// Local name (after colon)
    pub fn local_name(&self) -> &'a [u8] {
        split_name(self.name).1
    }

    /// Namespace prefix (before colon), if any
    pub fn prefix(&self) -> Option<&'a [u8]> {
        split_name(self.name).0
    }

    /// Get the first attribute with the given key
    pub fn get_attribute(&self, key: &[u8]) -> Option<&Attribute<'a>> {
        self.attributes.iter().find(|a| a.key == key)
    }

    /// Get an attribute value by key as string
    pub fn get_attribute_value(&self, key: &str) -> Option<&'a str> {
        self.get_attribute(key.as_bytes()).and_then(|a| a.value_str())
    }
}

/// End element event data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndElement<'a> {
    /// Full element name
    pub name: &'a [u8],
}

impl<'a> EndElement<'a> {
    pub fn new(name: &'a [u8]) -> Self {
        EndElement { name }
    }

    /// Get the name as a string
    pub fn name_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.name).ok()
    }

    /// Local name (after colon)
    pub fn local_name(&self) -> &'a [u8] {
        split_name(self.name).1
    }
}

impl<'a> BxEvent<'a> {
    /// Check if this is a start element event
    pub fn is_start_element(&self) -> bool {
        matches!(self, BxEvent::StartElement(_))
    }

    /// Check if this is an end element event
    pub fn is_end_element(&self) -> bool {
        matches!(self, BxEvent::EndElement(_))
    }

    /// Check if this is a text event
    pub fn is_text(&self) -> bool {
        matches!(self, BxEvent::Text(_))
    }

    /// Get as start element if applicable
    pub fn as_start_element(&self) -> Option<&StartElement<'a>> {
        match self {
            BxEvent::StartElement(e) => Some(e),
            _ => None,
        }
    }

    /// Get as end element if applicable
    pub fn as_end_element(&self) -> Option<&EndElement<'a>> {
        match self {
            BxEvent::EndElement(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if applicable
    pub fn as_text(&self) -> Option<&'a [u8]> {
        match self {
            BxEvent::Text(t) => Some(*t),
            _ => None,
        }
    }
}
