//! Attribute records
//!
//! An attribute is a key/value pair of string views into the document
//! buffer. It is a plain value: copying it never copies the bytes.

use memchr::memchr;

/// A decoded attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute key (may include namespace prefix)
    pub key: &'a [u8],
    /// Attribute value
    pub value: &'a [u8],
}

impl<'a> Attribute<'a> {
    /// Create a new attribute
    pub fn new(key: &'a [u8], value: &'a [u8]) -> Self {
        Attribute { key, value }
    }

    /// Get the key as a string
    pub fn key_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.key).ok()
    }

    /// Get the value as a string
    pub fn value_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.value).ok()
    }

    /// Local part of the key (after the first colon)
    pub fn local_key(&self) -> &'a [u8] {
        split_name(self.key).1
    }

    /// Namespace prefix of the key (before the first colon), if any
    pub fn prefix(&self) -> Option<&'a [u8]> {
        split_name(self.key).0
    }

    /// Copy the key and value out of the buffer
    pub fn to_owned_pair(&self) -> (Vec<u8>, Vec<u8>) {
        (self.key.to_vec(), self.value.to_vec())
    }
}

/// Split a name into prefix and local name at the colon
pub(crate) fn split_name(name: &[u8]) -> (Option<&[u8]>, &[u8]) {
    if let Some(colon_pos) = memchr(b':', name) {
        (Some(&name[..colon_pos]), &name[colon_pos + 1..])
    } else {
        (None, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_attribute() {
        let attr = Attribute::new(b"id", b"main");
        assert_eq!(attr.key_str(), Some("id"));
        assert_eq!(attr.value_str(), Some("main"));
        assert_eq!(attr.prefix(), None);
        assert_eq!(attr.local_key(), b"id");
    }

    #[test]
    fn test_prefixed_attribute() {
        let attr = Attribute::new(b"xlink:href", b"#a");
        assert_eq!(attr.prefix(), Some(b"xlink" as &[u8]));
        assert_eq!(attr.local_key(), b"href");
    }

    #[test]
    fn test_non_utf8_value() {
        let attr = Attribute::new(b"k", b"\xff\xfe");
        assert_eq!(attr.value_str(), None);
        assert_eq!(attr.to_owned_pair(), (b"k".to_vec(), vec![0xff, 0xfe]));
    }
}
