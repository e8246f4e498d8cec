//! Zero-Copy Slice Reader
//!
//! Reads element events from a byte slice with zero-copy semantics.
//! Input references are maintained directly in the output.

use super::events::{BxEvent, EndElement, StartElement};
use crate::core::attributes::Attribute;
use crate::core::error::DecodeError;
use crate::core::tokenizer::{Options, Status, Token, Tokenizer};

/// Zero-copy element reader from a byte slice
pub struct SliceReader<'a> {
    tokenizer: Tokenizer<'a>,
}

impl<'a> SliceReader<'a> {
    /// Create a new slice reader
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, Options::default())
    }

    pub fn with_options(input: &'a [u8], options: Options) -> Self {
        SliceReader {
            tokenizer: Tokenizer::with_options(input, options),
        }
    }

    /// Current read offset
    pub fn cursor(&self) -> usize {
        self.tokenizer.cursor()
    }

    /// Get the next event, or `None` at the end of the document
    pub fn next_event(&mut self) -> Result<Option<BxEvent<'a>>, DecodeError> {
        let event = match self.tokenizer.next_token()? {
            Token::Eof => return Ok(None),
            Token::OpenTag(name) => {
                let attributes = self.read_attributes()?;
                BxEvent::StartElement(StartElement::new(name, attributes))
            }
            Token::EndTag(name) => BxEvent::EndElement(EndElement::new(name)),
            Token::Text(text) => BxEvent::Text(text),
            Token::Comment(text) => BxEvent::Comment(text),
            Token::Attribute(_) | Token::AttributeEnd => {
                return Err(DecodeError::Misuse {
                    position: self.cursor(),
                    reason: "attribute token outside an open tag",
                })
            }
        };
        Ok(Some(event))
    }

    /// Consume an attribute list up to and including its terminator
    fn read_attributes(&mut self) -> Result<Vec<Attribute<'a>>, DecodeError> {
        let mut attributes = Vec::new();
        loop {
            match self.tokenizer.next_token()? {
                Token::Attribute(attr) => attributes.push(attr),
                Token::AttributeEnd => return Ok(attributes),
                _ => unreachable!("attribute mode only yields attribute tokens"),
            }
        }
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = Result<BxEvent<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        // Finished or failed sessions, however they got there, end iteration
        if self.tokenizer.status() != Status::Open {
            return None;
        }
        self.next_event().transpose()
    }
}

impl std::iter::FusedIterator for SliceReader<'_> {}

/// Read every event from a byte slice
pub fn parse_events(input: &[u8]) -> Result<Vec<BxEvent<'_>>, DecodeError> {
    SliceReader::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_element() {
        let events = parse_events(b"\x01root\0\x00\x03hello\0\x02root\0\xff").unwrap();
        assert_eq!(events.len(), 3);

        assert!(matches!(&events[0], BxEvent::StartElement(e) if e.name_str() == Some("root")));
        assert!(matches!(&events[1], BxEvent::Text(t) if *t == b"hello"));
        assert!(matches!(&events[2], BxEvent::EndElement(e) if e.name_str() == Some("root")));
    }

    #[test]
    fn test_attributes_fold_into_start_element() {
        let input = b"\x01div\0\x01id\0main\0\x01class\0container\0\x00\xff";
        let events = parse_events(input).unwrap();
        assert_eq!(events.len(), 1);

        if let BxEvent::StartElement(e) = &events[0] {
            assert_eq!(e.get_attribute_value("id"), Some("main"));
            assert_eq!(e.get_attribute_value("class"), Some("container"));
            assert_eq!(e.attributes.len(), 2);
        } else {
            panic!("Expected StartElement");
        }
    }

    #[test]
    fn test_comment() {
        let events = parse_events(b"\x01root\0\x00\x00 comment \0\x02root\0\xff").unwrap();
        assert!(events.iter().any(|e| matches!(e, BxEvent::Comment(c) if *c == b" comment ")));
    }

    #[test]
    fn test_nested() {
        let input = b"\x01a\0\x00\x01b\0\x00\x03text\0\x02b\0\x02a\0\xff";
        assert_eq!(parse_events(input).unwrap().len(), 5);
    }

    #[test]
    fn test_error_inside_attribute_list() {
        let mut reader = SliceReader::new(b"\x01a\0\x01k\0v\0\x05\xff");
        assert!(matches!(
            reader.next(),
            Some(Err(DecodeError::Malformed { byte: 0x05, position: 8, .. }))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_unbalanced_tags_are_not_validated() {
        let events = parse_events(b"\x02never_opened\0\xff").unwrap();
        assert!(events[0].is_end_element());
    }

    #[test]
    fn test_empty_document() {
        let mut reader = SliceReader::new(b"\xff");
        assert_eq!(reader.next_event(), Ok(None));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_iterator_stays_done_after_direct_error() {
        let mut reader = SliceReader::new(b"\x03a\0\x7f");
        assert_eq!(reader.next_event(), Ok(Some(BxEvent::Text(b"a"))));
        assert!(matches!(reader.next_event(), Err(DecodeError::Malformed { byte: 0x7f, .. })));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_iterator_after_partial_direct_reads() {
        let mut reader = SliceReader::new(b"\x03a\0\x03b\0\xff");
        assert_eq!(reader.next_event(), Ok(Some(BxEvent::Text(b"a"))));
        let rest: Vec<_> = reader.by_ref().collect::<Result<_, _>>().unwrap();
        assert_eq!(rest, vec![BxEvent::Text(b"b")]);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_cursor_through_mutable_reference() {
        let mut reader = SliceReader::new(b"\x01p\0\x01k\0v\0\x00\xff");
        let by_ref: &mut SliceReader<'_> = &mut reader;
        let event = by_ref.next_event().unwrap().unwrap();
        assert!(event.as_start_element().is_some());
        assert_eq!(by_ref.cursor(), 9);
    }
}
