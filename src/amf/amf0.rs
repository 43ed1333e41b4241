//! AMF0 encoder and decoder
//!
//! AMF0 is the original Action Message Format used in Flash/FLV.
//! Reference: AMF0 File Format Specification (amf0-file-format-specification.pdf)
//!
//! Type Markers:
//! ```text
//! 0x00 - Number (IEEE 754 double)
//! 0x01 - Boolean
//! 0x02 - String (UTF-8, 16-bit length prefix)
//! 0x03 - Object (key-value pairs until 0x000009)
//! 0x04 - MovieClip (reserved, rejected at encode)
//! 0x05 - Null
//! 0x06 - Undefined
//! 0x07 - Reference (16-bit index)
//! 0x08 - ECMA Array (associative array)
//! 0x09 - Object End (0x000009 sequence)
//! 0x0A - Strict Array (dense array)
//! 0x0B - Date (double + timezone)
//! 0x0C - Long String (UTF-8, 32-bit length prefix)
//! ```
//!
//! The encoder never rewrites the caller's tree: a `String` longer than
//! 65535 bytes is an error rather than a silent promotion to the long
//! form, and the ECMA-array count field is emitted exactly as stored.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::AmfError;
use super::value::AmfValue;

// AMF0 type markers
const MARKER_NUMBER: u8 = 0x00;
const MARKER_BOOLEAN: u8 = 0x01;
const MARKER_STRING: u8 = 0x02;
const MARKER_OBJECT: u8 = 0x03;
const MARKER_MOVIECLIP: u8 = 0x04;
const MARKER_NULL: u8 = 0x05;
const MARKER_UNDEFINED: u8 = 0x06;
const MARKER_REFERENCE: u8 = 0x07;
const MARKER_ECMA_ARRAY: u8 = 0x08;
const MARKER_OBJECT_END: u8 = 0x09;
const MARKER_STRICT_ARRAY: u8 = 0x0A;
const MARKER_DATE: u8 = 0x0B;
const MARKER_LONG_STRING: u8 = 0x0C;

/// Longest string the 16-bit length prefix can carry
const MAX_SHORT_STRING: usize = 0xFFFF;

/// Maximum nesting depth for objects/arrays (prevent stack overflow)
const MAX_NESTING_DEPTH: usize = 64;

/// AMF0 encoder
pub struct Amf0Encoder {
    buf: BytesMut,
}

impl Amf0Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(256),
        }
    }

    /// Create encoder with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Get the encoded bytes and reset encoder
    pub fn finish(&mut self) -> Bytes {
        self.buf.split().freeze()
    }

    /// Get current encoded length
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if encoder is empty
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Encode a single AMF0 value
    ///
    /// On error the buffer may hold a partially written value; callers
    /// that need all-or-nothing output should encode into a fresh
    /// encoder and only splice the result on success.
    pub fn encode(&mut self, value: &AmfValue) -> Result<(), AmfError> {
        match value {
            AmfValue::Number(n) => {
                self.buf.put_u8(MARKER_NUMBER);
                self.buf.put_f64(*n);
            }
            AmfValue::Boolean(b) => {
                self.buf.put_u8(MARKER_BOOLEAN);
                self.buf.put_u8(if *b { 1 } else { 0 });
            }
            AmfValue::String(s) => {
                if s.len() > MAX_SHORT_STRING {
                    return Err(AmfError::StringTooLong(s.len()));
                }
                self.buf.put_u8(MARKER_STRING);
                self.buf.put_u16(s.len() as u16);
                self.buf.put_slice(s.as_bytes());
            }
            AmfValue::LongString(s) => {
                let len = u32::try_from(s.len()).map_err(|_| AmfError::StringTooLong(s.len()))?;
                self.buf.put_u8(MARKER_LONG_STRING);
                self.buf.put_u32(len);
                self.buf.put_slice(s.as_bytes());
            }
            AmfValue::Object(props) => {
                self.buf.put_u8(MARKER_OBJECT);
                for (key, val) in props {
                    self.write_utf8(key)?;
                    self.encode(val)?;
                }
                // Object end marker: empty key + 0x09
                self.buf.put_u16(0);
                self.buf.put_u8(MARKER_OBJECT_END);
            }
            AmfValue::EcmaArray { count, properties } => {
                self.buf.put_u8(MARKER_ECMA_ARRAY);
                self.buf.put_u32(*count);
                for (key, val) in properties {
                    self.write_utf8(key)?;
                    self.encode(val)?;
                }
                self.buf.put_u16(0);
                self.buf.put_u8(MARKER_OBJECT_END);
            }
            AmfValue::StrictArray(elements) => {
                self.buf.put_u8(MARKER_STRICT_ARRAY);
                self.buf.put_u32(elements.len() as u32);
                for elem in elements {
                    self.encode(elem)?;
                }
            }
            AmfValue::Null => {
                self.buf.put_u8(MARKER_NULL);
            }
            AmfValue::Undefined => {
                self.buf.put_u8(MARKER_UNDEFINED);
            }
            AmfValue::Reference(index) => {
                // Index is opaque to the encoder, no bounds check
                self.buf.put_u8(MARKER_REFERENCE);
                self.buf.put_u16(*index);
            }
            AmfValue::Date { unix_ms, timezone } => {
                self.buf.put_u8(MARKER_DATE);
                self.buf.put_f64(*unix_ms);
                self.buf.put_i16(*timezone);
            }
            AmfValue::MovieClip => {
                return Err(AmfError::UnsupportedType(MARKER_MOVIECLIP));
            }
        }
        Ok(())
    }

    /// Encode multiple values back-to-back
    pub fn encode_all(&mut self, values: &[AmfValue]) -> Result<(), AmfError> {
        for value in values {
            self.encode(value)?;
        }
        Ok(())
    }

    /// Write UTF-8 string with 16-bit length prefix (no type marker)
    fn write_utf8(&mut self, s: &str) -> Result<(), AmfError> {
        if s.len() > MAX_SHORT_STRING {
            // Keys have no long form in AMF0
            return Err(AmfError::StringTooLong(s.len()));
        }
        self.buf.put_u16(s.len() as u16);
        self.buf.put_slice(s.as_bytes());
        Ok(())
    }
}

impl Default for Amf0Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// AMF0 decoder
///
/// Strict counterpart of [`Amf0Encoder`] for round-trip verification:
/// unknown markers, truncated input, and missing object terminators are
/// hard errors. References are returned verbatim as
/// [`AmfValue::Reference`] without table lookup.
pub struct Amf0Decoder {
    /// Current nesting depth
    depth: usize,
}

impl Amf0Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self { depth: 0 }
    }

    /// Reset decoder state (call after a failed decode before reuse)
    pub fn reset(&mut self) {
        self.depth = 0;
    }

    /// Decode a single AMF0 value from the buffer
    pub fn decode(&mut self, buf: &mut Bytes) -> Result<AmfValue, AmfError> {
        if buf.is_empty() {
            return Err(AmfError::UnexpectedEof);
        }

        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(AmfError::NestingTooDeep);
        }

        let marker = buf.get_u8();
        let result = self.decode_value(marker, buf);
        self.depth -= 1;
        result
    }

    /// Decode all values from buffer until exhausted
    pub fn decode_all(&mut self, buf: &mut Bytes) -> Result<Vec<AmfValue>, AmfError> {
        let mut values = Vec::new();
        while buf.has_remaining() {
            values.push(self.decode(buf)?);
        }
        Ok(values)
    }

    fn decode_value(&mut self, marker: u8, buf: &mut Bytes) -> Result<AmfValue, AmfError> {
        match marker {
            MARKER_NUMBER => self.decode_number(buf),
            MARKER_BOOLEAN => self.decode_boolean(buf),
            MARKER_STRING => {
                let s = self.read_utf8(buf)?;
                Ok(AmfValue::String(s))
            }
            MARKER_OBJECT => self.decode_object(buf),
            MARKER_MOVIECLIP => Err(AmfError::UnsupportedType(MARKER_MOVIECLIP)),
            MARKER_NULL => Ok(AmfValue::Null),
            MARKER_UNDEFINED => Ok(AmfValue::Undefined),
            MARKER_REFERENCE => self.decode_reference(buf),
            MARKER_ECMA_ARRAY => self.decode_ecma_array(buf),
            MARKER_OBJECT_END => Err(AmfError::InvalidObjectEnd),
            MARKER_STRICT_ARRAY => self.decode_strict_array(buf),
            MARKER_DATE => self.decode_date(buf),
            MARKER_LONG_STRING => {
                let s = self.read_utf8_long(buf)?;
                Ok(AmfValue::LongString(s))
            }
            _ => Err(AmfError::UnknownMarker(marker)),
        }
    }

    fn decode_number(&mut self, buf: &mut Bytes) -> Result<AmfValue, AmfError> {
        if buf.remaining() < 8 {
            return Err(AmfError::UnexpectedEof);
        }
        Ok(AmfValue::Number(buf.get_f64()))
    }

    fn decode_boolean(&mut self, buf: &mut Bytes) -> Result<AmfValue, AmfError> {
        if buf.is_empty() {
            return Err(AmfError::UnexpectedEof);
        }
        Ok(AmfValue::Boolean(buf.get_u8() != 0))
    }

    fn decode_object(&mut self, buf: &mut Bytes) -> Result<AmfValue, AmfError> {
        let properties = self.decode_pairs(buf)?;
        Ok(AmfValue::Object(properties))
    }

    fn decode_ecma_array(&mut self, buf: &mut Bytes) -> Result<AmfValue, AmfError> {
        if buf.remaining() < 4 {
            return Err(AmfError::UnexpectedEof);
        }

        // Count is informational, kept verbatim rather than recomputed
        let count = buf.get_u32();
        let properties = self.decode_pairs(buf)?;
        Ok(AmfValue::EcmaArray { count, properties })
    }

    /// Read key/value pairs up to the empty-key + 0x09 terminator
    fn decode_pairs(&mut self, buf: &mut Bytes) -> Result<Vec<(String, AmfValue)>, AmfError> {
        let mut properties = Vec::new();

        loop {
            let key = self.read_utf8(buf)?;

            if key.is_empty() {
                if buf.is_empty() {
                    return Err(AmfError::UnexpectedEof);
                }
                if buf.get_u8() == MARKER_OBJECT_END {
                    break;
                }
                return Err(AmfError::InvalidObjectEnd);
            }

            let value = self.decode(buf)?;
            properties.push((key, value));
        }

        Ok(properties)
    }

    fn decode_strict_array(&mut self, buf: &mut Bytes) -> Result<AmfValue, AmfError> {
        if buf.remaining() < 4 {
            return Err(AmfError::UnexpectedEof);
        }

        let count = buf.get_u32() as usize;

        let mut elements = Vec::with_capacity(count.min(1024)); // Cap initial allocation
        for _ in 0..count {
            elements.push(self.decode(buf)?);
        }

        Ok(AmfValue::StrictArray(elements))
    }

    fn decode_date(&mut self, buf: &mut Bytes) -> Result<AmfValue, AmfError> {
        if buf.remaining() < 10 {
            return Err(AmfError::UnexpectedEof);
        }

        let unix_ms = buf.get_f64();
        let timezone = buf.get_i16();

        Ok(AmfValue::Date { unix_ms, timezone })
    }

    fn decode_reference(&mut self, buf: &mut Bytes) -> Result<AmfValue, AmfError> {
        if buf.remaining() < 2 {
            return Err(AmfError::UnexpectedEof);
        }

        // No reference table is kept, the index stays opaque
        Ok(AmfValue::Reference(buf.get_u16()))
    }

    /// Read UTF-8 string with 16-bit length prefix
    fn read_utf8(&mut self, buf: &mut Bytes) -> Result<String, AmfError> {
        if buf.remaining() < 2 {
            return Err(AmfError::UnexpectedEof);
        }

        let len = buf.get_u16() as usize;
        if buf.remaining() < len {
            return Err(AmfError::UnexpectedEof);
        }

        let bytes = buf.copy_to_bytes(len);
        String::from_utf8(bytes.to_vec()).map_err(|_| AmfError::InvalidUtf8)
    }

    /// Read UTF-8 string with 32-bit length prefix
    fn read_utf8_long(&mut self, buf: &mut Bytes) -> Result<String, AmfError> {
        if buf.remaining() < 4 {
            return Err(AmfError::UnexpectedEof);
        }

        let len = buf.get_u32() as usize;
        if buf.remaining() < len {
            return Err(AmfError::UnexpectedEof);
        }

        let bytes = buf.copy_to_bytes(len);
        String::from_utf8(bytes.to_vec()).map_err(|_| AmfError::InvalidUtf8)
    }
}

impl Default for Amf0Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to encode a single value
pub fn encode(value: &AmfValue) -> Result<Bytes, AmfError> {
    let mut encoder = Amf0Encoder::new();
    encoder.encode(value)?;
    Ok(encoder.finish())
}

/// Convenience function to encode multiple values back-to-back
pub fn encode_all(values: &[AmfValue]) -> Result<Bytes, AmfError> {
    let mut encoder = Amf0Encoder::new();
    encoder.encode_all(values)?;
    Ok(encoder.finish())
}

/// Convenience function to decode a single value
pub fn decode(data: &[u8]) -> Result<AmfValue, AmfError> {
    let mut decoder = Amf0Decoder::new();
    let mut buf = Bytes::copy_from_slice(data);
    decoder.decode(&mut buf)
}

/// Convenience function to decode all values
pub fn decode_all(data: &[u8]) -> Result<Vec<AmfValue>, AmfError> {
    let mut decoder = Amf0Decoder::new();
    let mut buf = Bytes::copy_from_slice(data);
    decoder.decode_all(&mut buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_encoding() {
        let encoded = encode(&AmfValue::Number(1.0)).unwrap();
        assert_eq!(
            encoded.as_ref(),
            &[0x00, 0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_empty_string_encoding() {
        let encoded = encode(&AmfValue::String(String::new())).unwrap();
        assert_eq!(encoded.as_ref(), &[0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_empty_object_encoding() {
        let encoded = encode(&AmfValue::object()).unwrap();
        assert_eq!(encoded.as_ref(), &[0x03, 0x00, 0x00, 0x09]);
    }

    #[test]
    fn test_boolean_encoding() {
        assert_eq!(encode(&AmfValue::Boolean(true)).unwrap().as_ref(), &[0x01, 0x01]);
        assert_eq!(encode(&AmfValue::Boolean(false)).unwrap().as_ref(), &[0x01, 0x00]);
    }

    #[test]
    fn test_null_undefined_encoding() {
        assert_eq!(encode(&AmfValue::Null).unwrap().as_ref(), &[0x05]);
        assert_eq!(encode(&AmfValue::Undefined).unwrap().as_ref(), &[0x06]);
    }

    #[test]
    fn test_number_roundtrip() {
        let value = AmfValue::Number(42.5);
        let encoded = encode(&value).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_string_roundtrip() {
        let value = AmfValue::String("hello world".into());
        let encoded = encode(&value).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_object_roundtrip_preserves_order() {
        let value = AmfValue::object()
            .with_property("zebra", 1.0)
            .with_property("apple", "two")
            .with_property("nested", AmfValue::object().with_property("inner", true));

        let encoded = encode(&value).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_object_duplicate_keys_roundtrip() {
        let value = AmfValue::Object(vec![
            ("k".into(), AmfValue::Number(1.0)),
            ("k".into(), AmfValue::Number(2.0)),
        ]);
        let encoded = encode(&value).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_ecma_array_roundtrip() {
        let value = AmfValue::ecma_array()
            .with_property("duration", 5.0)
            .with_property("stereo", true);
        let encoded = encode(&value).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_ecma_array_count_kept_verbatim() {
        // Count disagreeing with the pair count still round-trips
        let value = AmfValue::EcmaArray {
            count: 7,
            properties: vec![("only".into(), AmfValue::Number(1.0))],
        };
        let encoded = encode(&value).unwrap();
        assert_eq!(&encoded[1..5], &[0x00, 0x00, 0x00, 0x07]);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_strict_array_roundtrip() {
        let value = AmfValue::StrictArray(vec![
            AmfValue::Number(1.0),
            AmfValue::String("two".into()),
            AmfValue::Boolean(true),
        ]);
        let encoded = encode(&value).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_date_roundtrip() {
        let value = AmfValue::Date {
            unix_ms: 1_234_567_890_000.0,
            timezone: -300,
        };
        let encoded = encode(&value).unwrap();
        assert_eq!(encoded.len(), 11);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_reference_roundtrip() {
        let value = AmfValue::Reference(513);
        let encoded = encode(&value).unwrap();
        assert_eq!(encoded.as_ref(), &[0x07, 0x02, 0x01]);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_long_string_stays_long() {
        let value = AmfValue::LongString("short but explicit".into());
        let encoded = encode(&value).unwrap();
        assert_eq!(encoded[0], 0x0C);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_multiple_values() {
        let values = vec![
            AmfValue::String("onMetaData".into()),
            AmfValue::ecma_array().with_property("duration", 0.0),
        ];

        let encoded = encode_all(&values).unwrap();
        let decoded = decode_all(&encoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_string_too_long() {
        let value = AmfValue::String("x".repeat(65536));
        match encode(&value) {
            Err(AmfError::StringTooLong(len)) => assert_eq!(len, 65536),
            other => panic!("Expected StringTooLong, got {:?}", other),
        }

        // The boundary length still fits the 16-bit prefix
        let value = AmfValue::String("x".repeat(65535));
        let encoded = encode(&value).unwrap();
        assert_eq!(encoded.len(), 1 + 2 + 65535);

        // The long form takes over past the boundary
        let value = AmfValue::LongString("x".repeat(65536));
        let encoded = encode(&value).unwrap();
        assert_eq!(encoded.len(), 1 + 4 + 65536);
        assert_eq!(decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_long_key_rejected() {
        let value = AmfValue::object().with_property("k".repeat(65536), 1.0);
        assert!(matches!(
            encode(&value),
            Err(AmfError::StringTooLong(65536))
        ));
    }

    #[test]
    fn test_movieclip_rejected() {
        match encode(&AmfValue::MovieClip) {
            Err(AmfError::UnsupportedType(marker)) => assert_eq!(marker, 0x04),
            other => panic!("Expected UnsupportedType, got {:?}", other),
        }

        // Also rejected nested inside a container
        let value = AmfValue::object().with_property("clip", AmfValue::MovieClip);
        assert!(matches!(encode(&value), Err(AmfError::UnsupportedType(_))));
    }

    #[test]
    fn test_decode_unknown_marker() {
        assert!(matches!(decode(&[0xFF]), Err(AmfError::UnknownMarker(0xFF))));
        // Typed Object (0x10) is outside the supported table
        assert!(matches!(decode(&[0x10]), Err(AmfError::UnknownMarker(0x10))));
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(decode(&[]), Err(AmfError::UnexpectedEof)));
        assert!(matches!(decode(&[0x00, 0x3F]), Err(AmfError::UnexpectedEof)));
        assert!(matches!(decode(&[0x02, 0x00, 0x05, b'a']), Err(AmfError::UnexpectedEof)));
    }

    #[test]
    fn test_decode_missing_object_end() {
        // Object with one pair and no terminator
        let mut bytes = vec![0x03];
        bytes.extend_from_slice(&[0x00, 0x01, b'k']);
        bytes.extend_from_slice(&[0x05]); // null value
        assert!(matches!(decode(&bytes), Err(AmfError::UnexpectedEof)));

        // Empty key followed by something other than 0x09
        let bytes = [0x03, 0x00, 0x00, 0x05];
        assert!(matches!(decode(&bytes), Err(AmfError::InvalidObjectEnd)));
    }

    #[test]
    fn test_decode_stray_object_end() {
        assert!(matches!(decode(&[0x09]), Err(AmfError::InvalidObjectEnd)));
    }

    #[test]
    fn test_nesting_depth_limit() {
        // 64 nested values decode, 65 do not
        let mut value = AmfValue::Number(1.0);
        for _ in 0..63 {
            value = AmfValue::object().with_property("a", value);
        }
        let encoded = encode(&value).unwrap();
        assert!(decode(&encoded).is_ok());

        let deeper = AmfValue::object().with_property("a", value);
        let encoded = encode(&deeper).unwrap();
        assert!(matches!(decode(&encoded), Err(AmfError::NestingTooDeep)));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let bytes = [0x02, 0x00, 0x02, 0xC0, 0x00];
        assert!(matches!(decode(&bytes), Err(AmfError::InvalidUtf8)));
    }

    #[test]
    fn test_decoder_reset_after_error() {
        let mut decoder = Amf0Decoder::new();

        let mut nested = AmfValue::Number(1.0);
        for _ in 0..64 {
            nested = AmfValue::object().with_property("a", nested);
        }
        let mut buf = encode(&nested).unwrap();
        assert!(decoder.decode(&mut buf).is_err());

        decoder.reset();
        let mut buf = Bytes::from_static(&[0x05]);
        assert_eq!(decoder.decode(&mut buf).unwrap(), AmfValue::Null);
    }
}
