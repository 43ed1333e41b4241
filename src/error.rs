//! Unified error types for flv-mux

use std::fmt;

/// Result type alias using the library's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all muxing operations
#[derive(Debug)]
pub enum Error {
    /// AMF encoding/decoding error
    Amf(AmfError),
    /// Codec payload formatting error
    Media(MediaError),
    /// Container framing or stream-state error
    Mux(MuxError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Amf(e) => write!(f, "AMF error: {}", e),
            Error::Media(e) => write!(f, "Media error: {}", e),
            Error::Mux(e) => write!(f, "Mux error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Amf(e) => Some(e),
            Error::Media(e) => Some(e),
            Error::Mux(e) => Some(e),
        }
    }
}

impl From<AmfError> for Error {
    fn from(err: AmfError) -> Self {
        Error::Amf(err)
    }
}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<MuxError> for Error {
    fn from(err: MuxError) -> Self {
        Error::Mux(err)
    }
}

/// AMF encoding/decoding errors
#[derive(Debug)]
pub enum AmfError {
    /// Encode requested for a reserved marker (MovieClip)
    UnsupportedType(u8),
    /// String value or object key exceeds the 16-bit length field
    StringTooLong(usize),
    UnknownMarker(u8),
    UnexpectedEof,
    InvalidUtf8,
    NestingTooDeep,
    InvalidObjectEnd,
}

impl fmt::Display for AmfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmfError::UnsupportedType(m) => write!(f, "Unsupported AMF type marker: 0x{:02x}", m),
            AmfError::StringTooLong(len) => {
                write!(f, "AMF string too long: {} bytes (max 65535)", len)
            }
            AmfError::UnknownMarker(m) => write!(f, "Unknown AMF marker: 0x{:02x}", m),
            AmfError::UnexpectedEof => write!(f, "Unexpected end of AMF data"),
            AmfError::InvalidUtf8 => write!(f, "Invalid UTF-8 in AMF string"),
            AmfError::NestingTooDeep => write!(f, "AMF nesting too deep"),
            AmfError::InvalidObjectEnd => write!(f, "Invalid object end marker"),
        }
    }
}

impl std::error::Error for AmfError {}

/// Codec payload formatting errors
#[derive(Debug)]
pub enum MediaError {
    /// Frame-type value outside the FLV table (1..=5)
    InvalidFrameType(u8),
    /// Packet-type value outside the AAC/AVC table
    InvalidPacketType(u8),
    /// Codec ID outside the FLV table, or not the codec this path encodes
    InvalidCodecId(u8),
    /// Composition time does not fit the signed 24-bit field
    CompositionTimeOutOfRange(i32),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::InvalidFrameType(v) => write!(f, "Invalid frame type: {}", v),
            MediaError::InvalidPacketType(v) => write!(f, "Invalid packet type: {}", v),
            MediaError::InvalidCodecId(v) => write!(f, "Invalid codec ID: {}", v),
            MediaError::CompositionTimeOutOfRange(ct) => {
                write!(f, "Composition time out of range: {} ms", ct)
            }
        }
    }
}

impl std::error::Error for MediaError {}

/// Container framing and stream-state errors
#[derive(Debug)]
pub enum MuxError {
    /// Tag payload exceeds the 24-bit DataSize field
    PayloadTooLarge(usize),
    /// Append called before the stream header was written
    StreamNotOpen,
    /// open() called on an already-open stream
    StreamAlreadyOpen,
}

impl fmt::Display for MuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MuxError::PayloadTooLarge(len) => {
                write!(f, "Tag payload too large: {} bytes (max 16777215)", len)
            }
            MuxError::StreamNotOpen => write!(f, "Stream not open"),
            MuxError::StreamAlreadyOpen => write!(f, "Stream already open"),
        }
    }
}

impl std::error::Error for MuxError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_error_display() {
        // Test Error::Amf display
        let err = Error::Amf(AmfError::UnsupportedType(0x04));
        assert!(err.to_string().contains("AMF error"));
        assert!(err.to_string().contains("0x04"));

        // Test Error::Media display
        let err = Error::Media(MediaError::InvalidCodecId(9));
        assert!(err.to_string().contains("Media error"));
        assert!(err.to_string().contains("9"));

        // Test Error::Mux display
        let err = Error::Mux(MuxError::StreamNotOpen);
        assert!(err.to_string().contains("Mux error"));
        assert!(err.to_string().contains("not open"));
    }

    #[test]
    fn test_error_source() {
        let err = Error::Amf(AmfError::UnexpectedEof);
        assert!(StdError::source(&err).is_some());

        let err = Error::Media(MediaError::InvalidFrameType(0));
        assert!(StdError::source(&err).is_some());

        let err = Error::Mux(MuxError::StreamAlreadyOpen);
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn test_from_conversions() {
        // Test From<AmfError>
        let amf_err = AmfError::StringTooLong(70000);
        let err: Error = amf_err.into();
        assert!(matches!(err, Error::Amf(_)));

        // Test From<MediaError>
        let media_err = MediaError::CompositionTimeOutOfRange(1 << 23);
        let err: Error = media_err.into();
        assert!(matches!(err, Error::Media(_)));

        // Test From<MuxError>
        let mux_err = MuxError::PayloadTooLarge(1 << 24);
        let err: Error = mux_err.into();
        assert!(matches!(err, Error::Mux(_)));
    }

    #[test]
    fn test_amf_error_display() {
        assert!(AmfError::UnsupportedType(0x04)
            .to_string()
            .contains("0x04"));

        assert!(AmfError::StringTooLong(65536).to_string().contains("65536"));

        assert!(AmfError::UnknownMarker(0xAB).to_string().contains("0xab"));

        assert!(AmfError::UnexpectedEof.to_string().contains("end of AMF"));

        assert!(AmfError::InvalidUtf8.to_string().contains("UTF-8"));

        assert!(AmfError::NestingTooDeep.to_string().contains("deep"));

        assert!(AmfError::InvalidObjectEnd.to_string().contains("end"));
    }

    #[test]
    fn test_media_error_display() {
        assert!(MediaError::InvalidFrameType(7).to_string().contains("7"));
        assert!(MediaError::InvalidPacketType(3).to_string().contains("3"));
        assert!(MediaError::InvalidCodecId(15).to_string().contains("15"));
        assert!(MediaError::CompositionTimeOutOfRange(-8388609)
            .to_string()
            .contains("-8388609"));
    }

    #[test]
    fn test_mux_error_display() {
        assert!(MuxError::PayloadTooLarge(16777216)
            .to_string()
            .contains("16777216"));
        assert!(MuxError::StreamNotOpen.to_string().contains("not open"));
        assert!(MuxError::StreamAlreadyOpen
            .to_string()
            .contains("already open"));
    }
}
