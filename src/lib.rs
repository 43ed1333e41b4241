//! flv-mux: FLV container muxer with AMF0 metadata encoding
//!
//! This library assembles FLV byte streams out of discrete audio, video,
//! and metadata events:
//! - AMF0 value model, encoder, and a strict decoder for verification
//! - AAC and AVC/H.264 tag payload formatters
//! - Tag framing and an incremental stream builder
//!
//! Everything is pure in-memory computation: the library never touches
//! files or sockets, callers persist or transmit the returned bytes.
//!
//! # Example: metadata plus one video frame
//!
//! ```
//! use flv_mux::{AmfValue, FlvStreamBuilder};
//! use flv_mux::media::{AvcPacketType, VideoCodec, VideoFrameType};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let metadata = AmfValue::ecma_array()
//!         .with_property("duration", 0.0)
//!         .with_property("videocodecid", VideoCodec::Avc as u32);
//!
//!     let mut builder = FlvStreamBuilder::new(false, true);
//!     builder.open()?;
//!     builder.append_meta_tag(0, &metadata)?;
//!     builder.append_video_tag(
//!         0,
//!         VideoFrameType::Keyframe,
//!         VideoCodec::Avc,
//!         AvcPacketType::SequenceHeader,
//!         0,
//!         &[0x01, 0x64, 0x00, 0x1F, 0xFF],
//!     )?;
//!
//!     let stream = builder.finalize();
//!     assert_eq!(&stream[0..3], b"FLV");
//!     Ok(())
//! }
//! ```

pub mod amf;
pub mod error;
pub mod media;
pub mod mux;

// Re-export main types for convenience
pub use amf::{Amf0Decoder, Amf0Encoder, AmfValue};
pub use error::{Error, Result};
pub use media::{FlvTag, FlvTagType};
pub use mux::FlvStreamBuilder;
