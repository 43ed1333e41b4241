//! Media payload formatting
//!
//! This module provides:
//! - FLV tag model and the enumerations packed into payload flag bytes
//! - AVC/H.264 video packet formatting
//! - AAC audio packet formatting
//!
//! Formatters produce the bytes that go inside an FLV tag; the framing
//! around them lives in [`crate::mux`].

pub mod aac;
pub mod flv;
pub mod h264;

pub use aac::{encode_audio_packet, AacPacketType};
pub use flv::{
    FlvTag, FlvTagType, SoundFormat, SoundRate, SoundSize, SoundType, VideoCodec, VideoFrameType,
};
pub use h264::{encode_video_packet, AvcPacketType};
