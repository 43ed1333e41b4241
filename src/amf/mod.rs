//! AMF (Action Message Format) implementation
//!
//! AMF is Adobe's binary serialization format; FLV script tags carry
//! their metadata as AMF0 values. This module implements the AMF0
//! subset those tags use: a value model, an encoder, and a strict
//! decoder for verifying encoded output.

pub mod amf0;
pub mod value;

pub use amf0::{Amf0Decoder, Amf0Encoder};
pub use value::AmfValue;
