//! FLV container assembly
//!
//! This module provides:
//! - Tag framing (11-byte header, payload, trailing PreviousTagSize)
//! - The stream builder that owns the output buffer and running state
//!
//! Payload bytes come from [`crate::media`] formatters or the
//! [`crate::amf`] encoder; nothing here inspects them.

pub mod stream;
pub mod tag;

pub use stream::{FlvStreamBuilder, ON_META_DATA};
pub use tag::{build_tag, encode_tag, MAX_TAG_DATA_SIZE, TAG_HEADER_SIZE};
