//! FLV tag framing
//!
//! Wraps an already-formatted payload into one framed tag:
//!
//! ```text
//! +------+----------+-----------+-------+----------+------+-------------+
//! | Type | DataSize | Timestamp | TSExt | StreamID | Data | PrevTagSize |
//! | 1B   | 3B BE    | 3B BE     | 1B    | 3B (=0)  | N B  | 4B BE       |
//! +------+----------+-----------+-------+----------+------+-------------+
//! ```
//!
//! The timestamp layout is peculiar: the low 24 bits come first, the
//! extension byte carries bits 24-31. The trailing PreviousTagSize names
//! the tag just written (11 + N), which is what a reader finds in front
//! of the next tag.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MuxError, Result};
use crate::media::flv::FlvTag;

/// Fixed tag header size: type + data size + timestamp + stream id
pub const TAG_HEADER_SIZE: usize = 11;

/// Largest payload the 24-bit DataSize field can describe
pub const MAX_TAG_DATA_SIZE: usize = 0xFF_FFFF;

/// Append one framed tag to `buf`
///
/// Returns the tag's own size (header + payload, without the trailing
/// size field) so the caller can track PreviousTagSize chaining. Fails
/// with `PayloadTooLarge` when the payload does not fit the 24-bit
/// DataSize field.
pub fn encode_tag(tag: &FlvTag, buf: &mut BytesMut) -> Result<u32> {
    let data_size = tag.data.len();
    if data_size > MAX_TAG_DATA_SIZE {
        return Err(MuxError::PayloadTooLarge(data_size).into());
    }

    buf.reserve(TAG_HEADER_SIZE + data_size + 4);
    buf.put_u8(tag.tag_type as u8);
    buf.put_uint(data_size as u64, 3);
    // Low 24 bits first, then the extension byte with bits 24-31
    buf.put_uint((tag.timestamp & 0xFF_FFFF) as u64, 3);
    buf.put_u8((tag.timestamp >> 24) as u8);
    // StreamID, always 0
    buf.put_uint(0, 3);
    buf.put_slice(&tag.data);

    let tag_size = (TAG_HEADER_SIZE + data_size) as u32;
    buf.put_u32(tag_size);
    Ok(tag_size)
}

/// Frame one tag into a standalone buffer
pub fn build_tag(tag: &FlvTag) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(TAG_HEADER_SIZE + tag.data.len() + 4);
    encode_tag(tag, &mut buf)?;
    Ok(buf.freeze())
}
