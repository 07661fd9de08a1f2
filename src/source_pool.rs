//! Decoder for the serialized source string pool.
//!
//! Source paths travel beside the resource table as one binary string-pool
//! chunk (the platform's `ResStringPool` layout): a fixed header, a table of
//! relative offsets, then length-prefixed UTF-8 or UTF-16 string data. The
//! pool is decoded eagerly; lookups afterwards are infallible slices.

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use crate::cursor::ByteCursor;
use crate::err::{DecodeError, DecodeResult};

const CHUNK_TYPE_STRING_POOL: u16 = 0x0001;
const MIN_HEADER_SIZE: usize = 28;
const FLAG_UTF8: u32 = 1 << 8;

fn invalid(reason: &'static str) -> DecodeError {
    DecodeError::InvalidSourcePool { reason }
}

/// Decoded source-path pool. Indices come from the wire records; a dangling
/// index is not an error, it just resolves to nothing.
#[derive(Debug, Default)]
pub struct SourcePool {
    strings: Vec<String>,
}

impl SourcePool {
    /// Pool standing in when the table carries no source pool at all.
    pub fn empty() -> SourcePool {
        SourcePool::default()
    }

    pub fn from_bytes(data: &[u8]) -> DecodeResult<SourcePool> {
        let mut cursor = ByteCursor::new(data);
        let header = |_| invalid("truncated header");

        let chunk_type = cursor.u16("chunk type").map_err(header)?;
        if chunk_type != CHUNK_TYPE_STRING_POOL {
            return Err(invalid("not a string pool chunk"));
        }
        let header_size = usize::from(cursor.u16("header size").map_err(header)?);
        let size = cursor.u32("chunk size").map_err(header)? as usize;
        let string_count = cursor.u32("string count").map_err(header)? as usize;
        let style_count = cursor.u32("style count").map_err(header)? as usize;
        let flags = cursor.u32("flags").map_err(header)?;
        let strings_start = cursor.u32("strings start").map_err(header)? as usize;
        let _styles_start = cursor.u32("styles start").map_err(header)?;

        if header_size < MIN_HEADER_SIZE || header_size > size || size > data.len() {
            return Err(invalid("chunk bounds are inconsistent"));
        }

        let offsets_end = string_count
            .checked_add(style_count)
            .and_then(|n| n.checked_mul(4))
            .and_then(|n| n.checked_add(header_size))
            .ok_or_else(|| invalid("offset tables exceed chunk"))?;
        if offsets_end > size {
            return Err(invalid("offset tables exceed chunk"));
        }

        if string_count == 0 {
            return Ok(SourcePool::default());
        }
        if strings_start >= size {
            return Err(invalid("string data starts out of bounds"));
        }

        cursor
            .set_pos(header_size, "string offsets")
            .map_err(|_| invalid("offset tables exceed chunk"))?;
        let mut offsets = Vec::with_capacity(string_count);
        for _ in 0..string_count {
            let offset = cursor
                .u32("string offset")
                .map_err(|_| invalid("offset tables exceed chunk"))?;
            offsets.push(offset as usize);
        }

        // Style data is never referenced by source records; the bounds check
        // above is all the validation it gets.
        let chunk = &data[..size];
        let utf8 = flags & FLAG_UTF8 != 0;
        let mut strings = Vec::with_capacity(string_count);
        for &relative in &offsets {
            let at = strings_start
                .checked_add(relative)
                .ok_or_else(|| invalid("string offset out of bounds"))?;
            let mut entry = ByteCursor::new(chunk);
            entry
                .set_pos(at, "string entry")
                .map_err(|_| invalid("string offset out of bounds"))?;
            let string = if utf8 {
                decode_utf8_entry(&mut entry)?
            } else {
                decode_utf16_entry(&mut entry)?
            };
            strings.push(string);
        }

        trace!(
            "decoded source pool: {} strings ({})",
            strings.len(),
            if utf8 { "utf-8" } else { "utf-16" }
        );
        Ok(SourcePool { strings })
    }

    /// Returns the string at `index`, or `None` when the index is dangling.
    pub fn get(&self, index: u32) -> Option<&str> {
        self.strings.get(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// One-or-two-byte length prefix used by UTF-8 pools.
fn decode_length8(cursor: &mut ByteCursor<'_>) -> DecodeResult<usize> {
    let oob = |_| invalid("string data out of bounds");
    let first = cursor.u8("string length").map_err(oob)?;
    if first & 0x80 == 0 {
        return Ok(usize::from(first));
    }
    let second = cursor.u8("string length").map_err(oob)?;
    Ok((usize::from(first & 0x7f) << 8) | usize::from(second))
}

/// One-or-two-unit length prefix used by UTF-16 pools.
fn decode_length16(cursor: &mut ByteCursor<'_>) -> DecodeResult<usize> {
    let oob = |_| invalid("string data out of bounds");
    let first = cursor.u16("string length").map_err(oob)?;
    if first & 0x8000 == 0 {
        return Ok(usize::from(first));
    }
    let second = cursor.u16("string length").map_err(oob)?;
    Ok((usize::from(first & 0x7fff) << 16) | usize::from(second))
}

fn decode_utf8_entry(cursor: &mut ByteCursor<'_>) -> DecodeResult<String> {
    let oob = |_| invalid("string data out of bounds");
    // The first length is the decoded character count; only the byte length
    // that follows it matters here.
    let _char_count = decode_length8(cursor)?;
    let byte_len = decode_length8(cursor)?;
    let bytes = cursor.take_bytes(byte_len, "string data").map_err(oob)?;
    if cursor.u8("string terminator").map_err(oob)? != 0 {
        return Err(invalid("string is not null terminated"));
    }
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| invalid("string is not valid utf-8"))
}

fn decode_utf16_entry(cursor: &mut ByteCursor<'_>) -> DecodeResult<String> {
    let oob = |_| invalid("string data out of bounds");
    let char_count = decode_length16(cursor)?;
    let byte_len = char_count
        .checked_mul(2)
        .ok_or_else(|| invalid("string data out of bounds"))?;
    let bytes = cursor.take_bytes(byte_len, "string data").map_err(oob)?;
    if cursor.u16("string terminator").map_err(oob)? != 0 {
        return Err(invalid("string is not null terminated"));
    }
    let units: Vec<u16> = bytes.chunks_exact(2).map(LittleEndian::read_u16).collect();
    String::from_utf16(&units).map_err(|_| invalid("string is not valid utf-16"))
}
