//! Slice/offset cursor for bounds-oriented parsing.
//!
//! The data is already in memory, so reads are explicit bounds checks over a
//! `&[u8]` with no IO-style error plumbing. All multi-byte reads are
//! little-endian and advance the cursor on success.

use byteorder::{ByteOrder, LittleEndian};

use crate::err::{DecodeError, DecodeResult};

#[derive(Clone, Copy, Debug)]
pub(crate) struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    #[inline]
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        ByteCursor { buf, pos: 0 }
    }

    #[inline]
    pub(crate) fn position(&self) -> u64 {
        self.pos as u64
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Moves to an absolute offset. `pos == len` (EOF) is allowed.
    #[inline]
    pub(crate) fn set_pos(&mut self, pos: usize, what: &'static str) -> DecodeResult<()> {
        if pos > self.buf.len() {
            return Err(DecodeError::Truncated {
                what,
                offset: pos as u64,
                need: 0,
                have: 0,
            });
        }
        self.pos = pos;
        Ok(())
    }

    #[inline]
    pub(crate) fn take_bytes(&mut self, len: usize, what: &'static str) -> DecodeResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(DecodeError::Truncated {
            what,
            offset: self.pos as u64,
            need: len,
            have: self.remaining(),
        })?;
        let out = self.buf.get(self.pos..end).ok_or(DecodeError::Truncated {
            what,
            offset: self.pos as u64,
            need: len,
            have: self.remaining(),
        })?;
        self.pos = end;
        Ok(out)
    }

    #[inline]
    pub(crate) fn u8(&mut self, what: &'static str) -> DecodeResult<u8> {
        let b = self.take_bytes(1, what)?;
        Ok(b[0])
    }

    #[inline]
    pub(crate) fn u16(&mut self, what: &'static str) -> DecodeResult<u16> {
        let b = self.take_bytes(2, what)?;
        Ok(LittleEndian::read_u16(b))
    }

    #[inline]
    pub(crate) fn u32(&mut self, what: &'static str) -> DecodeResult<u32> {
        let b = self.take_bytes(4, what)?;
        Ok(LittleEndian::read_u32(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_and_bounds_check() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.u8("first").unwrap(), 0x01);
        assert_eq!(cursor.u16("pair").unwrap(), 0x0302);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), 2);

        let err = cursor.u32("quad").unwrap_err();
        match err {
            DecodeError::Truncated { what, offset, need, have } => {
                assert_eq!(what, "quad");
                assert_eq!(offset, 3);
                assert_eq!(need, 4);
                assert_eq!(have, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn set_pos_allows_eof_but_not_past() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(&data);
        cursor.set_pos(4, "seek").unwrap();
        assert!(cursor.at_end());
        assert!(cursor.set_pos(5, "seek").is_err());
    }
}
