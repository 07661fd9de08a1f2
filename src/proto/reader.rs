//! Low-level reader for the length-prefixed wire encoding.
//!
//! Fields arrive as a varint tag (field number and wire type) followed by a
//! payload. Unknown fields are skippable by wire type, which is what lets
//! newer writers add fields without breaking this reader.

use crate::cursor::ByteCursor;
use crate::err::{DecodeError, DecodeResult};

const MAX_VARINT_BYTES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WireType {
    Varint,
    Fixed64,
    LengthDelimited,
    Fixed32,
}

pub(crate) struct WireReader<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        WireReader {
            cursor: ByteCursor::new(buf),
        }
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    #[inline]
    pub(crate) fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Reads the next field tag: `(field_number, wire_type)`.
    pub(crate) fn field_header(&mut self) -> DecodeResult<(u32, WireType)> {
        let offset = self.cursor.position();
        let tag = self.varint("field tag")?;
        let field = (tag >> 3) as u32;
        if field == 0 {
            return Err(DecodeError::InvalidTag { offset });
        }
        let wire_type = match tag & 0x7 {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            5 => WireType::Fixed32,
            other => {
                return Err(DecodeError::UnsupportedWireType {
                    value: other as u8,
                    offset,
                });
            }
        };
        Ok((field, wire_type))
    }

    pub(crate) fn varint(&mut self, what: &'static str) -> DecodeResult<u64> {
        let offset = self.cursor.position();
        let mut value: u64 = 0;
        for shift in 0..MAX_VARINT_BYTES {
            let byte = self.cursor.u8(what)?;
            // The tenth byte may only carry the final bit of a u64.
            if shift == MAX_VARINT_BYTES - 1 && byte > 0x01 {
                return Err(DecodeError::VarintOverflow { offset });
            }
            value |= u64::from(byte & 0x7f) << (shift * 7);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::VarintOverflow { offset })
    }

    /// Varint read for 32-bit fields. Wider payloads are truncated, matching
    /// how standard readers narrow oversized varints.
    #[inline]
    pub(crate) fn varint_u32(&mut self, what: &'static str) -> DecodeResult<u32> {
        Ok(self.varint(what)? as u32)
    }

    #[inline]
    pub(crate) fn bool(&mut self, what: &'static str) -> DecodeResult<bool> {
        Ok(self.varint(what)? != 0)
    }

    /// Length-delimited payload.
    pub(crate) fn bytes(&mut self, what: &'static str) -> DecodeResult<&'a [u8]> {
        let len = self.varint(what)?;
        let len = usize::try_from(len).map_err(|_| DecodeError::Truncated {
            what,
            offset: self.cursor.position(),
            need: usize::MAX,
            have: self.cursor.remaining(),
        })?;
        self.cursor.take_bytes(len, what)
    }

    pub(crate) fn string(&mut self, what: &'static str) -> DecodeResult<String> {
        let offset = self.cursor.position();
        let bytes = self.bytes(what)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    /// Skips over one field's payload.
    pub(crate) fn skip(&mut self, wire_type: WireType, what: &'static str) -> DecodeResult<()> {
        match wire_type {
            WireType::Varint => {
                self.varint(what)?;
            }
            WireType::Fixed64 => {
                self.cursor.take_bytes(8, what)?;
            }
            WireType::LengthDelimited => {
                self.bytes(what)?;
            }
            WireType::Fixed32 => {
                self.cursor.take_bytes(4, what)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_varints() {
        let mut reader = WireReader::new(&[0x00]);
        assert_eq!(reader.varint("v").unwrap(), 0);

        let mut reader = WireReader::new(&[0x96, 0x01]);
        assert_eq!(reader.varint("v").unwrap(), 150);

        let mut reader = WireReader::new(&[
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01,
        ]);
        assert_eq!(reader.varint("v").unwrap(), u64::MAX);
    }

    #[test]
    fn rejects_oversized_varints() {
        // Eleventh continuation byte never comes into play; the tenth byte
        // already carries more than the top bit of a u64.
        let mut reader = WireReader::new(&[
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02,
        ]);
        assert!(matches!(
            reader.varint("v").unwrap_err(),
            DecodeError::VarintOverflow { offset: 0 }
        ));

        let mut reader = WireReader::new(&[0x80, 0x80]);
        assert!(matches!(
            reader.varint("v").unwrap_err(),
            DecodeError::Truncated { .. }
        ));
    }

    #[test]
    fn parses_field_headers() {
        // Field 1, varint; field 2, length-delimited.
        let mut reader = WireReader::new(&[0x08, 0x12]);
        assert_eq!(reader.field_header().unwrap(), (1, WireType::Varint));
        assert_eq!(reader.field_header().unwrap(), (2, WireType::LengthDelimited));
        assert!(reader.at_end());

        let mut reader = WireReader::new(&[0x00]);
        assert!(matches!(
            reader.field_header().unwrap_err(),
            DecodeError::InvalidTag { offset: 0 }
        ));

        // Wire type 3 (group start) is not supported.
        let mut reader = WireReader::new(&[0x0b]);
        assert!(matches!(
            reader.field_header().unwrap_err(),
            DecodeError::UnsupportedWireType { value: 3, .. }
        ));
    }

    #[test]
    fn reads_and_skips_length_delimited_fields() {
        let data = [0x03, b'a', b'b', b'c', 0x08, 0x05];
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.bytes("payload").unwrap(), b"abc");
        assert_eq!(reader.field_header().unwrap(), (1, WireType::Varint));
        reader.skip(WireType::Varint, "value").unwrap();
        assert!(reader.at_end());
    }

    #[test]
    fn rejects_invalid_utf8_strings() {
        let data = [0x02, 0xff, 0xfe];
        let mut reader = WireReader::new(&data);
        assert!(matches!(
            reader.string("s").unwrap_err(),
            DecodeError::InvalidUtf8 { offset: 0 }
        ));
    }

    #[test]
    fn truncated_payload_reports_need_and_have() {
        let data = [0x05, b'a', b'b'];
        let mut reader = WireReader::new(&data);
        match reader.bytes("payload").unwrap_err() {
            DecodeError::Truncated { what, need, have, .. } => {
                assert_eq!(what, "payload");
                assert_eq!(need, 5);
                assert_eq!(have, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
