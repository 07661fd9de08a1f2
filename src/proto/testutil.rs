//! Hand-rolled message builder for tests. Encodes the same wire format the
//! parsers read, so fixtures stay readable at the call site.

pub(crate) struct Pb {
    buf: Vec<u8>,
}

impl Pb {
    pub(crate) fn new() -> Pb {
        Pb { buf: Vec::new() }
    }

    pub(crate) fn varint(mut self, field: u32, value: u64) -> Pb {
        self.push_key(field, 0);
        self.push_varint(value);
        self
    }

    pub(crate) fn fixed32(mut self, field: u32, value: u32) -> Pb {
        self.push_key(field, 5);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub(crate) fn fixed64(mut self, field: u32, value: u64) -> Pb {
        self.push_key(field, 1);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub(crate) fn bytes(mut self, field: u32, data: &[u8]) -> Pb {
        self.push_key(field, 2);
        self.push_varint(data.len() as u64);
        self.buf.extend_from_slice(data);
        self
    }

    pub(crate) fn string(self, field: u32, value: &str) -> Pb {
        self.bytes(field, value.as_bytes())
    }

    pub(crate) fn message(self, field: u32, message: Pb) -> Pb {
        let encoded = message.build();
        self.bytes(field, &encoded)
    }

    /// Splices raw bytes in, for deliberately malformed fixtures.
    pub(crate) fn raw(mut self, data: &[u8]) -> Pb {
        self.buf.extend_from_slice(data);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.buf
    }

    fn push_key(&mut self, field: u32, wire_type: u8) {
        self.push_varint(u64::from(field) << 3 | u64::from(wire_type));
    }

    fn push_varint(&mut self, mut value: u64) {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(byte);
                break;
            }
            self.buf.push(byte | 0x80);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_keys_and_varints() {
        let bytes = Pb::new().varint(1, 150).build();
        assert_eq!(bytes, vec![0x08, 0x96, 0x01]);
    }

    #[test]
    fn encodes_nested_messages() {
        let bytes = Pb::new().message(3, Pb::new().string(1, "ab")).build();
        assert_eq!(bytes, vec![0x1a, 0x04, 0x0a, 0x02, b'a', b'b']);
    }
}
