//! BCP-47 subset parser feeding the configuration descriptor's locale cells.
//!
//! Only the subtags the descriptor can represent are accepted:
//! `language ["-" script] ["-" region] ["-" variant]`.

/// Parsed locale subtags, zero-padded to the descriptor's cell widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Locale {
    /// Lowercase, 2 or 3 letters.
    pub language: [u8; 4],
    /// Uppercase 2 letters or 3 digits.
    pub region: [u8; 4],
    /// Title-case, 4 letters.
    pub script: [u8; 4],
    /// Lowercase, 5 to 8 alphanumerics (or 4 starting with a digit).
    pub variant: [u8; 8],
}

impl Locale {
    /// Parses a locale tag, returning `None` when any subtag falls outside
    /// the representable subset.
    pub fn parse(tag: &str) -> Option<Locale> {
        if tag.is_empty() || !tag.is_ascii() {
            return None;
        }

        let subtags: Vec<String> = tag.split('-').map(|s| s.to_ascii_lowercase()).collect();
        let mut locale = Locale::default();

        match subtags.as_slice() {
            [language] => {
                locale.set_language(language)?;
            }
            [language, second] => {
                locale.set_language(language)?;
                // A single trailing subtag may be a script, a region or a
                // variant; its shape decides.
                if is_region(second) {
                    locale.set_region(second);
                } else if is_script(second) {
                    locale.set_script(second);
                } else if is_variant(second) {
                    locale.set_variant(second);
                } else {
                    return None;
                }
            }
            [language, second, third] => {
                locale.set_language(language)?;
                if is_script(second) {
                    locale.set_script(second);
                    if is_region(third) {
                        locale.set_region(third);
                    } else if is_variant(third) {
                        locale.set_variant(third);
                    } else {
                        return None;
                    }
                } else if is_region(second) && is_variant(third) {
                    locale.set_region(second);
                    locale.set_variant(third);
                } else {
                    return None;
                }
            }
            [language, script, region, variant] => {
                locale.set_language(language)?;
                if !is_script(script) || !is_region(region) || !is_variant(variant) {
                    return None;
                }
                locale.set_script(script);
                locale.set_region(region);
                locale.set_variant(variant);
            }
            _ => return None,
        }

        Some(locale)
    }

    fn set_language(&mut self, subtag: &str) -> Option<()> {
        if !matches!(subtag.len(), 2 | 3) || !subtag.bytes().all(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        self.language[..subtag.len()].copy_from_slice(subtag.as_bytes());
        Some(())
    }

    fn set_region(&mut self, subtag: &str) {
        for (slot, b) in self.region.iter_mut().zip(subtag.bytes()) {
            *slot = b.to_ascii_uppercase();
        }
    }

    fn set_script(&mut self, subtag: &str) {
        for (i, (slot, b)) in self.script.iter_mut().zip(subtag.bytes()).enumerate() {
            *slot = if i == 0 {
                b.to_ascii_uppercase()
            } else {
                b
            };
        }
    }

    fn set_variant(&mut self, subtag: &str) {
        for (slot, b) in self.variant.iter_mut().zip(subtag.bytes()) {
            *slot = b;
        }
    }

    /// Packs the language into a two-byte cell, base-31 encoded when the
    /// code has three letters.
    pub fn pack_language(&self) -> [u8; 2] {
        pack_language_or_region(&self.language, b'a')
    }

    /// Packs the region into a two-byte cell, base-31 encoded when the
    /// code has three digits.
    pub fn pack_region(&self) -> [u8; 2] {
        pack_language_or_region(&self.region, b'0')
    }
}

fn is_script(subtag: &str) -> bool {
    subtag.len() == 4 && subtag.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_alphabetic()))
        || (subtag.len() == 3 && subtag.bytes().all(|b| b.is_ascii_digit()))
}

fn is_variant(subtag: &str) -> bool {
    if !subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return false;
    }
    match subtag.len() {
        5..=8 => true,
        4 => subtag.as_bytes()[0].is_ascii_digit(),
        _ => false,
    }
}

/// Two-letter codes are stored as plain bytes; three-letter codes are packed
/// into 15 bits with the high bit of the first byte set as a marker.
fn pack_language_or_region(code: &[u8; 4], base: u8) -> [u8; 2] {
    if code[2] == 0 {
        [code[0], code[1]]
    } else {
        let first = code[0].wrapping_sub(base) & 0x7f;
        let second = code[1].wrapping_sub(base) & 0x7f;
        let third = code[2].wrapping_sub(base) & 0x7f;
        [
            0x80 | (third << 2) | (second >> 3),
            (second << 5) | first,
        ]
    }
}
