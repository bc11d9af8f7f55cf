//! Service names as passed to the service manager.
//!
//! A name is at most 8 ASCII bytes, zero padded, and travels as two little-endian words
//! followed by its length.

use static_assertions::const_assert_eq;

/// Fixed-capacity ASCII service name (max 8 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C, align(4))]
pub struct ServiceName {
    name: [u8; 8],
}

const_assert_eq!(size_of::<ServiceName>(), 2 * size_of::<u32>());

impl ServiceName {
    /// Maximum length of a service name.
    pub const MAX_LEN: usize = 8;

    /// Creates a service name, or returns `None` if `name` is longer than 8 bytes or not ASCII.
    pub const fn new(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        if bytes.len() > Self::MAX_LEN {
            return None;
        }

        let mut result = [0u8; 8];
        let mut i = 0;
        while i < bytes.len() {
            if !bytes[i].is_ascii() || bytes[i] == 0 {
                return None;
            }
            result[i] = bytes[i];
            i += 1;
        }
        Some(Self { name: result })
    }

    /// Returns the name as the two words sent in a request.
    #[inline]
    pub const fn to_words(&self) -> [u32; 2] {
        let n = &self.name;
        [
            u32::from_le_bytes([n[0], n[1], n[2], n[3]]),
            u32::from_le_bytes([n[4], n[5], n[6], n[7]]),
        ]
    }

    /// Returns the length of the name.
    pub const fn len(&self) -> usize {
        let mut i = 0;
        while i < Self::MAX_LEN {
            if self.name[i] == 0 {
                return i;
            }
            i += 1;
        }
        Self::MAX_LEN
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.name[0] == 0
    }

    /// Returns the name bytes without padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.name[..self.len()]
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }
}

impl core::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for ServiceName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for ServiceName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_name_into_words() {
        let name = ServiceName::new("hid:USER").unwrap();

        assert_eq!(name.len(), 8);
        assert_eq!(name.to_words(), [0x3A64_6968, 0x5245_5355]);
    }

    #[test]
    fn short_names_are_zero_padded() {
        let name = ServiceName::new("srv:").unwrap();

        assert_eq!(name.len(), 4);
        assert_eq!(name.to_words()[1], 0);
        assert_eq!(name, "srv:");
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(ServiceName::new("too:long:").is_none());
        assert!(ServiceName::new("hïd").is_none());
        assert!(ServiceName::new("").unwrap().is_empty());
    }
}
