//! Vertex attribute formats (`GPUREG_ATTRIBBUFFERS_FORMAT_LOW/HIGH`).
//!
//! Each attribute takes a 4-bit field in the 64-bit format word: bits 0-1 hold the component
//! type and bits 2-3 the component count minus one.

register_enum! {
    /// Vertex attribute component type.
    pub enum AttribFormat {
        /// 8-bit signed byte
        Byte = 0,
        /// 8-bit unsigned byte
        UnsignedByte = 1,
        /// 16-bit signed short
        Short = 2,
        /// 32-bit float
        Float = 3,
    }
}

impl AttribFormat {
    /// Returns the size of one component, in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short => 2,
            Self::Float => 4,
        }
    }
}

/// Encodes the format of attribute `i` with `n` components (1 to 4) of type `f`.
///
/// The attribute index is masked to 4 bits.
#[inline]
pub const fn attrib_fmt(i: u32, n: u32, f: u32) -> u64 {
    let field = ((n.wrapping_sub(1) & 0x3) << 2) | (f & 0x3);
    (field as u64) << ((i & 0xF) * 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_fields() {
        assert_eq!(attrib_fmt(0, 3, AttribFormat::Float.to_raw()), 0xB);
        assert_eq!(attrib_fmt(1, 2, AttribFormat::Short.to_raw()), 0x60);
        assert_eq!(attrib_fmt(15, 4, AttribFormat::UnsignedByte.to_raw()), 0xD << 60);
    }

    #[test]
    fn attributes_do_not_overlap() {
        let word = attrib_fmt(0, 4, 3) | attrib_fmt(1, 1, 0) | attrib_fmt(2, 2, 1);
        assert_eq!(word, 0x50F);
    }

    #[test]
    fn component_sizes() {
        assert_eq!(AttribFormat::Byte.size(), 1);
        assert_eq!(AttribFormat::UnsignedByte.size(), 1);
        assert_eq!(AttribFormat::Short.size(), 2);
        assert_eq!(AttribFormat::Float.size(), 4);
    }
}
