//! Texture unit configuration.
//!
//! The texture parameter register (`GPUREG_TEXUNITn_PARAM`) holds the filters and wrap modes:
//!
//! | Bits  | Field      |
//! |-------|------------|
//! | 1     | Mag filter |
//! | 2     | Min filter |
//! | 8-9   | Wrap T     |
//! | 12-13 | Wrap S     |

use modular_bitfield::prelude::*;
use static_assertions::const_assert_eq;

register_enum! {
    /// Texture filter.
    #[derive(BitfieldSpecifier)]
    #[bits = 1]
    pub enum TextureFilter {
        /// Nearest-neighbor interpolation
        Nearest = 0x0,
        /// Linear interpolation
        Linear = 0x1,
    }
}

register_enum! {
    /// Texture wrap mode.
    #[derive(BitfieldSpecifier)]
    #[bits = 2]
    pub enum TextureWrap {
        /// Clamps to edge
        ClampToEdge = 0x0,
        /// Clamps to border
        ClampToBorder = 0x1,
        /// Repeats texture
        Repeat = 0x2,
        /// Repeats with mirrored texture
        MirroredRepeat = 0x3,
    }
}

register_enum! {
    /// Texture pixel format.
    pub enum TexColor {
        /// 8-bit Red + 8-bit Green + 8-bit Blue + 8-bit Alpha
        Rgba8 = 0x0,
        /// 8-bit Red + 8-bit Green + 8-bit Blue
        Rgb8 = 0x1,
        /// 5-bit Red + 5-bit Green + 5-bit Blue + 1-bit Alpha
        Rgba5551 = 0x2,
        /// 5-bit Red + 6-bit Green + 5-bit Blue
        Rgb565 = 0x3,
        /// 4-bit Red + 4-bit Green + 4-bit Blue + 4-bit Alpha
        Rgba4 = 0x4,
        /// 8-bit Luminance + 8-bit Alpha
        La8 = 0x5,
        /// 8-bit Hi + 8-bit Lo
        HiLo8 = 0x6,
        /// 8-bit Luminance
        L8 = 0x7,
        /// 8-bit Alpha
        A8 = 0x8,
        /// 4-bit Luminance + 4-bit Alpha
        La4 = 0x9,
        /// 4-bit Luminance
        L4 = 0xA,
        /// ETC1 texture compression
        Etc1 = 0xB,
        /// ETC1 texture compression + 4-bit Alpha
        Etc1A4 = 0xC,
    }
}

impl TexColor {
    /// Returns the storage size of one texel, in bits.
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Rgba8 => 32,
            Self::Rgb8 => 24,
            Self::Rgba5551 | Self::Rgb565 | Self::Rgba4 | Self::La8 | Self::HiLo8 => 16,
            Self::L8 | Self::A8 | Self::La4 | Self::Etc1A4 => 8,
            Self::L4 | Self::Etc1 => 4,
        }
    }

    /// Returns true for the block-compressed formats.
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::Etc1 | Self::Etc1A4)
    }
}

bitflags::bitflags! {
    /// Texture units, as enabled in `GPUREG_TEXUNIT_CONFIG`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TexUnit: u32 {
        /// Texture unit 0
        const TEXUNIT0 = 0x1;
        /// Texture unit 1
        const TEXUNIT1 = 0x2;
        /// Texture unit 2
        const TEXUNIT2 = 0x4;
    }
}

/// Encodes the magnification filter field.
#[inline]
pub const fn texture_mag_filter(v: u32) -> u32 {
    (v & 0x1) << 1
}

/// Encodes the minification filter field.
#[inline]
pub const fn texture_min_filter(v: u32) -> u32 {
    (v & 0x1) << 2
}

/// Encodes the S (horizontal) wrap mode field.
#[inline]
pub const fn texture_wrap_s(v: u32) -> u32 {
    (v & 0x3) << 12
}

/// Encodes the T (vertical) wrap mode field.
#[inline]
pub const fn texture_wrap_t(v: u32) -> u32 {
    (v & 0x3) << 8
}

/// Typed texture parameter register word.
///
/// Bits this type does not model (ETC1 and shadow flags, LOD bias) are kept zero.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub struct TextureParams {
    #[skip]
    __reserved0: B1,
    pub mag_filter: TextureFilter,
    pub min_filter: TextureFilter,
    #[skip]
    __reserved1: B5,
    pub wrap_t: TextureWrap,
    #[skip]
    __reserved2: B2,
    pub wrap_s: TextureWrap,
    #[skip]
    __reserved3: B18,
}

const_assert_eq!(size_of::<TextureParams>(), 4);

impl TextureParams {
    /// Builds a parameter word using the same filter for both directions and the same wrap
    /// mode on both axes.
    pub fn uniform(filter: TextureFilter, wrap: TextureWrap) -> Self {
        Self::new()
            .with_mag_filter(filter)
            .with_min_filter(filter)
            .with_wrap_s(wrap)
            .with_wrap_t(wrap)
    }

    /// Returns the raw register word.
    #[inline]
    pub fn to_raw(self) -> u32 {
        self.into()
    }
}

impl Default for TextureParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_word_matches_helpers() {
        for &filter in TextureFilter::ALL {
            for &wrap in TextureWrap::ALL {
                let params = TextureParams::new()
                    .with_mag_filter(filter)
                    .with_min_filter(TextureFilter::Nearest)
                    .with_wrap_s(wrap)
                    .with_wrap_t(TextureWrap::MirroredRepeat);

                let expected = texture_mag_filter(filter.to_raw())
                    | texture_min_filter(0)
                    | texture_wrap_s(wrap.to_raw())
                    | texture_wrap_t(TextureWrap::MirroredRepeat.to_raw());
                assert_eq!(params.to_raw(), expected, "{filter:?} {wrap:?}");
            }
        }
    }

    #[test]
    fn params_word_decodes() {
        let params = TextureParams::from(0x2204);

        assert_eq!(params.mag_filter(), TextureFilter::Nearest);
        assert_eq!(params.min_filter(), TextureFilter::Linear);
        assert_eq!(params.wrap_s(), TextureWrap::Repeat);
        assert_eq!(params.wrap_t(), TextureWrap::Repeat);
    }

    #[test]
    fn uniform_params() {
        let params = TextureParams::uniform(TextureFilter::Linear, TextureWrap::ClampToBorder);
        assert_eq!(params.to_raw(), 0x0000_1106);
        assert_eq!(TextureParams::default().to_raw(), 0);
    }

    #[test]
    fn helpers_mask_before_shifting() {
        assert_eq!(texture_mag_filter(0xFF), 0x2);
        assert_eq!(texture_min_filter(0xFF), 0x4);
        assert_eq!(texture_wrap_t(0xFF), 0x300);
        assert_eq!(texture_wrap_s(0xFF), 0x3000);
    }

    #[test]
    fn bits_per_pixel() {
        assert_eq!(TexColor::Rgba8.bits_per_pixel(), 32);
        assert_eq!(TexColor::Rgb8.bits_per_pixel(), 24);
        assert_eq!(TexColor::Rgb565.bits_per_pixel(), 16);
        assert_eq!(TexColor::HiLo8.bits_per_pixel(), 16);
        assert_eq!(TexColor::La4.bits_per_pixel(), 8);
        assert_eq!(TexColor::L4.bits_per_pixel(), 4);
        assert_eq!(TexColor::Etc1.bits_per_pixel(), 4);
        assert_eq!(TexColor::Etc1A4.bits_per_pixel(), 8);
        assert!(TexColor::Etc1A4.is_compressed());
        assert!(!TexColor::L4.is_compressed());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert_eq!(TexColor::try_from(0xC), Ok(TexColor::Etc1A4));

        let err = TexColor::try_from(0xD).unwrap_err();
        assert_eq!(err.name, "TexColor");
        assert_eq!(err.value, 0xD);
    }

    #[test]
    fn texture_units_combine() {
        let units = TexUnit::TEXUNIT0 | TexUnit::TEXUNIT2;
        assert_eq!(units.bits(), 0x5);
        assert_eq!(TexUnit::all().bits(), 0x7);
    }
}
