//! Texture combiner (TEV) stage configuration.
//!
//! Each of the six stages combines up to three sources. The source and operand registers pack
//! one 4-bit field per input, with the RGB triple in bits 0-11 and the alpha triple in bits
//! 16-27.

register_enum! {
    /// Combiner stage input.
    pub enum TevSrc {
        /// Primary (vertex) color
        PrimaryColor = 0x00,
        /// Primary fragment color from lighting
        FragmentPrimaryColor = 0x01,
        /// Secondary fragment color from lighting
        FragmentSecondaryColor = 0x02,
        Texture0 = 0x03,
        Texture1 = 0x04,
        Texture2 = 0x05,
        Texture3 = 0x06,
        /// Combiner buffer
        PreviousBuffer = 0x0D,
        /// The stage's constant color
        Constant = 0x0E,
        /// Output of the previous stage
        Previous = 0x0F,
    }
}

register_enum! {
    /// RGB operand applied to a combiner source.
    pub enum TevOpRgb {
        SrcColor = 0x00,
        OneMinusSrcColor = 0x01,
        SrcAlpha = 0x02,
        OneMinusSrcAlpha = 0x03,
        SrcR = 0x04,
        OneMinusSrcR = 0x05,
        Unknown06 = 0x06,
        Unknown07 = 0x07,
        SrcG = 0x08,
        OneMinusSrcG = 0x09,
        Unknown0A = 0x0A,
        Unknown0B = 0x0B,
        SrcB = 0x0C,
        OneMinusSrcB = 0x0D,
        Unknown0E = 0x0E,
        Unknown0F = 0x0F,
    }
}

register_enum! {
    /// Alpha operand applied to a combiner source.
    pub enum TevOpAlpha {
        SrcAlpha = 0x00,
        OneMinusSrcAlpha = 0x01,
        SrcR = 0x02,
        OneMinusSrcR = 0x03,
        SrcG = 0x04,
        OneMinusSrcG = 0x05,
        SrcB = 0x06,
        OneMinusSrcB = 0x07,
    }
}

register_enum! {
    /// Combiner function.
    ///
    /// Value `7` is not a valid function.
    pub enum CombineFunc {
        Replace = 0x00,
        Modulate = 0x01,
        Add = 0x02,
        AddSigned = 0x03,
        Interpolate = 0x04,
        Subtract = 0x05,
        /// RGB only
        Dot3Rgb = 0x06,
        MultiplyAdd = 0x08,
        AddMultiply = 0x09,
    }
}

register_enum! {
    /// Combiner output scale.
    pub enum TevScale {
        /// 1x
        X1 = 0x0,
        /// 2x
        X2 = 0x1,
        /// 4x
        X4 = 0x2,
    }
}

impl TevScale {
    /// Returns the multiplier applied to the combiner output.
    pub const fn factor(self) -> u32 {
        1 << self.to_raw()
    }
}

/// Packs three combiner sources, 4 bits each.
#[inline]
pub const fn tev_sources(a: u32, b: u32, c: u32) -> u32 {
    (a & 0xF) | (b & 0xF) << 4 | (c & 0xF) << 8
}

/// Packs three combiner operands, 4 bits each.
#[inline]
pub const fn tev_operands(a: u32, b: u32, c: u32) -> u32 {
    (a & 0xF) | (b & 0xF) << 4 | (c & 0xF) << 8
}

#[inline]
pub const fn tev_rgb_operands(a: TevOpRgb, b: TevOpRgb, c: TevOpRgb) -> u32 {
    tev_operands(a.to_raw(), b.to_raw(), c.to_raw())
}

#[inline]
pub const fn tev_alpha_operands(a: TevOpAlpha, b: TevOpAlpha, c: TevOpAlpha) -> u32 {
    tev_operands(a.to_raw(), b.to_raw(), c.to_raw())
}

/// Selects which of the first four stages write their output to the combiner buffer.
#[inline]
pub const fn tev_buffer_write_config(s0: bool, s1: bool, s2: bool, s3: bool) -> u32 {
    (s0 as u32) | (s1 as u32) << 1 | (s2 as u32) << 2 | (s3 as u32) << 3
}
