//! Fragment lighting configuration.

register_enum! {
    /// Fresnel selector.
    pub enum FresnelSel {
        /// None
        NoFresnel = 0,
        /// Primary alpha
        PrimaryAlpha = 1,
        /// Secondary alpha
        SecondaryAlpha = 2,
        /// Primary and secondary alpha
        PrimarySecondaryAlpha = 3,
    }
}

register_enum! {
    /// Bump map mode.
    pub enum BumpMode {
        /// Disabled
        NotUsed = 0,
        /// The normal map perturbs the surface normal
        AsBump = 1,
        /// The normal map perturbs the tangent
        AsTangent = 2,
    }
}

register_enum! {
    /// Lighting lookup table.
    pub enum LightLutId {
        /// Distribution 0
        D0 = 0,
        /// Distribution 1
        D1 = 1,
        /// Spotlight
        Sp = 2,
        /// Fresnel
        Fr = 3,
        /// Reflection, blue
        Rb = 4,
        /// Reflection, green
        Rg = 5,
        /// Reflection, red
        Rr = 6,
        /// Distance attenuation
        Da = 7,
    }
}

register_enum! {
    /// Lookup table input.
    pub enum LightLutInput {
        /// Normal and half vector
        Nh = 0,
        /// View and half vector
        Vh = 1,
        /// Normal and view vector
        Nv = 2,
        /// Light and normal vector
        Ln = 3,
        /// Light vector and spotlight direction
        Sp = 4,
        /// Half vector projected on the tangent plane
        Cp = 5,
    }
}

register_enum! {
    /// Lookup table output scale.
    ///
    /// Values `4` and `5` are not valid scales.
    pub enum LightLutScaler {
        X1 = 0,
        X2 = 1,
        X4 = 2,
        X8 = 3,
        X0_25 = 6,
        X0_5 = 7,
    }
}

register_enum! {
    /// Lookup table group selected by [`light_lut_idx`].
    pub enum LightLutSelect {
        Common = 0,
        Sp = 1,
        Da = 2,
    }
}

/// Encodes the light environment layer configuration.
///
/// Layer configuration 7 is stored as 8; the hardware has no 7.
#[inline]
pub const fn light_env_layer_config(n: u32) -> u32 {
    let n = n & 0x7;
    n + (n == 7) as u32
}

/// Shadow enable bit for light `n`.
#[inline]
pub const fn lc1_shadow_bit(n: u32) -> u32 {
    1 << (n & 0x7)
}

/// Spotlight enable bit for light `n`.
#[inline]
pub const fn lc1_spot_bit(n: u32) -> u32 {
    1 << ((n & 0x7) + 8)
}

/// Lookup table enable bit for table `n`.
#[inline]
pub const fn lc1_lut_bit(n: u32) -> u32 {
    1 << ((n & 0x7) + 16)
}

/// Distance attenuation enable bit for light `n`.
#[inline]
pub const fn lc1_attn_bit(n: u32) -> u32 {
    1 << ((n & 0x7) + 24)
}

/// Assigns hardware light `n` to permutation slot `i`.
#[inline]
pub const fn light_perm(i: u32, n: u32) -> u32 {
    (n & 0x7) << ((i & 0x7) * 4)
}

/// Selects input `n` for lookup table `i`.
#[inline]
pub const fn light_lut_input(i: u32, n: u32) -> u32 {
    (n & 0x7) << ((i & 0x7) * 4)
}

/// Encodes a lookup table write index: table group `c`, table `i` and entry offset `o`.
#[inline]
pub const fn light_lut_idx(c: u32, i: u32, o: u32) -> u32 {
    (o & 0xFF) | (i & 0x7) << 8 | (c & 0x1F) << 11
}

/// Packs a light color, one 10-bit field per channel holding the 8-bit value.
#[inline]
pub const fn light_color(r: u32, g: u32, b: u32) -> u32 {
    (b & 0xFF) | (g & 0xFF) << 10 | (r & 0xFF) << 20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_config_skips_seven() {
        assert_eq!(light_env_layer_config(0), 0);
        assert_eq!(light_env_layer_config(6), 6);
        assert_eq!(light_env_layer_config(7), 8);
        assert_eq!(light_env_layer_config(0xF), 8);
    }

    #[test]
    fn lc1_bits() {
        assert_eq!(lc1_shadow_bit(3), 0x0000_0008);
        assert_eq!(lc1_spot_bit(3), 0x0000_0800);
        assert_eq!(lc1_lut_bit(LightLutId::Da.to_raw()), 0x0080_0000);
        assert_eq!(lc1_attn_bit(7), 0x8000_0000);
        assert_eq!(lc1_attn_bit(8), lc1_attn_bit(0));
    }

    #[test]
    fn light_permutation() {
        let perm = light_perm(0, 2) | light_perm(1, 0) | light_perm(7, 5);
        assert_eq!(perm, 0x5000_0002);
        assert_eq!(light_perm(1, 0xF), 0x70);
    }

    #[test]
    fn lut_input_select() {
        let word = light_lut_input(LightLutId::D0.to_raw(), LightLutInput::Nh.to_raw())
            | light_lut_input(LightLutId::Sp.to_raw(), LightLutInput::Sp.to_raw())
            | light_lut_input(LightLutId::Fr.to_raw(), LightLutInput::Nv.to_raw());
        assert_eq!(word, 0x2400);
    }

    #[test]
    fn lut_index() {
        let idx = light_lut_idx(LightLutSelect::Common.to_raw(), LightLutId::D1.to_raw(), 0x80);
        assert_eq!(idx, 0x180);
        assert_eq!(light_lut_idx(0xFF, 0xF, 0x1FF), 0xFFFF);
    }

    #[test]
    fn color_channels_keep_their_values() {
        let color = light_color(0x12, 0x34, 0x56);
        assert_eq!(color & 0xFF, 0x56);
        assert_eq!((color >> 10) & 0xFF, 0x34);
        assert_eq!((color >> 20) & 0xFF, 0x12);
        assert_eq!(light_color(0x1FF, 0x1FF, 0x1FF), 0x0FF3_FCFF);
    }

    #[test]
    fn scaler_rejects_gap() {
        assert_eq!(LightLutScaler::try_from(6), Ok(LightLutScaler::X0_25));
        assert!(LightLutScaler::try_from(4).is_err());
        assert!(LightLutScaler::try_from(5).is_err());
    }
}
