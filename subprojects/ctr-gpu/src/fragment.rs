//! Per-fragment operations: tests, masks, blending and culling.

register_enum! {
    /// Test function, shared by the depth, alpha and stencil tests.
    pub enum TestFunc {
        /// Never pass
        Never = 0,
        /// Always pass
        Always = 1,
        /// Pass if equal
        Equal = 2,
        /// Pass if not equal
        NotEqual = 3,
        /// Pass if less than
        Less = 4,
        /// Pass if less than or equal
        LessEqual = 5,
        /// Pass if greater than
        Greater = 6,
        /// Pass if greater than or equal
        GreaterEqual = 7,
    }
}

register_enum! {
    /// Scissor test mode.
    ///
    /// Value `2` is not a valid mode.
    pub enum ScissorMode {
        /// Disabled
        Disable = 0,
        /// Excludes pixels inside the scissor box
        Invert = 1,
        /// Excludes pixels outside of the scissor box
        Normal = 3,
    }
}

register_enum! {
    /// Stencil buffer update operation.
    pub enum StencilOp {
        /// Keeps the old value
        Keep = 0,
        /// Writes zero
        Zero = 1,
        /// Writes the reference value
        Replace = 2,
        /// Increments, saturating at 255
        Increment = 3,
        /// Decrements, saturating at 0
        Decrement = 4,
        /// Writes the bitwise inverse of the old value
        Invert = 5,
        /// Increments with wrap-around
        IncrementWrap = 6,
        /// Decrements with wrap-around
        DecrementWrap = 7,
    }
}

bitflags::bitflags! {
    /// Framebuffer write mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WriteMask: u32 {
        const RED = 0x01;
        const GREEN = 0x02;
        const BLUE = 0x04;
        const ALPHA = 0x08;
        const DEPTH = 0x10;

        /// All color components
        const COLOR = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits() | Self::ALPHA.bits();
        /// All components
        const ALL = Self::COLOR.bits() | Self::DEPTH.bits();
    }
}

register_enum! {
    /// Blend equation.
    pub enum BlendEquation {
        Add = 0,
        Subtract = 1,
        ReverseSubtract = 2,
        Min = 3,
        Max = 4,
    }
}

register_enum! {
    /// Blend factor.
    pub enum BlendFactor {
        Zero = 0,
        One = 1,
        SrcColor = 2,
        OneMinusSrcColor = 3,
        DstColor = 4,
        OneMinusDstColor = 5,
        SrcAlpha = 6,
        OneMinusSrcAlpha = 7,
        DstAlpha = 8,
        OneMinusDstAlpha = 9,
        ConstantColor = 10,
        OneMinusConstantColor = 11,
        ConstantAlpha = 12,
        OneMinusConstantAlpha = 13,
        SrcAlphaSaturate = 14,
    }
}

register_enum! {
    /// Logical operation, used instead of blending when logic op mode is enabled.
    pub enum LogicOp {
        Clear = 0,
        And = 1,
        AndReverse = 2,
        Copy = 3,
        Set = 4,
        CopyInverted = 5,
        Noop = 6,
        Invert = 7,
        Nand = 8,
        Or = 9,
        Nor = 10,
        Xor = 11,
        Equiv = 12,
        AndInverted = 13,
        OrReverse = 14,
        OrInverted = 15,
    }
}

register_enum! {
    /// Face culling mode.
    pub enum CullMode {
        /// Disabled
        None = 0,
        /// Culls counter-clockwise front faces
        FrontCcw = 1,
        /// Culls counter-clockwise back faces
        BackCcw = 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scissor_mode_has_a_gap() {
        assert_eq!(ScissorMode::try_from(3), Ok(ScissorMode::Normal));
        assert!(ScissorMode::try_from(2).is_err());
    }

    #[test]
    fn write_mask_composites() {
        assert_eq!(WriteMask::COLOR.bits(), 0x0F);
        assert_eq!(WriteMask::ALL.bits(), 0x1F);
        assert_eq!(WriteMask::all(), WriteMask::ALL);
        assert!(!WriteMask::COLOR.contains(WriteMask::DEPTH));
    }

    #[test]
    fn raw_values_roundtrip() {
        for &func in TestFunc::ALL {
            assert_eq!(TestFunc::try_from(func.to_raw()), Ok(func));
        }
        for &factor in BlendFactor::ALL {
            assert_eq!(BlendFactor::try_from(u32::from(factor)), Ok(factor));
        }
        assert_eq!(LogicOp::ALL.len(), 16);
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(BlendEquation::try_from(5).is_err());
        assert!(BlendFactor::try_from(15).is_err());
        assert!(StencilOp::try_from(8).is_err());
        assert!(CullMode::try_from(3).is_err());
    }
}
