//! Register words composed from several helpers keep every field intact.

use ctr_gpu::{
    attrib::{AttribFormat, attrib_fmt},
    fragment::{BlendFactor, TestFunc, WriteMask},
    lighting::{LightLutId, LightLutInput, light_lut_input, light_perm},
    tev::{TevOpAlpha, TevOpRgb, TevSrc, tev_alpha_operands, tev_rgb_operands, tev_sources},
    texture::{
        TexUnit, TextureFilter, TextureParams, TextureWrap, texture_mag_filter,
        texture_min_filter, texture_wrap_s, texture_wrap_t,
    },
};

#[test]
fn texture_fields_are_disjoint() {
    let fields = [
        texture_mag_filter(u32::MAX),
        texture_min_filter(u32::MAX),
        texture_wrap_s(u32::MAX),
        texture_wrap_t(u32::MAX),
    ];

    for (i, a) in fields.iter().enumerate() {
        for b in &fields[i + 1..] {
            assert_eq!(a & b, 0, "{a:#x} overlaps {b:#x}");
        }
    }
}

#[test]
fn full_texture_word_decodes_back() {
    let raw = texture_mag_filter(TextureFilter::Linear.to_raw())
        | texture_min_filter(TextureFilter::Nearest.to_raw())
        | texture_wrap_s(TextureWrap::MirroredRepeat.to_raw())
        | texture_wrap_t(TextureWrap::ClampToEdge.to_raw());

    let params = TextureParams::from(raw);

    assert_eq!(params.mag_filter(), TextureFilter::Linear);
    assert_eq!(params.min_filter(), TextureFilter::Nearest);
    assert_eq!(params.wrap_s(), TextureWrap::MirroredRepeat);
    assert_eq!(params.wrap_t(), TextureWrap::ClampToEdge);
}

#[test]
fn combiner_stage_words() {
    let sources = tev_sources(
        TevSrc::Texture0.to_raw(),
        TevSrc::PrimaryColor.to_raw(),
        TevSrc::Constant.to_raw(),
    );
    let sources = sources | tev_sources(TevSrc::Previous.to_raw(), 0, 0) << 16;
    assert_eq!(sources, 0x000F_0E03);

    let operands = tev_rgb_operands(TevOpRgb::SrcColor, TevOpRgb::SrcColor, TevOpRgb::SrcColor)
        | tev_alpha_operands(TevOpAlpha::OneMinusSrcAlpha, TevOpAlpha::SrcAlpha, TevOpAlpha::SrcAlpha)
            << 12;
    assert_eq!(operands, 0x1000);
}

#[test]
fn vertex_layout_word() {
    // position: 3 floats, color: 4 unsigned bytes, texcoord: 2 shorts
    let word = attrib_fmt(0, 3, AttribFormat::Float.to_raw())
        | attrib_fmt(1, 4, AttribFormat::UnsignedByte.to_raw())
        | attrib_fmt(2, 2, AttribFormat::Short.to_raw());
    assert_eq!(word, 0x6DB);

    let stride = 3 * AttribFormat::Float.size()
        + 4 * AttribFormat::UnsignedByte.size()
        + 2 * AttribFormat::Short.size();
    assert_eq!(stride, 20);
}

#[test]
fn every_light_slot_has_its_own_nibble() {
    let word = (0..8).fold(0, |acc, slot| acc | light_perm(slot, slot));
    assert_eq!(word, 0x7654_3210);

    for lut in [LightLutId::D0, LightLutId::D1, LightLutId::Sp, LightLutId::Fr] {
        let field = light_lut_input(lut.to_raw(), LightLutInput::Cp.to_raw());
        assert_eq!(field >> (lut.to_raw() * 4), LightLutInput::Cp.to_raw());
    }
}

#[test]
fn flag_sets_and_enums_decode_raw_values() {
    assert_eq!(TexUnit::from_bits(0x3), Some(TexUnit::TEXUNIT0 | TexUnit::TEXUNIT1));
    assert_eq!(TexUnit::from_bits(0x8), None);
    assert_eq!(WriteMask::from_bits_truncate(0xFF), WriteMask::ALL);

    assert_eq!(TestFunc::try_from(5), Ok(TestFunc::LessEqual));
    let err = BlendFactor::try_from(0x20).unwrap_err();
    assert_eq!(err.to_string(), "invalid BlendFactor value 0x20");
}
