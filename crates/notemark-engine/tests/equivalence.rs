//! Normalizer laws over whole documents: idempotence, cosmetic invariance,
//! content sensitivity, and the change-detection use the rest of the
//! application builds on.

use notemark_engine::{generate, normalize, parse};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::empty("")]
#[case::spaces("   ")]
#[case::newlines("\n\n")]
#[case::simple("<text indent=\"0\">a</text>")]
#[case::messy("<text indent=\"01\">a &amp; b</text>\n\n<hr/>\n")]
#[case::legacy_glyph("☺pic.png<1><desc>")]
#[case::booleans("<input checked=\"true\" type=\"checkbox\" indent=\"0\">t</input>")]
#[case::quote("<quote>\n<text indent=\"0\">q</text>\n<text indent=\"0\"> </text>\n</quote>")]
#[case::malformed_unterminated("<text indent=\"0\">never closed")]
#[case::malformed_unknown("<notatag x=\"1\">y</notatag>")]
#[case::stray_text("loose prose < not a tag")]
#[case::mixed(
    "<text indent=\"0\">a</text>☺p.png<0>\n<img fileid=\"f\" width=\"9\"/><quote><text>x</text></quote>"
)]
fn normalize_is_idempotent(#[case] input: &str) {
    let once = normalize(input);
    assert_eq!(normalize(&once), once);
}

#[rstest]
#[case::attr_order(
    r#"<img fileid="123" width="500" height="666" imgdes="" imgshow="0" />"#,
    r#"<img imgshow="0" fileid="123" />"#
)]
#[case::boolean_spelling(
    r#"<input type="checkbox" checked="true" indent="1">t</input>"#,
    r#"<input type="checkbox" checked="1" indent="1">t</input>"#
)]
#[case::leading_zeros(
    r#"<text indent="01">a</text>"#,
    r#"<text indent="1">a</text>"#
)]
#[case::legacy_vs_current(
    "☺a1b2.png<1>",
    r#"<img fileid="a1b2.png" imgshow="1"/>"#
)]
#[case::legacy_with_description(
    "☺a1b2.png<0><holiday photo>",
    r#"<img imgshow="0" imgdes="holiday photo" fileid="a1b2.png"/>"#
)]
#[case::inter_block_whitespace(
    "<text indent=\"0\">a</text>\n\n\n<hr/>",
    "<text indent=\"0\">a</text><hr/>"
)]
#[case::empty_block_variants(
    "<text indent=\"0\">a</text><text indent=\"9\">  </text>",
    "<text indent=\"0\">a</text><text indent=\"4\"/>"
)]
fn cosmetic_variants_normalize_equal(#[case] a: &str, #[case] b: &str) {
    assert_eq!(normalize(a), normalize(b));
}

#[rstest]
#[case::text_content(
    r#"<text indent="0">a</text>"#,
    r#"<text indent="0">b</text>"#
)]
#[case::image_identity(
    r#"<img fileid="1"/>"#,
    r#"<img fileid="2"/>"#
)]
#[case::block_count(
    r#"<text indent="0">a</text>"#,
    "<text indent=\"0\">a</text><text indent=\"0\">a</text>"
)]
#[case::imgshow_flag(
    r#"<img fileid="1" imgshow="0"/>"#,
    r#"<img fileid="1" imgshow="1"/>"#
)]
#[case::checked_state(
    r#"<input type="checkbox" checked="true" indent="0">t</input>"#,
    r#"<input type="checkbox" checked="false" indent="0">t</input>"#
)]
#[case::inner_whitespace(
    r#"<text indent="0">a b</text>"#,
    r#"<text indent="0">a  b</text>"#
)]
fn content_differences_stay_visible(#[case] a: &str, #[case] b: &str) {
    assert_ne!(normalize(a), normalize(b));
}

/// The consumer-side gate: a note re-saved without edits compares equal to
/// what the generator now produces for it, across the cosmetic dimensions
/// the normalizer erases.
#[rstest]
#[case::zero_padded_indent("<text indent=\"01\">a</text>")]
#[case::reordered_checkbox("<input checked=\"true\" indent=\"1\" level=\"1\" type=\"checkbox\">t</input>")]
#[case::sized_image(r#"<img fileid="a1" imgshow="1" imgdes="pic" width="500" height="666"/>"#)]
#[case::quote_with_spacing("<quote>\n  <text indent=\"0\">q</text>\n</quote>")]
fn saved_and_regenerated_markup_compare_equal(#[case] saved: &str) {
    let doc = parse(saved).unwrap();
    let fresh = generate(&doc);
    assert_eq!(normalize(saved), normalize(&fresh));
}

#[test]
fn edits_are_detected_through_the_gate() {
    let saved = "<text indent=\"0\">original</text>";
    let mut doc = parse(saved).unwrap();
    let notemark_engine::BlockNode::Text(tb) = &mut doc.blocks[0] else {
        panic!("expected a text block");
    };
    tb.content = vec![notemark_engine::InlineNode::Text("edited".to_string())];
    assert_ne!(normalize(saved), normalize(&generate(&doc)));
}
