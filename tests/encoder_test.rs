//! Property tests for literal encoding

mod common;

use common::{decode_decimal_array, decode_hex_literal, declared_size};
use inch_rs::{
    ByteBuffer, DotProgress, Encoding, HexStyle, LiteralEncoder, ProgressCadence,
};
use proptest::prelude::*;

fn encode(encoder: LiteralEncoder, bytes: &[u8]) -> String {
    let out = encoder.encode_to_buffer("res", bytes);
    String::from_utf8(out.into_bytes()).unwrap()
}

proptest! {
    #[test]
    fn prop_hex_literal_decodes_to_input(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let text = encode(LiteralEncoder::new(Encoding::HexString), &bytes);

        prop_assert_eq!(decode_hex_literal(&text), bytes.clone());
        prop_assert_eq!(declared_size(&text), bytes.len() as u64);
    }

    #[test]
    fn prop_padded_hex_has_fixed_width(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let text = encode(
            LiteralEncoder::new(Encoding::HexString).hex_style(HexStyle::Padded),
            &bytes,
        );

        prop_assert_eq!(decode_hex_literal(&text), bytes.clone());
        let start = text.find("[]=\"").unwrap() + 4;
        let end = start + text[start..].find('"').unwrap();
        prop_assert_eq!(end - start, bytes.len() * 4);
    }

    #[test]
    fn prop_decimal_array_decodes_to_input(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let text = encode(LiteralEncoder::new(Encoding::DecimalArray), &bytes);

        prop_assert!(text.starts_with("char res[]={"), "output missing array prefix");
        prop_assert!(text.ends_with("};\n"), "output missing array suffix");
        prop_assert_eq!(decode_decimal_array(&text), bytes);
    }

    #[test]
    fn prop_output_is_ascii(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        for encoding in [Encoding::HexString, Encoding::DecimalArray] {
            let out = LiteralEncoder::new(encoding).encode_to_buffer("res", &bytes);
            prop_assert!(out.as_bytes().is_ascii());
        }
    }

    #[test]
    fn prop_progress_never_changes_output(
        bytes in prop::collection::vec(any::<u8>(), 0..1024),
        every in 1u64..64,
    ) {
        let encoder = LiteralEncoder::new(Encoding::HexString)
            .cadence(ProgressCadence::EveryBytes(every));

        let quiet = encoder.encode_to_buffer("res", &bytes);

        let mut loud = ByteBuffer::new();
        let mut dots = DotProgress::new(Vec::new());
        encoder.encode("res", &bytes, &mut loud, &mut dots);

        prop_assert_eq!(quiet, loud);
        // One dot per report plus the closing newline
        prop_assert_eq!(dots.into_inner().len() as u64, bytes.len() as u64 / every + 1);
    }
}

#[test]
fn test_sample_literals() {
    let hex = encode(LiteralEncoder::new(Encoding::HexString), b"Hi");
    assert!(hex.contains(r#"inch_data[]="\x48\x69";static uint64_t inch_size=2;"#));

    let dec = encode(LiteralEncoder::new(Encoding::DecimalArray), b"Hi");
    assert_eq!(dec, "char res[]={72,105};\n");
}

#[test]
fn test_unpadded_escape_is_unambiguous() {
    // 0x0 followed by 'A' must not read back as 0x0A
    let text = encode(LiteralEncoder::new(Encoding::HexString), &[0x00, b'A']);
    assert!(text.contains(r#"[]="\x0\x41";"#));
    assert_eq!(decode_hex_literal(&text), vec![0x00, b'A']);
}
