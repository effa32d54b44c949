#![no_main]
use std::sync::LazyLock;

use arbitrary::Arbitrary;
use jpcode::{
    ConvertError, ConvertOptions, Converter, Encoding, LookupTables, TableBuilder, detect,
    detect_candidates, fuzzing,
};
use libfuzzer_sys::fuzz_target;

static TABLES: LazyLock<LookupTables<'static>> = LazyLock::new(|| TableBuilder::shift_jis().build());

const CONVERTIBLE: [Encoding; 9] = [
    Encoding::Ascii,
    Encoding::Sjis,
    Encoding::EucJp,
    Encoding::Jis,
    Encoding::Utf8,
    Encoding::SjisJsky,
    Encoding::SjisImode,
    Encoding::SjisDoti,
    Encoding::Ucs2,
];

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    from: u8,
    to: u8,
    pack_jsky_escapes: bool,
    numeric_references: bool,
    data: &'a [u8],
}

fn convert(input: &Input<'_>) {
    let from = CONVERTIBLE[usize::from(input.from) % CONVERTIBLE.len()];
    let to = CONVERTIBLE[usize::from(input.to) % CONVERTIBLE.len()];
    let converter = Converter::new(
        &TABLES,
        ConvertOptions {
            pack_jsky_escapes: input.pack_jsky_escapes,
            numeric_references: input.numeric_references,
        },
    );

    let candidates = detect_candidates(input.data);
    assert_eq!(
        detect(input.data),
        candidates.first().copied().unwrap_or(Encoding::Unknown)
    );

    match converter.convert(input.data, from, to) {
        Ok(out) => {
            if from == to {
                assert_eq!(out, input.data);
            }
        }
        Err(ConvertError::Codec(_)) => assert!(from == Encoding::Ucs2 && input.data.len() % 2 == 1),
        Err(err) => panic!("{from} -> {to}: {err}"),
    }
    let _ = converter.convert_auto(input.data, to);

    let packed = fuzzing::pack_jsky_escapes(input.data);
    assert!(packed.len() <= input.data.len());
    if let Some((value, len)) = fuzzing::parse_numeric_reference(input.data) {
        assert!(len <= input.data.len() && value <= 9_999_999);
    }
}

fuzz_target!(|input: Input<'_>| convert(&input));
