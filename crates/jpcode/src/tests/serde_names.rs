use crate::{ConvertOptions, Encoding};

#[test]
fn encodings_serialize_as_their_names() {
    for encoding in [
        Encoding::Unknown,
        Encoding::EucJp,
        Encoding::Utf32Le,
        Encoding::SjisImode,
        Encoding::Ucs2,
    ] {
        let json = serde_json::to_string(&encoding).unwrap();
        assert_eq!(json, alloc::format!("\"{encoding}\""));
        assert_eq!(serde_json::from_str::<Encoding>(&json).unwrap(), encoding);
    }
}

#[test]
fn options_fill_in_defaults() {
    let options: ConvertOptions =
        serde_json::from_str(r#"{"numeric_references":false}"#).unwrap();
    assert_eq!(
        options,
        ConvertOptions {
            numeric_references: false,
            ..ConvertOptions::default()
        }
    );
    assert_eq!(
        serde_json::to_string(&ConvertOptions::default()).unwrap(),
        r#"{"pack_jsky_escapes":true,"numeric_references":true}"#
    );
}
