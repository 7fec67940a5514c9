use jsondom_core::{Document, Error, Kind};

fn parse(text: &str) -> Document {
    match text.parse::<Document>() {
        Ok(doc) => doc,
        Err(err) => panic!("parse failed for {text:?}: {err}"),
    }
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn read_null() {
    let doc = parse("null");
    assert!(doc.root().is_null());
}

#[test]
fn read_true() {
    let doc = parse("true");
    assert!(doc.root().as_bool().unwrap());
}

#[test]
fn read_false() {
    let doc = parse("false");
    assert!(!doc.root().as_bool().unwrap());
}

#[test]
fn read_integer() {
    let doc = parse("42");
    assert_eq!(doc.root().as_i64().unwrap(), 42);
}

#[test]
fn read_negative_integer() {
    let doc = parse("-7");
    assert_eq!(doc.root().as_i64().unwrap(), -7);
    assert!(doc.root().as_number().unwrap().is_int());
}

#[test]
fn read_float() {
    let doc = parse("3.25");
    assert_eq!(doc.root().as_f64().unwrap(), 3.25);
    assert!(doc.root().as_number().unwrap().is_float());
}

#[test]
fn read_leading_fraction() {
    // ".5" is read as "0.5", float category
    let doc = parse(".5");
    assert!(doc.root().as_number().unwrap().is_float());
    assert_eq!(doc.root().as_f64().unwrap(), 0.5);
}

#[test]
fn read_negative_leading_fraction() {
    let doc = parse("-.5");
    assert_eq!(doc.root().as_f64().unwrap(), -0.5);
}

#[test]
fn read_string() {
    let doc = parse(r#""hello world""#);
    assert_eq!(doc.root().as_str().unwrap(), "hello world");
}

#[test]
fn read_empty_string() {
    let doc = parse(r#""""#);
    assert_eq!(doc.root().as_str().unwrap(), "");
}

#[test]
fn read_string_no_escape_decoding() {
    // Backslash sequences are copied as raw bytes, not interpreted.
    let doc = parse(r#""line1\nline2""#);
    assert_eq!(doc.root().as_str().unwrap(), "line1\\nline2");
}

#[test]
fn read_string_stops_at_first_quote() {
    // A backslash does not protect a quote: the scan stops there and the
    // remainder of the input is simply never consumed.
    let doc = parse(r#""before\""#);
    assert_eq!(doc.root().as_str().unwrap(), "before\\");
}

// ============================================================================
// Number categories
// ============================================================================

#[test]
fn i64_max_parses_signed() {
    let doc = parse("9223372036854775807");
    let n = doc.root().as_number().unwrap();
    assert!(n.is_int());
    assert_eq!(n.as_i64(), i64::MAX);
}

#[test]
fn beyond_i64_max_parses_unsigned() {
    let doc = parse("9223372036854775808");
    let n = doc.root().as_number().unwrap();
    assert!(n.is_uint());
    assert_eq!(n.as_u64(), 9223372036854775808);
}

#[test]
fn largest_19_digit_literal_parses_unsigned() {
    let doc = parse("9999999999999999999");
    assert_eq!(doc.root().as_u64().unwrap(), 9999999999999999999);
}

#[test]
fn twenty_digit_literal_is_a_parse_error() {
    // "18446744073709551615" collates byte-wise below the 19-character
    // threshold string, so category selection sends it down the signed
    // branch, where it overflows. The collation rule caps usable unsigned
    // literals at 19 digits.
    let err = "18446744073709551615".parse::<Document>().unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn whole_float_keeps_float_category() {
    let doc = parse("1.0");
    assert!(doc.root().as_number().unwrap().is_float());
}

#[test]
fn byte_wise_collation_picks_category() {
    // "999" collates greater than "9223372036854775807" byte-wise, so it
    // lands in the unsigned category despite fitting in i64 comfortably.
    let doc = parse("999");
    assert!(doc.root().as_number().unwrap().is_uint());
    // "899" collates less, so it stays signed.
    let doc = parse("899");
    assert!(doc.root().as_number().unwrap().is_int());
}

#[test]
fn every_number_category_parses() {
    // One literal per storage category, exercising each parse branch.
    assert!(parse("1.5").root().as_number().unwrap().is_float());
    assert!(parse("-7").root().as_number().unwrap().is_int());
    assert!(parse("42").root().as_number().unwrap().is_int());
    assert!(parse("9300000000000000000").root().as_number().unwrap().is_uint());
}

#[test]
fn bare_minus_is_a_parse_error() {
    let err = "-".parse::<Document>().unwrap_err();
    match err {
        Error::Parse { message, .. } => {
            assert!(message.contains("invalid number literal"), "got {message}");
        }
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn number_casts_narrow_without_checks() {
    let doc = parse("3.75");
    assert_eq!(doc.root().as_i64().unwrap(), 3);
    let doc = parse("-1");
    assert_eq!(doc.root().as_u64().unwrap(), u64::MAX);
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn read_empty_array() {
    let doc = parse("[]");
    assert_eq!(doc.root().len().unwrap(), 0);
}

#[test]
fn read_flat_array() {
    let doc = parse(r#"[null,"hi",1,1.5,true,false]"#);
    let root = doc.root();
    assert_eq!(root.len().unwrap(), 6);
    assert!(root.at(0).unwrap().is_null());
    assert_eq!(root.at(1).unwrap().as_str().unwrap(), "hi");
    assert_eq!(root.at(2).unwrap().as_i64().unwrap(), 1);
    assert_eq!(root.at(3).unwrap().as_f64().unwrap(), 1.5);
    assert!(root.at(4).unwrap().as_bool().unwrap());
    assert!(!root.at(5).unwrap().as_bool().unwrap());
}

#[test]
fn read_array_with_whitespace() {
    let doc = parse("  [ 1 ,\n\t2 , 3 ]  ");
    let items: Vec<i64> = doc
        .root()
        .elements()
        .unwrap()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(items, vec![1, 2, 3]);
}

#[test]
fn vertical_tab_counts_as_whitespace() {
    let doc = parse("\x0B[ 1 ,\x0B\t2 ]\x0B");
    assert_eq!(doc.root().len().unwrap(), 2);
    assert_eq!(doc.root().at(1).unwrap().as_i64().unwrap(), 2);
}

#[test]
fn read_nested_arrays() {
    let doc = parse("[[1,2],[3]]");
    assert_eq!(doc.root().at(0).unwrap().len().unwrap(), 2);
    assert_eq!(doc.root().at(1).unwrap().at(0).unwrap().as_i64().unwrap(), 3);
}

#[test]
fn separating_commas_are_optional() {
    // The closing bracket terminates the loop; commas are consumed when
    // present but never required.
    let doc = parse("[1 2 3]");
    assert_eq!(doc.root().len().unwrap(), 3);
}

#[test]
fn trailing_comma_is_accepted() {
    let doc = parse("[1,2,]");
    assert_eq!(doc.root().len().unwrap(), 2);
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn read_empty_object() {
    let doc = parse("{}");
    assert_eq!(doc.root().len().unwrap(), 0);
}

#[test]
fn read_flat_object() {
    let doc = parse(r#"{"a":1,"b":2}"#);
    assert_eq!(doc.root().key("a").unwrap().as_i64().unwrap(), 1);
    assert_eq!(doc.root().key("b").unwrap().as_i64().unwrap(), 2);
}

#[test]
fn read_nested_object() {
    let doc = parse(r#"{ "outer" : { "inner" : [ true ] } }"#);
    let inner = doc.root().key("outer").unwrap().key("inner").unwrap();
    assert!(inner.at(0).unwrap().as_bool().unwrap());
}

#[test]
fn insertion_order_is_preserved() {
    let doc = parse(r#"{"z":1,"a":2,"m":3}"#);
    let keys: Vec<&str> = doc.root().entries().unwrap().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn duplicate_keys_append_and_lookup_finds_first() {
    let doc = parse(r#"{"k":1,"k":2}"#);
    assert_eq!(doc.root().len().unwrap(), 2);
    assert_eq!(doc.root().key("k").unwrap().as_i64().unwrap(), 1);
}

#[test]
fn missing_key_on_shared_cursor_is_an_error() {
    let doc = parse(r#"{"a":1}"#);
    assert!(matches!(doc.root().key("b"), Err(Error::MissingKey(_))));
    assert!(doc.root().get("b").is_none());
}

// ============================================================================
// Parse failures
// ============================================================================

#[test]
fn unterminated_array_fails_and_leaves_document_empty() {
    let mut doc = parse(r#"{"keep":1}"#);
    let err = doc.read_from(&mut jsondom_core::SliceSource::from("[1,2")).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }), "got {err}");
    // Prior contents are gone, nothing half-populated remains, and every
    // node allocated during the failed attempt was released.
    assert!(doc.root().is_empty());
    assert_eq!(doc.live_nodes(), 0);
}

#[test]
fn unterminated_object_fails_clean() {
    let err = r#"{"a": {"b": [1,2]"#.parse::<Document>().unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn missing_colon_is_a_parse_error() {
    let err = r#"{"a" 1}"#.parse::<Document>().unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn unquoted_key_is_a_parse_error() {
    let err = "{a:1}".parse::<Document>().unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn unknown_leading_character_is_a_parse_error() {
    let err = "xyz".parse::<Document>().unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn misspelled_literal_is_a_parse_error() {
    let err = "nul".parse::<Document>().unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    let err = "ture".parse::<Document>().unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn empty_input_is_a_parse_error() {
    let err = "".parse::<Document>().unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    let err = "   ".parse::<Document>().unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn trailing_input_after_root_value_is_ignored() {
    let doc = parse("7 junk");
    assert_eq!(doc.root().as_i64().unwrap(), 7);
}

// ============================================================================
// Sources
// ============================================================================

#[test]
fn read_from_io_reader() {
    let bytes: &[u8] = br#"{"stream":[1,2,3]}"#;
    let doc = Document::from_reader(bytes).unwrap();
    assert_eq!(doc.root().key("stream").unwrap().len().unwrap(), 3);
}

#[test]
fn array_access_on_a_scalar_is_a_type_mismatch() {
    let doc = parse("5");
    assert!(matches!(
        doc.root().elements(),
        Err(Error::TypeMismatch { expected: Kind::Array, found: Kind::Number })
    ));
    assert!(matches!(doc.root().len(), Err(Error::TypeMismatch { .. })));
}

#[test]
fn type_mismatch_reports_both_kinds() {
    let doc = parse("5");
    match doc.root().as_str() {
        Err(Error::TypeMismatch { expected, found }) => {
            assert_eq!(expected, Kind::String);
            assert_eq!(found, Kind::Number);
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
}
