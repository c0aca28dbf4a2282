use super::*;

#[test]
fn parse_normalizes_to_lowercase() {
    let id = TitleId::parse("0100ABCDEF123000").unwrap();
    assert_eq!(id.as_str(), "0100abcdef123000");
    assert_eq!(id.to_string(), "0100abcdef123000");
}

#[test]
fn parse_rejects_wrong_length() {
    let err = TitleId::parse("0100abcdef12300").unwrap_err();
    assert_eq!(
        err,
        TitleIdError::WrongLength {
            expected: 16,
            actual: 15,
            value: "0100abcdef12300".to_string(),
        }
    );
}

#[test]
fn parse_rejects_punctuation() {
    assert!(matches!(
        TitleId::parse("0100abcdef12,000"),
        Err(TitleIdError::InvalidCharacter(_))
    ));
}

#[test]
fn prefix_strips_role_suffix() {
    let base = TitleId::parse("01000320000cc000").unwrap();
    let update = TitleId::parse("01000320000cc800").unwrap();
    let dlc = TitleId::parse("01000320000cd001").unwrap();
    assert_eq!(base.prefix(), "01000320000c");
    assert_eq!(base.prefix(), update.prefix());
    assert_eq!(base.prefix(), dlc.prefix());
    assert_eq!(dlc.suffix(), "d001");
}

#[test]
fn content_type_from_suffix() {
    assert_eq!(ContentType::from_title_id("0100abcdef123000"), ContentType::Base);
    assert_eq!(ContentType::from_title_id("0100abcdef123800"), ContentType::Update);
    assert_eq!(ContentType::from_title_id("0100abcdef124001"), ContentType::Dlc);
    // only the trailing digits matter
    assert_eq!(ContentType::from_title_id("0100abcdef800000"), ContentType::Base);
}

#[test]
fn attributes_carry_derived_type() {
    let attrs = ContentAttributes::new(TitleId::parse("0100abcdef123800").unwrap(), 65536);
    assert_eq!(attrs.content_type, ContentType::Update);
    assert_eq!(attrs.version, 65536);
    assert!(attrs.name.is_none());
}

#[test]
fn single_content_keys_by_title_id() {
    let id = TitleId::parse("0100abcdef124001").unwrap();
    let map = single_content(ContentAttributes::new(id.clone(), 3).with_name("Extra Pack"));
    assert_eq!(map.len(), 1);
    assert_eq!(map[&id].name.as_deref(), Some("Extra Pack"));
}

#[test]
fn content_map_serializes_with_string_keys() {
    let id = TitleId::parse("0100abcdef123000").unwrap();
    let map = single_content(ContentAttributes::new(id.clone(), 0));
    let json = serde_json::to_string(&map).unwrap();
    assert!(json.contains("\"0100abcdef123000\""));
    let back: ContentMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
}

#[test]
fn deserialize_rejects_invalid_title_id() {
    let json = r#"{"title_id":"nope","version":1,"content_type":"base"}"#;
    assert!(serde_json::from_str::<ContentAttributes>(json).is_err());
}
