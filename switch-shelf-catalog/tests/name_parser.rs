use switch_shelf_catalog::name_parser::{FilenameError, FilenameParser, display_title};
use switch_shelf_core::{ContentType, TitleId};

#[test]
fn title_id_and_version() {
    let parser = FilenameParser::new();
    let p = parser.parse("Some Game [0100ABCDEF123456][v65536].nsp").unwrap();
    assert_eq!(p.title_id.as_str(), "0100abcdef123456");
    assert_eq!(p.version, 65536);
}

#[test]
fn version_without_v_prefix() {
    let parser = FilenameParser::new();
    assert_eq!(parser.parse_version("Game [0100abcdef123000][0].nsp"), Ok(0));
    assert_eq!(parser.parse_version("Game [V131072].nsp"), Ok(131072));
}

#[test]
fn ten_digit_version_is_accepted() {
    let parser = FilenameParser::new();
    assert_eq!(parser.parse_version("Game [v4294967295].nsp"), Ok(4294967295));
    assert_eq!(parser.parse_version("Game [v9999999999].nsp"), Ok(9999999999));
}

#[test]
fn eleven_digit_version_is_rejected() {
    let parser = FilenameParser::new();
    assert_eq!(
        parser.parse_version("Game [v12345678901].nsp"),
        Err(FilenameError::NoVersionFound)
    );
}

#[test]
fn title_id_tag_is_not_a_version() {
    let parser = FilenameParser::new();
    assert_eq!(
        parser.parse_version("Game [0100000000001000].nsp"),
        Err(FilenameError::NoVersionFound)
    );
}

#[test]
fn missing_title_id() {
    let parser = FilenameParser::new();
    assert_eq!(
        parser.parse("Some Game [v65536].nsp"),
        Err(FilenameError::NoTitleIdFound)
    );
}

#[test]
fn missing_version() {
    let parser = FilenameParser::new();
    assert_eq!(
        parser.parse("Some Game [0100ABCDEF123456].nsp"),
        Err(FilenameError::NoVersionFound)
    );
}

#[test]
fn unbracketed_tokens_are_ignored() {
    let parser = FilenameParser::new();
    assert!(parser.parse("Some Game 0100ABCDEF123456 v65536.nsp").is_err());
}

#[test]
fn tags_in_any_order() {
    let parser = FilenameParser::new();
    let p = parser.parse("Game [v3][US][0100abcdef124001].nsp").unwrap();
    assert_eq!(p.title_id.as_str(), "0100abcdef124001");
    assert_eq!(p.version, 3);
}

#[test]
fn contents_carry_suffix_derived_type() {
    let parser = FilenameParser::new();
    let contents = parser
        .parse_contents("Game Update [0100ABCDEF123800][v196608].nsp")
        .unwrap();
    let id = TitleId::parse("0100abcdef123800").unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[&id].content_type, ContentType::Update);
    assert_eq!(contents[&id].version, 196608);
}

#[test]
fn display_title_before_first_bracket() {
    assert_eq!(
        display_title("Some Game [0100ABCDEF123456][v65536].nsp"),
        "Some Game"
    );
    assert_eq!(display_title("NoTags.nsp"), "NoTags.nsp");
    assert_eq!(display_title("[0100ABCDEF123456].nsp"), "");
}
