use dictxml::{
    to_xml_bytes, to_xml_string, to_xml_string_with_options, BuildConfig, EmitConfig, ErrorKind,
    NamespaceStyle, Options, Value,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn xml(input: &str) -> Result<String, Box<dyn std::error::Error>> {
    let value: Value = serde_json::from_str(input)?;
    Ok(to_xml_string(&value, None)?)
}

#[test]
fn default_and_custom_root() -> TestResult {
    assert_eq!(xml("{}")?, "<root/>");
    let value: Value = serde_json::from_str("{}")?;
    assert_eq!(to_xml_string(&value, Some("custom"))?, "<custom/>");
    Ok(())
}

#[test]
fn keys_become_sub_elements() -> TestResult {
    assert_eq!(
        xml(r#"{"alpha": "a", "bravo": "b"}"#)?,
        "<root><alpha>a</alpha><bravo>b</bravo></root>"
    );
    assert_eq!(xml(r#"{"alpha": {}}"#)?, "<root><alpha/></root>");
    Ok(())
}

#[test]
fn scalar_types() -> TestResult {
    assert_eq!(xml(r#"{"alpha": null}"#)?, "<root><alpha/></root>");
    assert_eq!(xml(r#"{"alpha": 0}"#)?, "<root><alpha>0</alpha></root>");
    assert_eq!(xml(r#"{"alpha": 1.1}"#)?, "<root><alpha>1.1</alpha></root>");
    assert_eq!(
        xml(r#"{"alpha": true, "bravo": false}"#)?,
        "<root><alpha>true</alpha><bravo>false</bravo></root>"
    );
    Ok(())
}

#[test]
fn lists() -> TestResult {
    assert_eq!(xml(r#"{"myList": []}"#)?, "<root/>");
    assert_eq!(
        xml(r#"{"myList": ["foo", 0, 1.1, true, false, null]}"#)?,
        "<root><myList>foo</myList><myList>0</myList><myList>1.1</myList>\
         <myList>true</myList><myList>false</myList><myList/></root>"
    );
    assert_eq!(
        xml(r#"{"myList": [{"alpha": 0, "bravo": 1}, {"alpha": 2, "bravo": 3}]}"#)?,
        "<root><myList><alpha>0</alpha><bravo>1</bravo></myList>\
         <myList><alpha>2</alpha><bravo>3</bravo></myList></root>"
    );
    Ok(())
}

#[test]
fn attributes() -> TestResult {
    assert_eq!(
        xml(r#"{"@alpha": "a", "@bravo": "b"}"#)?,
        r#"<root alpha="a" bravo="b"/>"#
    );
    assert_eq!(
        xml(r#"{"child": {"@alpha": "a", "@bravo": "b"}}"#)?,
        r#"<root><child alpha="a" bravo="b"/></root>"#
    );
    Ok(())
}

#[test]
fn namespaces() -> TestResult {
    assert_eq!(
        xml(r##"{"#ns": "fake:ns"}"##)?,
        r#"<ns0:root xmlns:ns0="fake:ns"/>"#
    );
    assert_eq!(
        xml(r##"{"child": {"#ns": "fake:ns"}}"##)?,
        r#"<root><ns0:child xmlns:ns0="fake:ns"/></root>"#
    );
    assert_eq!(
        xml(r##"{"#ns": "fake:ns", "child": null}"##)?,
        r#"<ns0:root xmlns:ns0="fake:ns"><ns0:child/></ns0:root>"#
    );
    assert_eq!(
        xml(r##"{"#ns": "fake:ns", "child": {"#ns": null}}"##)?,
        r#"<ns0:root xmlns:ns0="fake:ns"><child/></ns0:root>"#
    );
    assert_eq!(
        xml(r##"{"myList": [{"#ns": "first:ns"}, {"#ns": "second:ns"}]}"##)?,
        r#"<root><ns0:myList xmlns:ns0="first:ns"/><ns0:myList xmlns:ns0="second:ns"/></root>"#
    );
    Ok(())
}

#[test]
fn namespaces_as_default_declarations() -> TestResult {
    let value: Value =
        serde_json::from_str(r##"{"#ns": "fake:ns", "child": {"#ns": null}, "other": 1}"##)?;
    let options = Options {
        build: BuildConfig::default(),
        emit: EmitConfig::default().with_namespace_style(NamespaceStyle::DefaultNamespace),
    };
    assert_eq!(
        to_xml_string_with_options(&value, &options)?,
        r#"<root xmlns="fake:ns"><child xmlns=""/><other>1</other></root>"#
    );
    Ok(())
}

#[test]
fn text() -> TestResult {
    assert_eq!(xml(r##"{"#text": "foo"}"##)?, "<root>foo</root>");
    assert_eq!(
        xml(r##"{"child": {"#text": "foo"}}"##)?,
        "<root><child>foo</child></root>"
    );
    assert_eq!(xml(r##"{"#text": 0}"##)?, "<root>0</root>");
    assert_eq!(xml(r##"{"#text": 1.1}"##)?, "<root>1.1</root>");
    assert_eq!(
        xml(r##"{"child": [{"#text": true}, {"#text": false}]}"##)?,
        "<root><child>true</child><child>false</child></root>"
    );
    assert_eq!(xml(r##"{"#text": null}"##)?, "<root/>");
    assert_eq!(
        xml(r##"{"alpha": null, "#text": "foo", "bravo": null}"##)?,
        "<root>foo<alpha/><bravo/></root>"
    );
    Ok(())
}

#[test]
fn special_characters_are_escaped() -> TestResult {
    assert_eq!(
        xml(r##"{"@q": "a\"b", "#text": "1 < 2 & 3"}"##)?,
        r#"<root q="a&quot;b">1 &lt; 2 &amp; 3</root>"#
    );
    Ok(())
}

#[test]
fn bytes_match_string() -> TestResult {
    let value: Value = serde_json::from_str(r#"{"a": "é"}"#)?;
    assert_eq!(
        to_xml_bytes(&value, None)?,
        to_xml_string(&value, None)?.into_bytes()
    );
    Ok(())
}

#[test]
fn invalid_element_name_is_reported() -> TestResult {
    let value: Value = serde_json::from_str(r#"{"ok": {"not ok": 1}}"#)?;
    let err = to_xml_string(&value, None)
        .err()
        .ok_or("expected an error")?;
    assert!(matches!(err.kind(), ErrorKind::InvalidName { name } if name == "not ok"));
    assert_eq!(err.path(), "/root/ok/not ok");
    Ok(())
}

#[test]
fn empty_attribute_name_is_reported() -> TestResult {
    let value: Value = serde_json::from_str(r#"{"@": "x"}"#)?;
    let err = to_xml_string(&value, None)
        .err()
        .ok_or("expected an error")?;
    assert!(matches!(err.kind(), ErrorKind::InvalidName { name } if name.is_empty()));
    Ok(())
}
