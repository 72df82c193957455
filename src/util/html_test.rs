use super::*;

#[test]
fn escape_html_replaces_markup_characters() {
    assert_eq!(escape_html("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
    assert_eq!(escape_html(r#"a & "b" 'c'"#), "a &amp; &quot;b&quot; &#039;c&#039;");
}

#[test]
fn escape_html_escapes_ampersand_once() {
    assert_eq!(escape_html("&lt;"), "&amp;lt;");
}

#[test]
fn escape_html_leaves_plain_text_and_emoji() {
    assert_eq!(escape_html("hello 👋"), "hello 👋");
    assert_eq!(escape_html(""), "");
}
