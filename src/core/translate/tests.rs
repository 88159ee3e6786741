use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use pretty_assertions::assert_eq;

use crate::core::{
    error::{I18nError, Result},
    options::Options,
    stream::{AttrValue, Event, QName},
    translate::{Gettext, Translations, Translator, expand},
};

fn stream(json: &str) -> Vec<Event> {
    serde_json::from_str(json).unwrap()
}

fn translate_all(translator: &Translator, json: &str) -> Result<Vec<Event>> {
    translator.translate(stream(json)).collect()
}

fn texts(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Records every lookup and answers in upper case.
fn recording() -> (Gettext, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let gettext = Gettext::function(move |m| {
        log.lock().unwrap().push(m.to_string());
        m.to_uppercase()
    });
    (gettext, seen)
}

struct StaticCatalog {
    messages: HashMap<&'static str, &'static str>,
    admin: HashMap<&'static str, &'static str>,
}

impl Translations for StaticCatalog {
    fn gettext(&self, message: &str) -> String {
        self.messages.get(message).unwrap_or(&message).to_string()
    }

    fn dgettext(&self, domain: &str, message: &str) -> String {
        match domain {
            "admin" => self.admin.get(message).unwrap_or(&message).to_string(),
            _ => self.gettext(message),
        }
    }
}

#[test]
fn test_text_keeps_surrounding_whitespace() {
    let (gettext, _) = recording();
    let events = translate_all(
        &Translator::new(gettext),
        r#"[
            {"kind": "start", "tag": "h1", "pos": {"line": 1}},
            {"kind": "text", "text": "\n  Example\n", "pos": {"line": 1}},
            {"kind": "text", "text": "   ", "pos": {"line": 1}},
            {"kind": "end", "tag": "h1", "pos": {"line": 1}}
        ]"#,
    )
    .unwrap();

    assert_eq!(texts(&events), vec!["\n  EXAMPLE\n", "   "]);
}

#[test]
fn test_skip_scopes_never_reach_the_translation_function() {
    let (gettext, seen) = recording();
    let events = translate_all(
        &Translator::new(gettext),
        r#"[
            {"kind": "start", "tag": "script", "pos": {"line": 1}},
            {"kind": "text", "text": "var greeting = 'hi';", "pos": {"line": 1}},
            {"kind": "end", "tag": "script", "pos": {"line": 1}},
            {"kind": "start", "tag": "{http://www.w3.org/1999/xhtml}style", "pos": {"line": 2}},
            {"kind": "text", "text": "body { color: red }", "pos": {"line": 2}},
            {"kind": "end", "tag": "{http://www.w3.org/1999/xhtml}style", "pos": {"line": 2}},
            {"kind": "start", "tag": "div",
             "attrs": [["{http://www.w3.org/XML/1998/namespace}lang", "de"], ["title", "Titel"]],
             "pos": {"line": 3}},
            {"kind": "start", "tag": "p", "attrs": [["title", "Innen"]], "pos": {"line": 3}},
            {"kind": "text", "text": "Deutsch", "pos": {"line": 3}},
            {"kind": "end", "tag": "p", "pos": {"line": 3}},
            {"kind": "end", "tag": "div", "pos": {"line": 3}},
            {"kind": "text", "text": "English", "pos": {"line": 4}}
        ]"#,
    )
    .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["English"]);
    assert_eq!(
        texts(&events),
        vec!["var greeting = 'hi';", "body { color: red }", "Deutsch", "ENGLISH"]
    );
}

#[test]
fn test_expression_valued_xml_lang_does_not_skip() {
    let (gettext, seen) = recording();
    translate_all(
        &Translator::new(gettext),
        r#"[
            {"kind": "start", "tag": "p",
             "attrs": [["{http://www.w3.org/XML/1998/namespace}lang",
                        [{"kind": "expr", "code": "locale"}]]],
             "pos": {"line": 1}},
            {"kind": "text", "text": "Hello", "pos": {"line": 1}},
            {"kind": "end", "tag": "p", "pos": {"line": 1}}
        ]"#,
    )
    .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["Hello"]);
}

#[test]
fn test_attribute_selectivity() {
    let (gettext, seen) = recording();
    let events = translate_all(
        &Translator::new(gettext),
        r#"[
            {"kind": "start", "tag": "img",
             "attrs": [["src", "logo.png"], ["alt", "Logo"], ["data-note", "Keep me"]],
             "pos": {"line": 1}},
            {"kind": "end", "tag": "img", "pos": {"line": 1}}
        ]"#,
    )
    .unwrap();

    let Event::Start { attrs, .. } = &events[0] else {
        panic!("expected start event");
    };
    assert_eq!(attrs.get_text(&QName::new("alt")), Some("LOGO"));
    assert_eq!(attrs.get_text(&QName::new("src")), Some("logo.png"));
    assert_eq!(attrs.get_text(&QName::new("data-note")), Some("Keep me"));
    assert_eq!(*seen.lock().unwrap(), vec!["Logo"]);
}

#[test]
fn test_attribute_expression_text_is_not_translated() {
    let (gettext, seen) = recording();
    let events = translate_all(
        &Translator::new(gettext),
        r#"[
            {"kind": "start", "tag": "a",
             "attrs": [["title", [{"kind": "text", "text": "Profile of "},
                                  {"kind": "expr", "code": "user"}]]],
             "pos": {"line": 1}}
        ]"#,
    )
    .unwrap();

    assert!(seen.lock().unwrap().is_empty());
    let Event::Start { attrs, .. } = &events[0] else {
        panic!("expected start event");
    };
    assert!(matches!(
        attrs.get(&QName::new("title")),
        Some(AttrValue::Stream(events)) if texts(events) == vec!["Profile of "]
    ));
}

#[test]
fn test_extract_text_disabled() {
    let (gettext, seen) = recording();
    let translator = Translator::new(gettext).with_options(Options {
        extract_text: false,
        ..Options::default()
    });
    translate_all(
        &translator,
        r#"[
            {"kind": "start", "tag": "p", "attrs": [["title", "Tip"]], "pos": {"line": 1}},
            {"kind": "text", "text": "Body", "pos": {"line": 1}},
            {"kind": "end", "tag": "p", "pos": {"line": 1}}
        ]"#,
    )
    .unwrap();

    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_msg_region_text_is_left_for_expansion() {
    let (gettext, seen) = recording();
    let events = translate_all(
        &Translator::new(gettext),
        r#"[
            {"kind": "sub", "pos": {"line": 1},
             "directives": [{"name": "i18n:msg", "value": ""}],
             "stream": [
                {"kind": "start", "tag": "p", "pos": {"line": 1}},
                {"kind": "text", "text": "Whole message", "pos": {"line": 1}},
                {"kind": "sub", "pos": {"line": 1},
                 "directives": [{"name": "py:if", "value": "x"}],
                 "stream": [{"kind": "text", "text": "nested", "pos": {"line": 1}}]},
                {"kind": "end", "tag": "p", "pos": {"line": 1}}
             ]}
        ]"#,
    )
    .unwrap();

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(events.len(), 1);
}

#[test]
fn test_domain_routing() {
    let gettext = Gettext::translations(StaticCatalog {
        messages: HashMap::from([("Users", "Benutzer")]),
        admin: HashMap::from([("Users", "Konten")]),
    });
    let events = translate_all(
        &Translator::new(gettext),
        r#"[
            {"kind": "text", "text": "Users", "pos": {"line": 1}},
            {"kind": "sub", "pos": {"line": 2},
             "directives": [{"name": "i18n:domain", "value": "admin"}],
             "stream": [{"kind": "text", "text": "Users", "pos": {"line": 2}}]},
            {"kind": "text", "text": "Users", "pos": {"line": 3}}
        ]"#,
    )
    .unwrap();

    assert_eq!(texts(&events), vec!["Benutzer", "Benutzer"]);
    let Event::Sub { stream, .. } = &events[1] else {
        panic!("expected sub event");
    };
    assert_eq!(texts(stream), vec!["Konten"]);
}

#[test]
fn test_domain_with_plain_function_fails() {
    let translator = Translator::new(Gettext::function(str::to_string));
    let mut events = translator.translate(stream(
        r#"[
            {"kind": "sub", "pos": {"line": 2},
             "directives": [{"name": "i18n:domain", "value": "admin"}],
             "stream": [{"kind": "text", "text": "Users", "pos": {"line": 2}}]},
            {"kind": "text", "text": "After", "pos": {"line": 3}}
        ]"#,
    ));

    assert_eq!(
        events.next(),
        Some(Err(I18nError::DomainUnsupported {
            domain: "admin".to_string()
        }))
    );
    assert_eq!(events.next(), None);
}

#[test]
fn test_translate_then_expand() {
    let gettext = Gettext::function(|m| match m {
        "Welcome" => "Willkommen".to_string(),
        "Read the [1:FAQ] first." => "Lies zuerst die [1:FAQ].".to_string(),
        other => other.to_string(),
    });
    let translator = Translator::new(gettext);
    let translated: Vec<Event> = translator
        .translate(stream(
            r#"[
                {"kind": "start", "tag": "h1", "pos": {"line": 1}},
                {"kind": "text", "text": "Welcome", "pos": {"line": 1}},
                {"kind": "end", "tag": "h1", "pos": {"line": 1}},
                {"kind": "sub", "pos": {"line": 2},
                 "directives": [{"name": "i18n:msg", "value": ""}],
                 "stream": [
                    {"kind": "start", "tag": "p", "pos": {"line": 2}},
                    {"kind": "text", "text": "Read the ", "pos": {"line": 2}},
                    {"kind": "start", "tag": "a", "attrs": [["href", "/faq"]], "pos": {"line": 2}},
                    {"kind": "text", "text": "FAQ", "pos": {"line": 2}},
                    {"kind": "end", "tag": "a", "pos": {"line": 2}},
                    {"kind": "text", "text": " first.", "pos": {"line": 2}},
                    {"kind": "end", "tag": "p", "pos": {"line": 2}}
                 ]}
            ]"#,
        ))
        .collect::<Result<_>>()
        .unwrap();

    let expanded: Vec<Event> = expand(translator.gettext(), translated)
        .collect::<Result<_>>()
        .unwrap();

    assert_eq!(
        texts(&expanded),
        vec!["Willkommen", "Lies zuerst die ", "FAQ", "."]
    );
    assert!(matches!(
        &expanded[5],
        Event::Start { attrs, .. } if attrs.get_text(&QName::new("href")) == Some("/faq")
    ));
}
