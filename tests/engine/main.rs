//! End-to-end behaviour of the translation engine, driven the way an editor
//! host drives it.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use i18n_lens::core::parsers::{json::flatten, xliff::parse_trans_units};
use i18n_lens::core::validation::validate;
use i18n_lens::core::{
    DiagnosticSeverity, Position, Project, PublishDiagnostics, Range, TextDocument,
    TranslationFile, TranslationProvider, TranslationUnit,
};

const FR: &str = r#"<trans-unit id="greeting"><source>Hello</source><target>Bonjour</target></trans-unit>"#;
const DE: &str = r#"<trans-unit id="greeting"><source>Hello</source><target>Hallo</target></trans-unit>"#;
const MARKUP: &str = r#"<p i18n="@@greeting">Hello</p>"#;

fn xliff(uri: &str, text: &str) -> TextDocument {
    TextDocument::new(uri, "xml", text)
}

fn markup(uri: &str, text: &str) -> TextDocument {
    TextDocument::new(uri, "html", text)
}

fn fr_and_de() -> Vec<Project> {
    vec![
        Project::new("fr", "/ws/src", Vec::new(), "messages.fr.xlf"),
        Project::new("de", "/ws/src", Vec::new(), "messages.de.xlf"),
    ]
}

fn diagnostics_for<'a>(published: &'a [PublishDiagnostics], uri: &str) -> Option<&'a PublishDiagnostics> {
    published.iter().find(|set| set.uri == uri)
}

#[test]
fn test_trans_unit_id_quote_styles() {
    let units = parse_trans_units(
        r#"<trans-unit id="double"><target>a</target></trans-unit>
<trans-unit id='single'><target>b</target></trans-unit>"#,
    );

    let ids: Vec<&str> = units.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["double", "single"]);
}

#[test]
fn test_trans_unit_without_id_is_skipped() {
    let units = parse_trans_units(
        r#"<trans-unit datatype="html"><target>a</target></trans-unit>
<trans-unit id="kept"><target>b</target></trans-unit>"#,
    );

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].id, "kept");
}

#[test]
fn test_flatten_keeps_empty_containers() {
    assert_eq!(Value::Object(flatten(&json!({}))), json!({ "": {} }));
    assert_eq!(Value::Object(flatten(&json!({ "a": [] }))), json!({ "a": [] }));
}

#[test]
fn test_flatten_nested_objects() {
    assert_eq!(
        Value::Object(flatten(&json!({ "a": { "b": 1, "c": 2 } }))),
        json!({ "a.b": 1, "a.c": 2 })
    );
}

#[test]
fn test_no_supporting_translations_no_diagnostics() {
    let mut provider = TranslationProvider::new();
    provider.projects_updated(fr_and_de());

    let published = provider.document_changed(markup("/ws/src/app.html", MARKUP));

    assert!(published.iter().all(|set| set.diagnostics.is_empty()));
}

#[test]
fn test_missing_in_one_project_only() {
    let mut provider = TranslationProvider::new();
    provider.projects_updated(fr_and_de());
    provider.document_changed(xliff("/ws/locale/messages.fr.xlf", FR));
    provider.document_changed(xliff("/ws/locale/messages.de.xlf", "<xliff/>"));

    let published = provider.document_changed(markup("/ws/src/app.html", MARKUP));

    assert_eq!(published.len(), 1);
    let diagnostics = &published[0].diagnostics;
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.severity, DiagnosticSeverity::Warning);
    assert_eq!(diagnostic.projects, vec!["de"]);
    assert!(diagnostic.message.contains("de"));
    assert!(!diagnostic.message.contains("fr"));
    // `<p i18n="` is 9 chars, `@@greeting` is 10
    assert_eq!(
        diagnostic.range,
        Range::new(Position::new(0, 9), Position::new(0, 19))
    );
}

#[test]
fn test_validation_is_idempotent() {
    let document = markup("/ws/src/app.html", r#"<h1 i18n="@@a">x</h1><p i18n="@@b">y</p>"#);
    let mut fr = TranslationFile::new("/ws/messages.fr.xlf", Some("fr".to_string()));
    fr.set_units(vec![TranslationUnit::new("a")]);
    let translations = [&fr];

    let first = validate(&document, &translations);
    let second = validate(&document, &translations);

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_hover_joins_targets_and_respects_span() {
    let mut provider = TranslationProvider::new();
    provider.projects_updated(fr_and_de());
    provider.document_changed(xliff("/ws/locale/messages.fr.xlf", FR));
    provider.document_changed(xliff("/ws/locale/messages.de.xlf", DE));
    provider.document_changed(markup("/ws/src/app.html", MARKUP));

    let hover = provider
        .hover("/ws/src/app.html", Position::new(0, 12))
        .expect("hover inside the reference");
    assert_eq!(hover.text, "Bonjour\nHallo");
    assert_eq!(
        hover.range,
        Range::new(Position::new(0, 9), Position::new(0, 19))
    );

    assert!(provider.hover("/ws/src/app.html", Position::new(0, 18)).is_some());
    assert!(provider.hover("/ws/src/app.html", Position::new(0, 19)).is_none());
    assert!(provider.hover("/ws/src/app.html", Position::new(0, 20)).is_none());
}

#[test]
fn test_hover_shows_placeholder_for_missing_target() {
    let mut provider = TranslationProvider::new();
    provider.projects_updated(fr_and_de());
    provider.document_changed(xliff("/ws/locale/messages.fr.xlf", FR));
    provider.document_changed(xliff("/ws/locale/messages.de.xlf", "<xliff/>"));
    provider.document_changed(markup("/ws/src/app.html", MARKUP));

    let hover = provider.hover("/ws/src/app.html", Position::new(0, 10));

    assert_eq!(
        hover.map(|h| h.text),
        Some("Bonjour\n(no translation)".to_string())
    );
}

#[test]
fn test_translation_change_revalidates_every_open_document() {
    let mut provider = TranslationProvider::new();
    provider.projects_updated(vec![
        Project::new("admin", "/ws/admin", Vec::new(), "admin.fr.xlf"),
        Project::new("shop", "/ws/shop", Vec::new(), "shop.fr.xlf"),
    ]);
    provider.document_changed(xliff("/ws/locale/admin.fr.xlf", FR));
    provider.document_changed(xliff("/ws/locale/shop.fr.xlf", "<xliff/>"));
    provider.document_changed(markup("/ws/admin/page.html", MARKUP));
    let stale = provider.document_changed(markup("/ws/shop/page.html", MARKUP));
    assert_eq!(stale[0].diagnostics.len(), 1);

    let published = provider.document_changed(xliff("/ws/locale/shop.fr.xlf", FR));

    let admin = diagnostics_for(&published, "/ws/admin/page.html").expect("admin revalidated");
    let shop = diagnostics_for(&published, "/ws/shop/page.html").expect("shop revalidated");
    assert!(admin.diagnostics.is_empty());
    assert!(shop.diagnostics.is_empty());
}

#[test]
fn test_zero_projects_clears_associations_and_diagnostics() {
    let mut provider = TranslationProvider::new();
    provider.projects_updated(fr_and_de());
    provider.document_changed(xliff("/ws/locale/messages.fr.xlf", "<xliff/>"));
    let before = provider.document_changed(markup("/ws/src/app.html", MARKUP));
    assert_eq!(before[0].diagnostics.len(), 1);

    let published = provider.projects_updated(Vec::new());

    assert!(provider.store().files().all(|file| file.project().is_none()));
    assert_eq!(published.len(), 1);
    assert!(published[0].diagnostics.is_empty());
    assert!(provider.hover("/ws/src/app.html", Position::new(0, 12)).is_none());
}

#[test]
fn test_json_translations() {
    let mut provider = TranslationProvider::new();
    provider.projects_updated(vec![Project::new(
        "de",
        "/ws/src",
        Vec::new(),
        "i18n/de.json",
    )]);
    provider.document_changed(TextDocument::new(
        "/ws/i18n/de.json",
        "json",
        r#"{ "nav": { "home": "Startseite", "empty": "" } }"#,
    ));

    let published = provider.document_changed(markup(
        "/ws/src/app.html",
        r#"<a i18n="@@nav.home">Home</a><a i18n="@@nav.about">About</a>"#,
    ));

    let ids: Vec<&str> = published[0].diagnostics.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["nav.about"]);
    assert_eq!(
        provider
            .hover("/ws/src/app.html", Position::new(0, 10))
            .map(|h| h.text),
        Some("Startseite".to_string())
    );
}

#[test]
fn test_unrelated_json_is_not_a_translation() {
    let mut provider = TranslationProvider::new();
    provider.projects_updated(fr_and_de());

    let published =
        provider.document_changed(TextDocument::new("/ws/package.json", "json", "{}"));

    assert!(published.is_empty());
    assert!(provider.store().is_empty());
}

#[test]
fn test_malformed_translation_yields_zero_units() {
    let mut provider = TranslationProvider::new();
    provider.projects_updated(vec![Project::new(
        "de",
        "/ws/src",
        Vec::new(),
        "i18n/de.json",
    )]);

    provider.document_changed(TextDocument::new("/ws/i18n/de.json", "json", "{ broken"));

    let file = provider.store().get("/ws/i18n/de.json").expect("stored");
    assert!(file.units().is_empty());
    assert!(file.parse_error().is_some());
}

#[test]
fn test_json_seen_before_projects_joins_later() {
    let mut provider = TranslationProvider::new();
    provider.document_changed(TextDocument::new(
        "/ws/i18n/de.json",
        "json",
        r#"{ "greeting": "Hallo" }"#,
    ));
    provider.document_changed(xliff("/ws/i18n/fr.xlf", FR));
    provider.document_changed(markup("/ws/src/app.html", MARKUP));

    provider.projects_updated(vec![
        Project::new("de", "/ws/src", Vec::new(), "i18n/de.json"),
        Project::new("fr", "/ws/src", Vec::new(), "i18n/fr.xlf"),
    ]);
    provider.translations_loaded();

    let stored: Vec<(&str, Option<&str>)> = provider
        .store()
        .files()
        .map(|file| (file.uri(), file.project()))
        .collect();
    assert_eq!(
        stored,
        vec![
            ("/ws/i18n/de.json", Some("de")),
            ("/ws/i18n/fr.xlf", Some("fr")),
        ]
    );
    assert_eq!(
        provider
            .hover("/ws/src/app.html", Position::new(0, 12))
            .map(|h| h.text),
        Some("Hallo\nBonjour".to_string())
    );
}

#[test]
fn test_translations_loaded_republishes_open_documents() {
    let mut provider = TranslationProvider::new();
    let opened = provider.document_changed(markup(
        "/ws/src/app.html",
        r#"<p i18n="@@greeting">Hi</p><p i18n="@@farewell">Bye</p>"#,
    ));
    assert!(opened.is_empty());
    provider.document_changed(xliff("/ws/locale/messages.fr.xlf", FR));
    provider.document_changed(xliff("/ws/locale/messages.de.xlf", DE));
    provider.projects_updated(fr_and_de());

    let published = provider.translations_loaded();

    assert_eq!(published.len(), 1);
    assert_eq!(published[0].uri, "/ws/src/app.html");
    let diagnostics = &published[0].diagnostics;
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].id, "farewell");
    assert_eq!(diagnostics[0].projects, vec!["fr", "de"]);
}
