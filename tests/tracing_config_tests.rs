use super::*;

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
}

#[test]
fn test_explicit_directives_build_a_filter() {
    let filter = build_filter(Some("tmpl_backend=trace,warn".to_string()));
    let rendered = filter.to_string();
    assert!(rendered.contains("tmpl_backend=trace"), "{rendered}");
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
