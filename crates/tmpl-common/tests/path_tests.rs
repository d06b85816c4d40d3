use super::*;

#[test]
fn test_parse_marks_directories() {
    let file = FilePath::parse("work/lib/foo.temper");
    assert!(!file.is_dir);
    assert_eq!(file.segments.len(), 3);
    assert_eq!(file.last_segment(), Some("foo.temper"));

    let dir = FilePath::parse("work/lib/");
    assert!(dir.is_dir);
    assert_eq!(dir.to_string(), "work/lib/");
}

#[test]
fn test_module_name_splits_library_root() {
    let name = ModuleName::new(FilePath::parse("work/lib/src/foo.temper"), 2, false);
    assert_eq!(name.library_root().to_string(), "work/lib/");
    assert_eq!(name.relative_path().to_string(), "src/foo.temper");
    assert_eq!(name.to_string(), "work/lib//src/foo.temper");
}

#[test]
fn test_preface_display_suffix() {
    let name = ModuleName::new(FilePath::parse("lib/foo.temper"), 1, true);
    assert!(name.to_string().ends_with(":preface"));
}

#[test]
fn test_library_config_file_detection() {
    let config = ModuleName::new(FilePath::parse("lib/config.temper.md"), 1, false);
    assert!(config.is_library_config_file());

    let nested = ModuleName::new(FilePath::parse("lib/sub/config.temper.md"), 1, false);
    assert!(nested.is_library_config_file());

    let other = ModuleName::new(FilePath::parse("lib/config.md"), 1, false);
    assert!(!other.is_library_config_file());

    let dir = ModuleName::new(FilePath::parse("lib/config.temper.md/"), 1, false);
    assert!(!dir.is_library_config_file());
}

#[test]
#[should_panic]
fn test_root_count_past_end_panics() {
    let _ = ModuleName::new(FilePath::parse("a/b"), 3, false);
}
