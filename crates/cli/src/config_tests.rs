use super::*;

#[test]
fn empty_file_gives_defaults() {
    let config = AppConfig::parse("").unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.engine.depth, 2);
    assert_eq!(config.play.ai_color, Side::Black);
    assert_eq!(config.play.delay_ms, 500);
    assert_eq!(config.matches.games, 10);
}

#[test]
fn partial_tables_keep_other_defaults() {
    let config = AppConfig::parse(
        r#"
        [engine]
        depth = 3

        [play]
        ai_color = "white"

        [match]
        games = 4
        seed = 99
        "#,
    )
    .unwrap();

    assert_eq!(config.engine.depth, 3);
    assert_eq!(config.play.ai_color, Side::White);
    assert_eq!(config.play.delay_ms, 500);
    assert_eq!(config.matches.games, 4);
    assert_eq!(config.matches.seed, 99);
    assert_eq!(config.matches.max_moves, 200);
    assert!(config.matches.alternate_colors);
}

#[test]
fn bad_values_are_errors() {
    assert!(AppConfig::parse("[play]\nai_color = \"green\"").is_err());
    assert!(AppConfig::parse("[engine]\ndepth = -1").is_err());
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = AppConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.toml"));
}

#[test]
fn side_converts_to_color() {
    assert_eq!(Color::from(Side::White), Color::White);
    assert_eq!(Color::from(Side::Black), Color::Black);
}
