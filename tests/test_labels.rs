use _market_explorer_core::labels::{
    market_label, parse_zone_selection, parse_zone_selection_list, titleize, zone_label,
    zone_label_for_display,
};

#[test]
fn test_titleize_missing_and_empty_input() {
    assert_eq!(titleize(None), "");
    assert_eq!(titleize(Some("")), "");
    assert_eq!(titleize(Some("   ")), "");
}

#[test]
fn test_titleize_rewrites_slugs() {
    assert_eq!(titleize(Some("some_market-name")), "Some Market Name");
    assert_eq!(titleize(Some("  france ")), "France");
    assert_eq!(titleize(Some("EMEA_region")), "Emea Region");
    assert_eq!(titleize(Some("a__b")), "A B");
}

#[test]
fn test_market_and_zone_labels_alias_titleize() {
    assert_eq!(market_label(Some("heavy_industry")), "Heavy Industry");
    assert_eq!(zone_label(Some("europe")), "Europe");
    assert_eq!(market_label(None), "");
    assert_eq!(zone_label(None), "");
}

#[test]
fn test_zone_label_for_display_defaults_to_all_zones() {
    assert_eq!(zone_label_for_display(&[]), "All Zones");
}

#[test]
fn test_zone_label_for_display_joins_titleized_zones() {
    let zones = vec!["france".to_string(), "europe".to_string()];
    assert_eq!(zone_label_for_display(&zones), "France + Europe");

    let single = vec!["france".to_string()];
    assert_eq!(zone_label_for_display(&single), "France");
}

#[test]
fn test_parse_zone_selection_fixed_ui_codes() {
    assert_eq!(parse_zone_selection(Some("eu")), ["europe"]);
    assert_eq!(parse_zone_selection(Some("eu_fr")), ["france", "europe"]);
    assert_eq!(parse_zone_selection(Some("fr+eu")), ["france", "europe"]);
    assert_eq!(parse_zone_selection(Some("fr_eu")), ["france", "europe"]);
    assert_eq!(parse_zone_selection(Some("france")), ["france"]);
}

#[test]
fn test_parse_zone_selection_free_form() {
    assert_eq!(parse_zone_selection(Some("France + EU")), ["france", "europe"]);
    assert_eq!(
        parse_zone_selection(Some("france + nordics ")),
        ["france", "nordics"]
    );
    assert_eq!(parse_zone_selection(Some("+ france +")), ["france"]);
}

#[test]
fn test_parse_zone_selection_empty_input() {
    assert_eq!(parse_zone_selection(None), Vec::<String>::new());
    assert_eq!(parse_zone_selection(Some("")), Vec::<String>::new());
    assert_eq!(parse_zone_selection(Some("  ")), Vec::<String>::new());
}

#[test]
fn test_parse_zone_selection_list_keeps_codes_verbatim() {
    let items = vec!["France".to_string(), " EU ".to_string()];
    // List input is not remapped, unlike the string path
    assert_eq!(parse_zone_selection_list(&items), ["france", "eu"]);

    let with_blanks = vec!["  ".to_string(), "europe".to_string(), "europe".to_string()];
    assert_eq!(parse_zone_selection_list(&with_blanks), ["europe", "europe"]);
}
