//! Label & formatting helpers: slugs to readable labels, UI zone selections
//! to zone code lists. Presentation-side string logic only, no storage access.

/// Turn a slug like "some_market-name" into "Some Market Name".
pub fn titleize(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return String::new();
    };
    let cleaned = raw.trim().replace(['_', '-'], " ");
    cleaned
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

pub fn market_label(market: Option<&str>) -> String {
    titleize(market)
}

pub fn zone_label(zone: Option<&str>) -> String {
    titleize(zone)
}

/// Human label for a zone selection. An empty selection means no filter.
pub fn zone_label_for_display(zones: &[String]) -> String {
    if zones.is_empty() {
        return "All Zones".to_string();
    }

    zones
        .iter()
        .map(|z| titleize(Some(z)))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Parse a UI zone selection string into a list of zone codes.
///
/// Supports the fixed UI codes ("france", "eu", "eu_fr") as well as
/// human readable combinations (ex: "France + Europe").
pub fn parse_zone_selection(selection: Option<&str>) -> Vec<String> {
    let Some(raw) = selection else {
        return Vec::new();
    };
    let sel = raw.trim().to_lowercase();
    if sel.is_empty() {
        return Vec::new();
    }

    // Fixed UI codes
    if sel == "eu" {
        return vec!["europe".to_string()];
    }
    if matches!(sel.as_str(), "eu_fr" | "fr+eu" | "fr_eu") {
        return vec!["france".to_string(), "europe".to_string()];
    }

    // Generic parsing for human readable input
    sel.split('+')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p == "eu" {
                "europe".to_string()
            } else {
                p.to_string()
            }
        })
        .collect()
}

/// List selections arrive from the UI already canonical; no "eu" remapping
/// on this path.
pub fn parse_zone_selection_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|z| z.trim().to_lowercase())
        .filter(|z| !z.is_empty())
        .collect()
}
