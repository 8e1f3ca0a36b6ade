//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns an icon for a category, chosen by keywords in its name.
///
/// Usage in templates: `{{ category.name|category_icon }}`
#[askama::filter_fn]
pub fn category_icon(
    name: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(icon_for(&name.to_string()))
}

fn icon_for(name: &str) -> &'static str {
    let name = name.to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));

    if has(&["phone", "mobile"]) {
        "📱"
    } else if has(&["laptop", "computer"]) {
        "💻"
    } else if has(&["gaming", "console"]) {
        "🎮"
    } else if has(&["audio", "headphone"]) {
        "🎧"
    } else if has(&["watch", "wearable"]) {
        "⌚"
    } else if has(&["tv", "video"]) {
        "📺"
    } else {
        "📦"
    }
}
