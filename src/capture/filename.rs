use chrono::NaiveDate;

/// Name stem used when the cardholder name is blank.
pub const DEFAULT_STEM: &str = "card";

/// Trimmed cardholder name, or [`DEFAULT_STEM`] when blank.
pub fn display_name(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_STEM
    } else {
        trimmed
    }
}

/// File-safe stem: every char outside `[A-Za-z0-9]` becomes `_`.
pub fn sanitize_name(name: &str) -> String {
    display_name(name)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `<stem>-<Mon><DD>.png`, e.g. `Ada_Lovelace-Jun12.png`.
pub fn export_filename(name: &str, date: NaiveDate) -> String {
    format!("{}-{}.png", sanitize_name(name), date.format("%b%d"))
}

#[cfg(test)]
#[path = "../../tests/unit/capture/filename.rs"]
mod tests;
