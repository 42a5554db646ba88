use crate::model::CountError;

/// Turns a cell like `"1,234人"` into `1234`: the unit suffix and thousands
/// separators are removed before parsing. Values must fit an SQLite INTEGER.
pub fn parse_visitor_count(text: &str, suffix: &str) -> Result<u64, CountError> {
    let stripped = if suffix.is_empty() {
        text.to_string()
    } else {
        text.replace(suffix, "")
    };
    let value = stripped.replace(',', "").trim().parse::<u64>()?;
    if value > i64::MAX as u64 {
        return Err(CountError::OutOfRange(value));
    }
    Ok(value)
}
