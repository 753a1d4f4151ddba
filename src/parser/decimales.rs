use crate::error::AppError;

/// Parse a French locale-decimal string (`,` is the decimal separator).
/// `"12,5"` → 12.5, `"7"` → 7.0. Every numeric field in the reporting
/// documents goes through this function, never through ad hoc replacements.
pub fn parse_decimal(s: &str) -> Result<f64, AppError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(AppError::NombreIllisible(s.to_string()));
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| AppError::NombreIllisible(s.to_string()))
}

/// `"" → None`, `"12,5" → Some(12.5)`, `"abc" → None`.
pub fn parse_decimal_opt(s: &str) -> Option<f64> {
    parse_decimal(s).ok()
}
