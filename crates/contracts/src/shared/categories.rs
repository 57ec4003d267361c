//! Normalization of enrollment category maps.
//!
//! Category labels arrive from the localidade endpoint as free Portuguese text
//! ("Educação Infantil", "Pré-Escola") and the counts either as JSON numbers or
//! as strings in Brazilian notation ("1.234,5"). Everything the UI and the
//! simulation engine look up goes through [`normalize_category_key`] first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalized category key -> non-negative count.
pub type CategoryMap = BTreeMap<String, f64>;

/// Raw label -> raw value, exactly as the backend stores it.
pub type RawCategoryMap = BTreeMap<String, RawCategoryValue>;

/// A category value before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCategoryValue {
    Number(f64),
    Text(String),
    Null,
}

impl RawCategoryValue {
    /// Coerces the value into a count. `None` means the value could not be
    /// used (unparseable, negative, not finite or null).
    pub fn to_count(&self) -> Option<f64> {
        self.classify().ok()
    }

    /// Like [`RawCategoryValue::to_count`], telling why a value was rejected.
    pub fn classify(&self) -> Result<f64, UnparsedReason> {
        let value = match self {
            RawCategoryValue::Number(v) => *v,
            RawCategoryValue::Text(s) => parse_br_number(s).ok_or(UnparsedReason::NotANumber)?,
            RawCategoryValue::Null => return Err(UnparsedReason::Missing),
        };
        if !value.is_finite() {
            Err(UnparsedReason::NotANumber)
        } else if value < 0.0 {
            Err(UnparsedReason::Negative)
        } else {
            Ok(value)
        }
    }

    fn raw_text(&self) -> String {
        match self {
            RawCategoryValue::Number(v) => v.to_string(),
            RawCategoryValue::Text(s) => s.clone(),
            RawCategoryValue::Null => "null".to_string(),
        }
    }
}

impl From<f64> for RawCategoryValue {
    fn from(v: f64) -> Self {
        RawCategoryValue::Number(v)
    }
}

impl From<&str> for RawCategoryValue {
    fn from(s: &str) -> Self {
        RawCategoryValue::Text(s.to_string())
    }
}

fn is_word_separator(c: char) -> bool {
    matches!(c, '-' | '_' | '/')
}

/// Converts a free-text label into a stable lookup key.
///
/// Accents are removed through canonical decomposition, hyphens, slashes and
/// underscores separate words, any other punctuation is dropped, and the
/// remaining words are joined by `_` in lowercase ASCII.
///
/// ```
/// use contracts::shared::categories::normalize_category_key;
/// assert_eq!(normalize_category_key("Educação Infantil"), "educacao_infantil");
/// assert_eq!(normalize_category_key("Pré-Escola"), "pre_escola");
/// assert_eq!(normalize_category_key("  ...  "), "");
/// ```
pub fn normalize_category_key(label: &str) -> String {
    let cleaned: String = label
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if is_word_separator(c) { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_ascii_lowercase()
}

/// Parses a number written with `,` as decimal separator and `.` as
/// thousands separator. An optional `R$` prefix and a leading minus sign are
/// accepted.
///
/// ```
/// use contracts::shared::categories::parse_br_number;
/// assert_eq!(parse_br_number("1.234,5"), Some(1234.5));
/// assert_eq!(parse_br_number("R$ 10,00"), Some(10.0));
/// assert_eq!(parse_br_number("abc"), None);
/// ```
pub fn parse_br_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest.trim_start()),
        None => (1.0, trimmed),
    };
    let body = rest.strip_prefix("R$").map(str::trim_start).unwrap_or(rest);
    if body.is_empty() {
        return None;
    }

    let mut canonical = String::with_capacity(body.len());
    let mut seen_comma = false;
    for c in body.chars() {
        match c {
            '0'..='9' => canonical.push(c),
            '.' if !seen_comma => {}
            ',' if !seen_comma => {
                seen_comma = true;
                canonical.push('.');
            }
            _ => return None,
        }
    }

    if !canonical.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    canonical
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| sign * v)
}

/// Why a raw value could not be used as a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnparsedReason {
    NotANumber,
    Negative,
    Missing,
}

impl UnparsedReason {
    pub fn description(&self) -> &'static str {
        match self {
            UnparsedReason::NotANumber => "não é numérico",
            UnparsedReason::Negative => "é negativo",
            UnparsedReason::Missing => "está vazio",
        }
    }
}

/// A value that was replaced by zero during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnparsedValue {
    pub label: String,
    pub raw: String,
    pub reason: UnparsedReason,
}

/// Several raw labels that normalized to the same key. `labels` keeps input
/// order; the value of the last label is the one in the output map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCollision {
    pub key: String,
    pub labels: Vec<String>,
}

/// Normalized map plus what normalization had to drop or default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryNormalization {
    pub values: CategoryMap,
    pub dropped_labels: Vec<String>,
    pub unparsed: Vec<UnparsedValue>,
    pub collisions: Vec<KeyCollision>,
}

impl CategoryNormalization {
    pub fn is_clean(&self) -> bool {
        self.dropped_labels.is_empty() && self.unparsed.is_empty() && self.collisions.is_empty()
    }
}

/// Normalizes every key and value of a raw category map.
///
/// Labels that normalize to an empty key are dropped, values that cannot be
/// read as a non-negative number become `0`, and on key collision the last
/// entry in iteration order wins.
pub fn normalize_categorias<I, K>(raw: I) -> CategoryMap
where
    I: IntoIterator<Item = (K, RawCategoryValue)>,
    K: AsRef<str>,
{
    normalize_categorias_report(raw).values
}

/// Same as [`normalize_categorias`], reporting dropped labels, defaulted
/// values and key collisions.
pub fn normalize_categorias_report<I, K>(raw: I) -> CategoryNormalization
where
    I: IntoIterator<Item = (K, RawCategoryValue)>,
    K: AsRef<str>,
{
    let mut report = CategoryNormalization::default();
    let mut sources: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (label, value) in raw {
        let label = label.as_ref();
        let key = normalize_category_key(label);
        if key.is_empty() {
            report.dropped_labels.push(label.to_string());
            continue;
        }

        let count = match value.classify() {
            Ok(v) => v,
            Err(reason) => {
                report.unparsed.push(UnparsedValue {
                    label: label.to_string(),
                    raw: value.raw_text(),
                    reason,
                });
                0.0
            }
        };

        sources.entry(key.clone()).or_default().push(label.to_string());
        report.values.insert(key, count);
    }

    report.collisions = sources
        .into_iter()
        .filter(|(_, labels)| labels.len() > 1)
        .map(|(key, labels)| KeyCollision { key, labels })
        .collect();

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accented_labels_match_unaccented() {
        assert_eq!(normalize_category_key("Educação Infantil"), "educacao_infantil");
        assert_eq!(
            normalize_category_key("Educação Infantil"),
            normalize_category_key("Educacao Infantil")
        );
        assert_eq!(normalize_category_key("ÁREA RURAL"), "area_rural");
        assert_eq!(normalize_category_key("Ensino Médio"), "ensino_medio");
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        assert_eq!(normalize_category_key("Pré-Escola"), "pre_escola");
        assert_eq!(normalize_category_key("  Creche   (Integral) "), "creche_integral");
        assert_eq!(normalize_category_key("EJA / Fundamental"), "eja_fundamental");
        assert_eq!(normalize_category_key("Ed. Especial"), "ed_especial");
        assert_eq!(normalize_category_key("Anos\tIniciais\nUrbano"), "anos_iniciais_urbano");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(normalize_category_key(""), "");
        assert_eq!(normalize_category_key("   "), "");
        assert_eq!(normalize_category_key("?!.,;"), "");
        assert_eq!(normalize_category_key("- / _"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Educação Infantil",
            "Pré-Escola",
            "creche_integral",
            "  Ensino   Fundamental - Anos Finais (Campo) ",
            "EJA/Médio",
            "___",
            "Ção",
            "",
        ];
        for s in samples {
            let once = normalize_category_key(s);
            assert_eq!(normalize_category_key(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn test_parse_br_number() {
        assert_eq!(parse_br_number("1.234,5"), Some(1234.5));
        assert_eq!(parse_br_number("1.234.567"), Some(1234567.0));
        assert_eq!(parse_br_number("10"), Some(10.0));
        assert_eq!(parse_br_number(" 0,75 "), Some(0.75));
        assert_eq!(parse_br_number("R$ 2.500,00"), Some(2500.0));
        assert_eq!(parse_br_number("-3,5"), Some(-3.5));
        assert_eq!(parse_br_number(""), None);
        assert_eq!(parse_br_number("R$"), None);
        assert_eq!(parse_br_number("abc"), None);
        assert_eq!(parse_br_number("1,2,3"), None);
        assert_eq!(parse_br_number("1,234.5"), None);
        assert_eq!(parse_br_number("inf"), None);
        assert_eq!(parse_br_number("1e5"), None);
    }

    #[test]
    fn test_normalize_map_example() {
        let raw: Vec<(&str, RawCategoryValue)> = vec![
            ("Creche", 10.0.into()),
            ("Pré-Escola", "1.234,5".into()),
        ];
        let normalized = normalize_categorias(raw);

        let mut expected = CategoryMap::new();
        expected.insert("creche".to_string(), 10.0);
        expected.insert("pre_escola".to_string(), 1234.5);
        assert_eq!(normalized, expected);
    }

    #[test]
    fn test_empty_keys_are_dropped() {
        let raw: Vec<(&str, RawCategoryValue)> = vec![
            ("", 5.0.into()),
            ("---", 7.0.into()),
            ("Creche", 1.0.into()),
        ];
        let report = normalize_categorias_report(raw);
        assert_eq!(report.values.len(), 1);
        assert_eq!(report.values.get("creche"), Some(&1.0));
        assert_eq!(report.dropped_labels, vec!["".to_string(), "---".to_string()]);
    }

    #[test]
    fn test_unparseable_values_default_to_zero() {
        let raw: Vec<(&str, RawCategoryValue)> = vec![
            ("Creche", "n/d".into()),
            ("EJA", RawCategoryValue::Null),
            ("Especial", (-4.0).into()),
            ("Médio", "12".into()),
        ];
        let report = normalize_categorias_report(raw);
        assert_eq!(report.values.get("creche"), Some(&0.0));
        assert_eq!(report.values.get("eja"), Some(&0.0));
        assert_eq!(report.values.get("especial"), Some(&0.0));
        assert_eq!(report.values.get("medio"), Some(&12.0));
        let labels: Vec<&str> = report.unparsed.iter().map(|u| u.label.as_str()).collect();
        assert_eq!(labels, vec!["Creche", "EJA", "Especial"]);
        assert_eq!(report.unparsed[0].raw, "n/d");
    }

    #[test]
    fn test_unparsed_reason_separates_negative_values() {
        let raw: Vec<(&str, RawCategoryValue)> = vec![
            ("Creche", "n/d".into()),
            ("EJA", RawCategoryValue::Null),
            ("Especial", (-4.0).into()),
            ("Integral", "-1.200,5".into()),
        ];
        let report = normalize_categorias_report(raw);
        let reasons: Vec<UnparsedReason> = report.unparsed.iter().map(|u| u.reason).collect();
        assert_eq!(
            reasons,
            vec![
                UnparsedReason::NotANumber,
                UnparsedReason::Missing,
                UnparsedReason::Negative,
                UnparsedReason::Negative,
            ]
        );
        assert_eq!(report.unparsed[2].raw, "-4");
        assert_eq!(UnparsedReason::Negative.description(), "é negativo");
        assert_eq!(RawCategoryValue::Number(f64::NAN).classify(), Err(UnparsedReason::NotANumber));
        assert_eq!(RawCategoryValue::from("0").classify(), Ok(0.0));
    }

    #[test]
    fn test_collision_last_write_wins() {
        let raw: Vec<(&str, RawCategoryValue)> = vec![
            ("Pré-Escola", 3.0.into()),
            ("pre escola", 8.0.into()),
        ];
        let report = normalize_categorias_report(raw);
        assert_eq!(report.values.get("pre_escola"), Some(&8.0));
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].key, "pre_escola");
        assert_eq!(
            report.collisions[0].labels,
            vec!["Pré-Escola".to_string(), "pre escola".to_string()]
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn test_raw_map_from_json() {
        let json = r#"{"Creche": 10, "Pré-Escola": "1.234,5", "Sem dado": null}"#;
        let raw: RawCategoryMap = serde_json::from_str(json).unwrap();
        assert_eq!(raw.get("Creche"), Some(&RawCategoryValue::Number(10.0)));
        assert_eq!(raw.get("Sem dado"), Some(&RawCategoryValue::Null));

        let normalized = normalize_categorias(raw);
        assert_eq!(normalized.get("pre_escola"), Some(&1234.5));
        assert_eq!(normalized.get("sem_dado"), Some(&0.0));
    }
}
