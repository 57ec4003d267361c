//! Weighting factors ("fatores de ponderação") per enrollment category.
//!
//! Keys are normalized category keys. Short labels without the full/part
//! time qualifier ("creche", "pre_escola") take the part-time factor.

use std::collections::BTreeMap;

use crate::shared::categories::normalize_category_key;

const DEFAULT_FACTORS: &[(&str, f64)] = &[
    ("creche_integral", 1.30),
    ("creche_parcial", 1.20),
    ("creche", 1.20),
    ("creche_conveniada_integral", 1.10),
    ("creche_conveniada_parcial", 0.80),
    ("pre_escola_integral", 1.30),
    ("pre_escola_parcial", 1.10),
    ("pre_escola", 1.10),
    ("anos_iniciais_urbano", 1.00),
    ("anos_iniciais_campo", 1.15),
    ("anos_finais_urbano", 1.10),
    ("anos_finais_campo", 1.20),
    ("ensino_fundamental_integral", 1.30),
    ("ensino_medio_urbano", 1.25),
    ("ensino_medio_campo", 1.30),
    ("ensino_medio_integral", 1.30),
    ("ensino_medio_integrado", 1.30),
    ("educacao_especial", 1.20),
    ("educacao_indigena_quilombola", 1.20),
    ("eja", 0.80),
    ("eja_integrada", 1.20),
];

/// Factor used when nothing is known about a category.
pub const FATOR_NEUTRO: f64 = 1.0;

/// Built-in factor for a normalized category key.
pub fn ponderador_padrao(key: &str) -> Option<f64> {
    DEFAULT_FACTORS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, f)| *f)
}

/// Built-in factors merged with user overrides. Override labels are
/// normalized, so "Creche Integral" overrides `creche_integral`.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    overrides: BTreeMap<String, f64>,
}

impl WeightTable {
    pub fn with_overrides(overrides: &BTreeMap<String, f64>) -> Self {
        let overrides = overrides
            .iter()
            .map(|(label, factor)| (normalize_category_key(label), *factor))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { overrides }
    }

    /// Returns the factor and whether it is the neutral fallback.
    pub fn factor(&self, key: &str) -> (f64, bool) {
        if let Some(f) = self.overrides.get(key) {
            return (*f, false);
        }
        match ponderador_padrao(key) {
            Some(f) => (f, false),
            None => (FATOR_NEUTRO, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factors_are_normalized_keys() {
        for (key, factor) in DEFAULT_FACTORS {
            assert_eq!(normalize_category_key(key), *key);
            assert!(*factor > 0.0);
        }
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Creche Integral".to_string(), 1.5);
        let table = WeightTable::with_overrides(&overrides);

        assert_eq!(table.factor("creche_integral"), (1.5, false));
        assert_eq!(table.factor("pre_escola"), (1.10, false));
        assert_eq!(table.factor("categoria_nova"), (FATOR_NEUTRO, true));
    }
}
