use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A municipality (or state network) whose enrollments feed simulations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Localidade {
    pub id: String,
    /// IBGE municipality code, 7 digits.
    pub codigo_ibge: String,
    pub nome: String,
    pub uf: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Localidade {
    pub fn display_name(&self) -> String {
        format!("{} / {}", self.nome, self.uf)
    }
}

/// Create payload for a localidade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalidadeDto {
    pub codigo_ibge: String,
    pub nome: String,
    pub uf: String,
}

impl LocalidadeDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.nome.trim().is_empty() {
            return Err("Nome da localidade é obrigatório".into());
        }
        if self.codigo_ibge.len() != 7 || !self.codigo_ibge.chars().all(|c| c.is_ascii_digit()) {
            return Err("Código IBGE deve ter 7 dígitos".into());
        }
        if self.uf.len() != 2 || !self.uf.chars().all(|c| c.is_ascii_uppercase()) {
            return Err("UF deve ter 2 letras maiúsculas".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(codigo: &str, nome: &str, uf: &str) -> LocalidadeDto {
        LocalidadeDto {
            codigo_ibge: codigo.into(),
            nome: nome.into(),
            uf: uf.into(),
        }
    }

    #[test]
    fn test_validate() {
        assert!(dto("2304400", "Fortaleza", "CE").validate().is_ok());
        assert!(dto("2304400", "  ", "CE").validate().is_err());
        assert!(dto("23044", "Fortaleza", "CE").validate().is_err());
        assert!(dto("2304400", "Fortaleza", "ce").validate().is_err());
    }
}
