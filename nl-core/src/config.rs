//! Configuração do motor, carregada de TOML ou montada com os valores padrão.
//!
//! ```toml
//! min_score = 0.02
//! default_hypotheses = 3
//! default_options = ["omit_whitespace", "omit_punctuation"]
//! lexicon = "lexicon.json"
//!
//! [server]
//! bind = "0.0.0.0:3000"
//! ```
//!
//! Todos os campos são opcionais.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NlError, Result};
use crate::recognizer::DEFAULT_MIN_SCORE;
use crate::tokenizer::TokenOptions;

/// Configuração do motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Piso de score do reconhecedor de idiomas, em [0, 1].
    pub min_score: f64,
    /// Número de hipóteses devolvidas quando quem chama não especifica.
    pub default_hypotheses: usize,
    /// Opções de segmentação usadas pelo pipeline.
    pub default_options: TokenOptions,
    /// Léxico JSON opcional para Lemma/LexicalClass/NameType.
    pub lexicon: Option<PathBuf>,
    pub server: ServerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            default_hypotheses: 3,
            default_options: TokenOptions::OMIT_WHITESPACE | TokenOptions::OMIT_PUNCTUATION,
            lexicon: None,
            server: ServerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Endereço de escuta do serviço web.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

impl EngineConfig {
    /// Lê e valida uma configuração TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| NlError::Config(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Lê a configuração de um arquivo TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NlError::Config(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(NlError::Config(format!(
                "min_score must be within [0, 1], got {}",
                self.min_score
            )));
        }
        if self.default_hypotheses == 0 {
            return Err(NlError::Config(
                "default_hypotheses must be at least 1".to_string(),
            ));
        }
        if self.server.bind.trim().is_empty() {
            return Err(NlError::Config("server.bind must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_score, DEFAULT_MIN_SCORE);
        assert!(config.default_options.contains(TokenOptions::OMIT_WHITESPACE));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(EngineConfig::from_toml("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = EngineConfig::from_toml(
            r#"
            min_score = 0.05
            default_hypotheses = 2
            default_options = ["omit_whitespace", "join_contractions"]
            lexicon = "data/lexicon.json"

            [server]
            bind = "127.0.0.1:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.min_score, 0.05);
        assert_eq!(config.default_hypotheses, 2);
        assert!(config.default_options.contains(TokenOptions::JOIN_CONTRACTIONS));
        assert!(!config.default_options.contains(TokenOptions::OMIT_PUNCTUATION));
        assert_eq!(config.lexicon, Some(PathBuf::from("data/lexicon.json")));
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            EngineConfig::from_toml("min_score = 1.5"),
            Err(NlError::Config(_))
        ));
        assert!(EngineConfig::from_toml("default_hypotheses = 0").is_err());
        assert!(EngineConfig::from_toml("default_options = [\"shout\"]").is_err());
        assert!(EngineConfig::from_toml("min_score = ").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/nl.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/nl.toml"));
    }
}
