//! # Erros do Motor
//!
//! Todo o trabalho é determinístico e em memória: não há I/O nem retentativas.
//! Um erro aqui é sempre um erro de programação do chamador e volta para ele
//! imediatamente, nunca é registrado em log e engolido.

use thiserror::Error;

use crate::tagger::TagScheme;

/// Erros que as operações públicas podem devolver.
#[derive(Debug, Error)]
pub enum NlError {
    /// Intervalo fora do texto ou fora de uma fronteira de escalar Unicode.
    #[error("invalid range {start}..{end} for text of {len} bytes")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// Código de idioma fora do catálogo.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// O esquema não foi declarado na construção do `Tagger`.
    #[error("tag scheme {0:?} was not requested when the tagger was built")]
    UnsupportedScheme(TagScheme),

    /// Configuração inválida (TOML malformado ou valores fora da faixa).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Dicionário de léxico em JSON malformado.
    #[error("invalid lexicon: {0}")]
    Lexicon(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NlError>;
