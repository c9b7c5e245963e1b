//! # nl-core: Segmentação, Identificação de Idioma e Etiquetagem
//!
//! Este crate implementa um motor de processamento de texto em linguagem natural
//! sem dados treinados externos: tudo o que ele sabe vem de regras Unicode e de
//! perfis de trigramas construídos a partir de textos de referência embutidos.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Entrada**: Texto bruto (`&str`), endereçado por intervalos de bytes.
//! 2.  **Segmentação** ([`tokenizer`], [`chars`]): palavras,
//!     sentenças, parágrafos ou documento, preservando os offsets originais.
//! 3.  **Identificação de Idioma** ([`recognizer`], [`model`], [`features`],
//!     [`script`]): distribuição de probabilidade sobre o catálogo
//!     ([`language`]), com dicas e restrições.
//! 4.  **Etiquetagem** ([`tagger`], [`resolver`]): tags por token em esquemas
//!     como TokenType, Script, Language, Lemma e LexicalClass.
//! 5.  **Saída**: tokens, idiomas e tags; o [`pipeline`] junta tudo e emite
//!     eventos observáveis.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use nl_core::{Language, LanguageRecognizer, Segmenter, Unit};
//!
//! let text = "Hello world. The weather is nice today.";
//!
//! let sentences: Vec<_> = Segmenter::new(Unit::Sentence).tokens(text).collect();
//! assert_eq!(sentences[0].text, "Hello world. ");
//!
//! let recognizer = LanguageRecognizer::default();
//! assert_eq!(recognizer.identify(text), Some(Language::English));
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador que conecta todos os estágios.
//! - [`tokenizer`]: Segmentação do texto.
//! - [`recognizer`]: Identificação de idioma.
//! - [`tagger`]: Etiquetagem por esquema.
//! - [`config`]: Configuração TOML.

mod boundary;
pub mod chars;
pub mod config;
pub mod corpus;
pub mod error;
pub mod features;
pub mod language;
pub mod model;
pub mod pipeline;
pub mod recognizer;
pub mod resolver;
pub mod script;
pub mod tagger;
pub mod text;
pub mod tokenizer;

pub use config::EngineConfig;
pub use error::{NlError, Result};
pub use language::Language;
pub use model::{LanguageModel, NgramLanguageModel};
pub use pipeline::{Analysis, NlPipeline, PipelineEvent};
pub use recognizer::{Hypothesis, LanguageHints, LanguageHypotheses, LanguageRecognizer};
pub use resolver::{ChainResolver, IntrinsicResolver, LexiconResolver};
pub use script::Script;
pub use tagger::{Tag, TagRequest, TagResolver, TagScheme, TaggedRange, Tagger};
pub use tokenizer::{segment, tokenize, Segmenter, Token, TokenKind, TokenOptions, Unit};
