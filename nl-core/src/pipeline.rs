//! # Pipeline de Análise: Orquestrador com Eventos Observáveis
//!
//! O pipeline coordena os módulos (segmentador, reconhecedor de idiomas,
//! etiquetador) e emite eventos em cada passo via um canal Rust (`mpsc`),
//! permitindo que o servidor WebSocket transmita o progresso em tempo real.
//!
//! ## Etapas
//!
//! 1. **Segmentação** em palavras (com as opções configuradas).
//! 2. **Sentenças**: cada sentença recebe seu idioma dominante.
//! 3. **Idioma do documento**: idioma dominante e hipóteses do texto inteiro.
//! 4. **Etiquetagem**: cada palavra recebe as tags de todos os esquemas.

use std::collections::BTreeMap;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::language::Language;
use crate::model::shared_model;
use crate::recognizer::{LanguageHypotheses, LanguageRecognizer};
use crate::resolver::{ChainResolver, IntrinsicResolver, LexiconResolver};
use crate::tagger::{Tag, TagScheme, Tagger};
use crate::tokenizer::{Segmenter, Token, TokenOptions, Unit};

/// Eventos emitidos pelo pipeline durante o processamento.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: segmentação em palavras concluída.
    TokenizationDone { tokens: Vec<Token>, total: usize },
    /// **Passo 2**: uma sentença foi delimitada e teve o idioma identificado.
    SentenceDetected { sentence: AnalyzedSentence },
    /// **Passo 3**: idioma dominante do texto inteiro.
    LanguageIdentified {
        language: Option<Language>,
        hypotheses: LanguageHypotheses,
    },
    /// **Passo 4**: tag atribuída a uma palavra num esquema.
    TagAssigned {
        token_index: usize,
        token_text: String,
        scheme: TagScheme,
        tag: Tag,
    },
    /// **Conclusão**: resultado completo e tempo de processamento.
    Done {
        analysis: Analysis,
        processing_ms: u64,
    },
    /// **Falha**: erro irrecuperável.
    Error { message: String },
}

/// Uma sentença e seu idioma.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedSentence {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub language: Option<Language>,
}

/// Uma palavra e suas tags, por esquema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedWord {
    pub token: Token,
    pub tags: BTreeMap<TagScheme, Tag>,
}

/// Resultado completo de uma análise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Analysis {
    pub language: Option<Language>,
    pub hypotheses: LanguageHypotheses,
    pub sentences: Vec<AnalyzedSentence>,
    pub words: Vec<AnalyzedWord>,
}

/// O pipeline principal.
///
/// # Modos de Uso
/// - **Sync**: [`NlPipeline::analyze`] para chamadas diretas.
/// - **Streaming**: [`NlPipeline::analyze_streaming`] para clientes reativos (WebSocket).
pub struct NlPipeline {
    config: EngineConfig,
    recognizer: LanguageRecognizer,
    tagger: Tagger,
}

impl NlPipeline {
    /// Pipeline com a configuração padrão e o modelo compartilhado.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let recognizer = LanguageRecognizer::new(shared_model()).with_min_score(config.min_score);
        let tagger = build_tagger(recognizer.clone(), LexiconResolver::default());
        Self {
            config,
            recognizer,
            tagger,
        }
    }

    /// Pipeline a partir de uma configuração, carregando o léxico se houver.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let lexicon = match &config.lexicon {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    crate::error::NlError::Config(format!(
                        "failed to read lexicon '{}': {e}",
                        path.display()
                    ))
                })?;
                LexiconResolver::from_json(&json)?
            }
            None => LexiconResolver::default(),
        };
        debug!(entries = lexicon.len(), "léxico carregado");

        let recognizer = LanguageRecognizer::new(shared_model()).with_min_score(config.min_score);
        let tagger = build_tagger(recognizer.clone(), lexicon);
        Ok(Self {
            config,
            recognizer,
            tagger,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn recognizer(&self) -> &LanguageRecognizer {
        &self.recognizer
    }

    pub fn tagger(&self) -> &Tagger {
        &self.tagger
    }

    /// Analisa com as opções padrão da configuração.
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        self.analyze_with_options(text, self.config.default_options)
    }

    pub fn analyze_with_options(&self, text: &str, options: TokenOptions) -> Result<Analysis> {
        self.run(text, options, &mut |_| {})
    }

    /// Analisa emitindo eventos em `tx`. Termina sempre com `Done` ou `Error`.
    pub fn analyze_streaming(
        &self,
        text: &str,
        options: TokenOptions,
        tx: mpsc::Sender<PipelineEvent>,
    ) {
        let start = Instant::now();
        let result = self.run(text, options, &mut |event| {
            // Cliente desconectado: os eventos restantes são descartados
            let _ = tx.send(event);
        });
        let last = match result {
            Ok(analysis) => PipelineEvent::Done {
                analysis,
                processing_ms: start.elapsed().as_millis() as u64,
            },
            Err(e) => PipelineEvent::Error {
                message: e.to_string(),
            },
        };
        let _ = tx.send(last);
    }

    fn run(
        &self,
        text: &str,
        options: TokenOptions,
        emit: &mut dyn FnMut(PipelineEvent),
    ) -> Result<Analysis> {
        // 1. Palavras
        let tokens: Vec<Token> = Segmenter::new(Unit::Word)
            .with_options(options)
            .tokens(text)
            .collect();
        emit(PipelineEvent::TokenizationDone {
            total: tokens.len(),
            tokens: tokens.clone(),
        });

        // 2. Sentenças
        let mut sentences = Vec::new();
        for token in Segmenter::new(Unit::Sentence).tokens(text) {
            let sentence = AnalyzedSentence {
                language: self.recognizer.identify(&token.text),
                text: token.text,
                start: token.start,
                end: token.end,
            };
            emit(PipelineEvent::SentenceDetected {
                sentence: sentence.clone(),
            });
            sentences.push(sentence);
        }

        // 3. Documento
        let hypotheses = self
            .recognizer
            .hypotheses(text, self.config.default_hypotheses);
        let language = self.recognizer.identify(text);
        emit(PipelineEvent::LanguageIdentified {
            language,
            hypotheses: hypotheses.clone(),
        });

        // 4. Tags por palavra
        let mut words: Vec<AnalyzedWord> = tokens
            .into_iter()
            .map(|token| AnalyzedWord {
                token,
                tags: BTreeMap::new(),
            })
            .collect();
        for (scheme, tagged) in self.tagger.tags_for_all_schemes(text, Unit::Word, options)? {
            for tagged_range in tagged {
                let Ok(i) = words.binary_search_by_key(&tagged_range.start, |w| w.token.start)
                else {
                    continue;
                };
                emit(PipelineEvent::TagAssigned {
                    token_index: i,
                    token_text: tagged_range.text.clone(),
                    scheme,
                    tag: tagged_range.tag.clone(),
                });
                words[i].tags.insert(scheme, tagged_range.tag);
            }
        }

        Ok(Analysis {
            language,
            hypotheses,
            sentences,
            words,
        })
    }
}

impl Default for NlPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn build_tagger(recognizer: LanguageRecognizer, lexicon: LexiconResolver) -> Tagger {
    let resolver = ChainResolver::new()
        .with(IntrinsicResolver::new(recognizer))
        .with(lexicon);
    Tagger::with_resolver(&TagScheme::ALL, Arc::new(resolver))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_basic() {
        let pipeline = NlPipeline::new();
        let analysis = pipeline
            .analyze("The weather is nice today. We are going to the park.")
            .unwrap();
        assert_eq!(analysis.language, Some(Language::English));
        assert_eq!(analysis.sentences.len(), 2);
        assert_eq!(analysis.words.first().map(|w| w.token.text.as_str()), Some("The"));
        let first = &analysis.words[0].tags;
        assert_eq!(first.get(&TagScheme::TokenType).map(Tag::as_str), Some("Word"));
        assert_eq!(first.get(&TagScheme::Script).map(Tag::as_str), Some("Latn"));
        assert_eq!(first.get(&TagScheme::Language).map(Tag::as_str), Some("en"));
        assert!(first.get(&TagScheme::Lemma).is_none());
    }

    #[test]
    fn test_pipeline_empty() {
        let pipeline = NlPipeline::new();
        let analysis = pipeline.analyze("").unwrap();
        assert!(analysis.words.is_empty());
        assert!(analysis.sentences.is_empty());
        assert_eq!(analysis.language, None);
        assert!(analysis.hypotheses.is_empty());
    }

    #[test]
    fn test_pipeline_hypotheses_follow_config() {
        let config = EngineConfig {
            default_hypotheses: 1,
            ..EngineConfig::default()
        };
        let pipeline = NlPipeline::from_config(config).unwrap();
        let analysis = pipeline.analyze("Der Hund schläft unter dem Tisch.").unwrap();
        assert_eq!(analysis.hypotheses.len(), 1);
    }

    #[test]
    fn test_pipeline_missing_lexicon_is_config_error() {
        let config = EngineConfig {
            lexicon: Some("/nonexistent/lexicon.json".into()),
            ..EngineConfig::default()
        };
        assert!(matches!(
            NlPipeline::from_config(config),
            Err(crate::error::NlError::Config(_))
        ));
    }

    #[test]
    fn test_pipeline_events_streaming() {
        let pipeline = NlPipeline::new();
        let (tx, rx) = mpsc::channel();
        pipeline.analyze_streaming(
            "I can't go. やっていきましょう。",
            TokenOptions::WORDS_ONLY | TokenOptions::JOIN_CONTRACTIONS,
            tx,
        );

        let events: Vec<PipelineEvent> = rx.try_iter().collect();
        assert!(
            matches!(&events[0], PipelineEvent::TokenizationDone { total, .. } if *total == 4),
            "Primeiro evento deve ser TokenizationDone"
        );
        let sentences = events
            .iter()
            .filter(|e| matches!(e, PipelineEvent::SentenceDetected { .. }))
            .count();
        assert_eq!(sentences, 2);
        assert!(events
            .iter()
            .any(|e| matches!(e, PipelineEvent::LanguageIdentified { .. })));
        let Some(PipelineEvent::Done { analysis, .. }) = events.last() else {
            panic!("Último evento deve ser Done");
        };
        assert_eq!(analysis.words[1].token.text, "can't");
        assert_eq!(
            analysis.sentences[1].language,
            Some(Language::Japanese)
        );
    }

    #[test]
    fn test_events_serialize_with_type_tag() {
        let event = PipelineEvent::Error {
            message: "boom".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Error");
        assert_eq!(json["data"]["message"], "boom");
    }
}
