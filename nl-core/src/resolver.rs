//! # Resolvedores de Tags
//!
//! Implementações de [`TagResolver`] que acompanham o crate:
//!
//! - [`IntrinsicResolver`]: esquemas que se deduzem do próprio texto, sem dados
//!   treinados (TokenType, Script, Language).
//! - [`LexiconResolver`]: dicionário `(esquema, forma) → tag`, carregado de JSON.
//!   Serve para lemas, classes gramaticais e tipos de nome fornecidos por quem
//!   chama (ou por fixtures de teste).
//! - [`ChainResolver`]: consulta uma lista de resolvedores e fica com a
//!   primeira resposta não vazia.
//!
//! ## Formato do Léxico
//!
//! ```json
//! {
//!   "Lemma":        { "went": "go", "tickets": "ticket" },
//!   "LexicalClass": { "go": "Verb", "ticket": "Noun" },
//!   "NameType":     { "jose": "PlaceName" }
//! }
//! ```
//!
//! As formas são comparadas em minúsculas.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::Error as _;

use crate::error::Result;
use crate::recognizer::LanguageRecognizer;
use crate::script::dominant_script;
use crate::tagger::{Tag, TagRequest, TagResolver, TagScheme};
use crate::tokenizer::TokenKind;

/// Resolve TokenType, Script e Language olhando só para o texto.
#[derive(Debug, Clone, Default)]
pub struct IntrinsicResolver {
    recognizer: LanguageRecognizer,
}

impl IntrinsicResolver {
    pub fn new(recognizer: LanguageRecognizer) -> Self {
        Self { recognizer }
    }
}

impl TagResolver for IntrinsicResolver {
    fn resolve(&self, request: &TagRequest<'_>) -> Option<Tag> {
        match request.scheme {
            TagScheme::TokenType => {
                let value = match request.token.kind {
                    TokenKind::Word => "Word",
                    TokenKind::Punctuation => "Punctuation",
                    TokenKind::Whitespace => "Whitespace",
                    TokenKind::Other => "OtherWord",
                    _ => return None,
                };
                Some(Tag::from(value))
            }
            TagScheme::Script => {
                dominant_script(request.token_text()).map(|script| Tag::from(script.code()))
            }
            TagScheme::Language => self
                .recognizer
                .identify(request.sentence_text())
                .map(|language| Tag::from(language.code())),
            _ => None,
        }
    }
}

/// Dicionário de tags por esquema e forma (em minúsculas).
#[derive(Debug, Clone, Default)]
pub struct LexiconResolver {
    entries: HashMap<TagScheme, HashMap<String, Tag>>,
}

impl LexiconResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carrega um léxico em JSON (ver o formato no topo do módulo).
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)?;
        let mut lexicon = Self::new();
        for (scheme_name, forms) in raw {
            let scheme = TagScheme::from_raw(&scheme_name).ok_or_else(|| {
                serde_json::Error::custom(format!("unknown tag scheme `{scheme_name}`"))
            })?;
            for (form, tag) in forms {
                lexicon.insert(scheme, &form, tag);
            }
        }
        Ok(lexicon)
    }

    pub fn insert(&mut self, scheme: TagScheme, form: &str, tag: impl Into<Tag>) {
        self.entries
            .entry(scheme)
            .or_default()
            .insert(form.to_lowercase(), tag.into());
    }

    /// Versão encadeável de [`LexiconResolver::insert`].
    pub fn with_entry(mut self, scheme: TagScheme, form: &str, tag: impl Into<Tag>) -> Self {
        self.insert(scheme, form, tag);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, scheme: TagScheme, form: &str) -> Option<Tag> {
        self.entries.get(&scheme)?.get(form).cloned()
    }
}

impl TagResolver for LexiconResolver {
    fn resolve(&self, request: &TagRequest<'_>) -> Option<Tag> {
        if self.entries.is_empty() {
            return None;
        }
        let form = request.token_text().to_lowercase();
        match request.scheme {
            TagScheme::NameTypeOrLexicalClass => self
                .lookup(TagScheme::NameTypeOrLexicalClass, &form)
                .or_else(|| self.lookup(TagScheme::NameType, &form))
                .or_else(|| self.lookup(TagScheme::LexicalClass, &form)),
            scheme => self.lookup(scheme, &form),
        }
    }
}

/// Lista ordenada de resolvedores; vence a primeira tag não vazia.
#[derive(Clone, Default)]
pub struct ChainResolver {
    resolvers: Vec<Arc<dyn TagResolver>>,
}

impl ChainResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: impl TagResolver + 'static) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    pub fn push(&mut self, resolver: Arc<dyn TagResolver>) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl TagResolver for ChainResolver {
    fn resolve(&self, request: &TagRequest<'_>) -> Option<Tag> {
        self.resolvers
            .iter()
            .filter_map(|resolver| resolver.resolve(request))
            .find(|tag| !tag.is_empty())
    }
}
