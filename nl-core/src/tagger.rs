//! # Etiquetagem de Tokens
//!
//! O [`Tagger`] segmenta o texto e pergunta a um [`TagResolver`] qual a tag de
//! cada token num **esquema** ([`TagScheme`]). O tagger cuida da segmentação,
//! das opções, dos intervalos e do contexto de sentença; quem sabe *o que* é a
//! tag é o resolvedor.
//!
//! ## Esquemas
//!
//! | Esquema                  | Valor bruto                | Resolvedor padrão         |
//! |--------------------------|----------------------------|---------------------------|
//! | `TokenType`              | `"TokenType"`              | intrínseco                |
//! | `Script`                 | `"Script"`                 | intrínseco (ISO 15924)    |
//! | `Language`               | `"Language"`               | intrínseco (por sentença) |
//! | `Lemma`                  | `"Lemma"`                  | léxico                    |
//! | `LexicalClass`           | `"LexicalClass"`           | léxico                    |
//! | `NameType`               | `"NameType"`               | léxico                    |
//! | `NameTypeOrLexicalClass` | `"NameTypeOrLexicalClass"` | léxico                    |
//!
//! Tokens sem tag (resolvedor devolve `None` ou tag vazia) não aparecem no
//! resultado.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use nl_core::tagger::{TagScheme, Tagger};
//! use nl_core::tokenizer::{TokenOptions, Unit};
//!
//! let tagger = Tagger::new(&[TagScheme::Language, TagScheme::TokenType]);
//! let text = "I can't go San Jose this year due to not have my ticket.";
//! let options = TokenOptions::OMIT_WHITESPACE | TokenOptions::OMIT_PUNCTUATION | TokenOptions::JOIN_CONTRACTIONS;
//!
//! let tags = tagger.tags(text, Unit::Word, TagScheme::Language, options).unwrap();
//! assert_eq!(tags[1].text, "can't");
//! assert!(tags.iter().all(|t| t.tag.as_str() == "en"));
//! ```

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{NlError, Result};
use crate::resolver::{ChainResolver, IntrinsicResolver, LexiconResolver};
use crate::text::check_range;
use crate::tokenizer::{Segmenter, Token, TokenOptions, Unit};

/// Esquema de etiquetagem. A forma serializada é o valor bruto (`"LexicalClass"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TagScheme {
    Language,
    Lemma,
    LexicalClass,
    NameType,
    NameTypeOrLexicalClass,
    TokenType,
    Script,
}

impl TagScheme {
    pub const ALL: [TagScheme; 7] = [
        TagScheme::Language,
        TagScheme::Lemma,
        TagScheme::LexicalClass,
        TagScheme::NameTypeOrLexicalClass,
        TagScheme::NameType,
        TagScheme::TokenType,
        TagScheme::Script,
    ];

    pub fn raw_value(self) -> &'static str {
        match self {
            TagScheme::Language => "Language",
            TagScheme::Lemma => "Lemma",
            TagScheme::LexicalClass => "LexicalClass",
            TagScheme::NameType => "NameType",
            TagScheme::NameTypeOrLexicalClass => "NameTypeOrLexicalClass",
            TagScheme::TokenType => "TokenType",
            TagScheme::Script => "Script",
        }
    }

    /// Esquemas cuja tag depende só da sentença, não da palavra: o tagger
    /// resolve uma vez por sentença e repete a tag nas palavras dela.
    pub fn is_sentence_level(self) -> bool {
        matches!(self, TagScheme::Language)
    }

    /// Tenta parsear a partir do valor bruto (ex: "TokenType" → Some(TokenType))
    pub fn from_raw(raw: &str) -> Option<Self> {
        TagScheme::ALL.into_iter().find(|s| s.raw_value() == raw)
    }
}

impl fmt::Display for TagScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw_value())
    }
}

/// Uma tag: texto curto e opaco ("en", "Noun", "Latn", "Word").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tudo o que um resolvedor recebe para decidir a tag de um token.
#[derive(Debug, Clone)]
pub struct TagRequest<'a> {
    /// Texto completo; offsets de `token` e `sentence` são relativos a ele.
    pub text: &'a str,
    pub token: &'a Token,
    /// Sentença que contém o token (para tokens maiores que sentenças, o próprio token).
    pub sentence: Range<usize>,
    pub scheme: TagScheme,
}

impl<'a> TagRequest<'a> {
    pub fn token_text(&self) -> &'a str {
        &self.text[self.token.range()]
    }

    pub fn sentence_text(&self) -> &'a str {
        &self.text[self.sentence.clone()]
    }
}

/// Colaborador que sabe etiquetar tokens.
///
/// Implementações precisam ser puras: a mesma requisição sempre produz a mesma
/// resposta. `None` significa "sem tag". Para esquemas de nível de sentença
/// ([`TagScheme::is_sentence_level`]) a resposta deve depender só de
/// `request.sentence`, pois o tagger a reaproveita nas demais palavras.
pub trait TagResolver: Send + Sync {
    fn resolve(&self, request: &TagRequest<'_>) -> Option<Tag>;
}

/// Um token etiquetado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedRange {
    pub tag: Tag,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl TaggedRange {
    fn new(tag: Tag, token: &Token) -> Self {
        Self {
            tag,
            start: token.start,
            end: token.end,
            text: token.text.clone(),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Etiquetador: esquemas declarados + resolvedor.
///
/// Pedir um esquema que não foi declarado na construção devolve
/// [`NlError::UnsupportedScheme`].
#[derive(Clone)]
pub struct Tagger {
    schemes: Vec<TagScheme>,
    resolver: Arc<dyn TagResolver>,
}

impl fmt::Debug for Tagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tagger").field("schemes", &self.schemes).finish()
    }
}

impl Tagger {
    /// Tagger com o resolvedor padrão: intrínseco, depois léxico vazio.
    pub fn new(schemes: &[TagScheme]) -> Self {
        let resolver = ChainResolver::new()
            .with(IntrinsicResolver::default())
            .with(LexiconResolver::default());
        Self::with_resolver(schemes, Arc::new(resolver))
    }

    pub fn with_resolver(schemes: &[TagScheme], resolver: Arc<dyn TagResolver>) -> Self {
        let mut declared: Vec<TagScheme> = Vec::with_capacity(schemes.len());
        for &scheme in schemes {
            if !declared.contains(&scheme) {
                declared.push(scheme);
            }
        }
        Self {
            schemes: declared,
            resolver,
        }
    }

    pub fn schemes(&self) -> &[TagScheme] {
        &self.schemes
    }

    /// Tags de todos os tokens do texto, na ordem do texto.
    pub fn tags(
        &self,
        text: &str,
        unit: Unit,
        scheme: TagScheme,
        options: TokenOptions,
    ) -> Result<Vec<TaggedRange>> {
        self.tags_in(text, 0..text.len(), unit, scheme, options)
    }

    /// Tags dos tokens de um trecho; offsets continuam relativos ao texto completo.
    pub fn tags_in(
        &self,
        text: &str,
        range: Range<usize>,
        unit: Unit,
        scheme: TagScheme,
        options: TokenOptions,
    ) -> Result<Vec<TaggedRange>> {
        let mut tags = Vec::new();
        self.walk(text, range, unit, scheme, options, |tagged| {
            tags.push(tagged.clone());
            true
        })?;
        Ok(tags)
    }

    /// Percorre as tags em ordem, parando quando `visit` devolve `false`.
    pub fn enumerate_tags<F>(
        &self,
        text: &str,
        unit: Unit,
        scheme: TagScheme,
        options: TokenOptions,
        visit: F,
    ) -> Result<()>
    where
        F: FnMut(&TaggedRange) -> bool,
    {
        self.walk(text, 0..text.len(), unit, scheme, options, visit)
    }

    /// Tag do token que contém o byte `offset` (sem opções de omissão).
    pub fn tag_at(
        &self,
        text: &str,
        offset: usize,
        unit: Unit,
        scheme: TagScheme,
    ) -> Result<Option<TaggedRange>> {
        self.check_scheme(scheme)?;
        let Some(token) = Segmenter::new(unit).token_at(text, offset)? else {
            return Ok(None);
        };
        let sentences = SentenceIndex::new(text, unit);
        Ok(self
            .resolve_tag(text, &token, sentences.enclosing(&token), scheme)
            .map(|tag| TaggedRange::new(tag, &token)))
    }

    /// Todas as tags de todos os esquemas declarados, esquema a esquema.
    pub fn tags_for_all_schemes(
        &self,
        text: &str,
        unit: Unit,
        options: TokenOptions,
    ) -> Result<Vec<(TagScheme, Vec<TaggedRange>)>> {
        self.schemes
            .iter()
            .map(|&scheme| Ok((scheme, self.tags(text, unit, scheme, options)?)))
            .collect()
    }

    fn check_scheme(&self, scheme: TagScheme) -> Result<()> {
        if self.schemes.contains(&scheme) {
            Ok(())
        } else {
            Err(NlError::UnsupportedScheme(scheme))
        }
    }

    fn walk<F>(
        &self,
        text: &str,
        range: Range<usize>,
        unit: Unit,
        scheme: TagScheme,
        options: TokenOptions,
        mut visit: F,
    ) -> Result<()>
    where
        F: FnMut(&TaggedRange) -> bool,
    {
        self.check_scheme(scheme)?;
        let range = check_range(text, range)?;
        let sentences = SentenceIndex::new(text, unit);
        let segmenter = Segmenter::new(unit).with_options(options);

        // Última sentença resolvida, para esquemas de nível de sentença
        let mut cached: Option<(Range<usize>, Option<Tag>)> = None;

        for token in segmenter.tokens_in(text, range)? {
            let sentence = sentences.enclosing(&token);
            let reused = match &cached {
                Some((cached_sentence, tag)) if *cached_sentence == sentence => Some(tag.clone()),
                _ => None,
            };
            let tag = match reused {
                Some(tag) => tag,
                None => {
                    let tag = self.resolve_tag(text, &token, sentence.clone(), scheme);
                    if scheme.is_sentence_level() {
                        cached = Some((sentence, tag.clone()));
                    }
                    tag
                }
            };
            if let Some(tag) = tag {
                if !visit(&TaggedRange::new(tag, &token)) {
                    break;
                }
            }
        }
        Ok(())
    }

    fn resolve_tag(
        &self,
        text: &str,
        token: &Token,
        sentence: Range<usize>,
        scheme: TagScheme,
    ) -> Option<Tag> {
        let request = TagRequest {
            text,
            token,
            sentence,
            scheme,
        };
        self.resolver.resolve(&request).filter(|tag| !tag.is_empty())
    }
}

/// Sentenças do texto completo, para achar o contexto de cada palavra.
struct SentenceIndex {
    ranges: Vec<Range<usize>>,
}

impl SentenceIndex {
    fn new(text: &str, unit: Unit) -> Self {
        // Só palavras precisam de contexto; unidades maiores são o próprio contexto
        let ranges = match unit {
            Unit::Word => Segmenter::new(Unit::Sentence)
                .tokens(text)
                .map(|t| t.range())
                .collect(),
            _ => Vec::new(),
        };
        Self { ranges }
    }

    fn enclosing(&self, token: &Token) -> Range<usize> {
        let i = self.ranges.partition_point(|r| r.end <= token.start);
        match self.ranges.get(i) {
            Some(r) if r.start <= token.start => r.clone(),
            _ => token.range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LexiconResolver;

    const WORDS: TokenOptions = TokenOptions::OMIT_WHITESPACE.union(TokenOptions::OMIT_PUNCTUATION);

    fn texts(tags: &[TaggedRange]) -> Vec<&str> {
        tags.iter().map(|t| t.text.as_str()).collect()
    }

    fn values(tags: &[TaggedRange]) -> Vec<&str> {
        tags.iter().map(|t| t.tag.as_str()).collect()
    }

    #[test]
    fn test_scheme_raw_values_roundtrip() {
        for scheme in TagScheme::ALL {
            assert_eq!(TagScheme::from_raw(scheme.raw_value()), Some(scheme));
            let json = serde_json::to_string(&scheme).unwrap();
            assert_eq!(json, format!("\"{}\"", scheme.raw_value()));
        }
        assert_eq!(TagScheme::from_raw("lemma"), None);
    }

    #[test]
    fn test_token_type_tags() {
        let tagger = Tagger::new(&[TagScheme::TokenType]);
        let tags = tagger
            .tags("Hi, you +", Unit::Word, TagScheme::TokenType, TokenOptions::NONE)
            .unwrap();
        assert_eq!(texts(&tags), ["Hi", ",", " ", "you", " ", "+"]);
        assert_eq!(
            values(&tags),
            ["Word", "Punctuation", "Whitespace", "Word", "Whitespace", "OtherWord"]
        );
    }

    #[test]
    fn test_undeclared_scheme_is_an_error() {
        let tagger = Tagger::new(&[TagScheme::Language]);
        let err = tagger
            .tags("text", Unit::Word, TagScheme::Lemma, TokenOptions::NONE)
            .unwrap_err();
        assert!(matches!(err, NlError::UnsupportedScheme(TagScheme::Lemma)));
        assert!(tagger.tag_at("text", 0, Unit::Word, TagScheme::Script).is_err());
    }

    #[test]
    fn test_missing_tags_are_filtered() {
        // léxico vazio: nenhum lema conhecido
        let tagger = Tagger::new(&[TagScheme::Lemma]);
        let tags = tagger.tags("went home", Unit::Word, TagScheme::Lemma, WORDS).unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_lexicon_resolver_feeds_tags() {
        let lexicon = LexiconResolver::default()
            .with_entry(TagScheme::Lemma, "went", "go")
            .with_entry(TagScheme::Lemma, "home", "home");
        let tagger = Tagger::with_resolver(&[TagScheme::Lemma], Arc::new(lexicon));
        let tags = tagger.tags("Went home.", Unit::Word, TagScheme::Lemma, WORDS).unwrap();
        assert_eq!(values(&tags), ["go", "home"]);
        assert_eq!(tags[0].range(), 0..4);
    }

    #[test]
    fn test_language_tag_uses_enclosing_sentence() {
        let tagger = Tagger::new(&[TagScheme::Language]);
        let text = "The weather is nice today. Der Hund schläft unter dem Tisch in der Küche.";
        let tags = tagger.tags(text, Unit::Word, TagScheme::Language, WORDS).unwrap();
        assert_eq!(tags.first().map(|t| t.tag.as_str()), Some("en"));
        assert_eq!(tags.last().map(|t| t.tag.as_str()), Some("de"));
        let hund = tags.iter().find(|t| t.text == "Hund").unwrap();
        assert_eq!(hund.tag.as_str(), "de");
    }

    /// Conta quantas vezes o resolvedor é consultado.
    #[derive(Default)]
    struct CountingResolver {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl TagResolver for CountingResolver {
        fn resolve(&self, request: &TagRequest<'_>) -> Option<Tag> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            Some(Tag::new(format!("s{}", request.sentence.start)))
        }
    }

    #[test]
    fn test_sentence_level_scheme_resolves_once_per_sentence() {
        let resolver = Arc::new(CountingResolver::default());
        let tagger = Tagger::with_resolver(&[TagScheme::Language, TagScheme::Lemma], resolver.clone());
        let text = "one two three four. five six seven";

        let tags = tagger.tags(text, Unit::Word, TagScheme::Language, WORDS).unwrap();
        assert_eq!(tags.len(), 7);
        assert_eq!(values(&tags), ["s0", "s0", "s0", "s0", "s20", "s20", "s20"]);
        assert_eq!(resolver.calls.load(std::sync::atomic::Ordering::Relaxed), 2);

        // esquemas de palavra continuam consultando token a token
        tagger.tags(text, Unit::Word, TagScheme::Lemma, WORDS).unwrap();
        assert_eq!(resolver.calls.load(std::sync::atomic::Ordering::Relaxed), 9);
    }

    #[test]
    fn test_long_unpunctuated_text_tags_in_one_pass() {
        let tagger = Tagger::new(&[TagScheme::Language]);
        let text = "the weather is nice today ".repeat(2000);
        let tags = tagger.tags(&text, Unit::Word, TagScheme::Language, WORDS).unwrap();
        assert_eq!(tags.len(), 10_000);
        assert!(tags.iter().all(|t| t.tag.as_str() == "en"));
    }

    #[test]
    fn test_sentence_unit_tags() {
        let tagger = Tagger::new(&[TagScheme::Language, TagScheme::TokenType]);
        let text = "The weather is nice today. やっていきましょう。";
        let tags = tagger
            .tags(text, Unit::Sentence, TagScheme::Language, TokenOptions::NONE)
            .unwrap();
        assert_eq!(values(&tags), ["en", "ja"]);
        // tipo de token só existe para palavras
        let types = tagger
            .tags(text, Unit::Sentence, TagScheme::TokenType, TokenOptions::NONE)
            .unwrap();
        assert!(types.is_empty());
    }

    #[test]
    fn test_tags_in_range() {
        let tagger = Tagger::new(&[TagScheme::Script]);
        let text = "hello мир world";
        let tags = tagger
            .tags_in(text, 6..text.len(), Unit::Word, TagScheme::Script, WORDS)
            .unwrap();
        assert_eq!(texts(&tags), ["мир", "world"]);
        assert_eq!(values(&tags), ["Cyrl", "Latn"]);
        assert_eq!(tags[0].start, 6);
        assert!(tagger
            .tags_in(text, 0..99, Unit::Word, TagScheme::Script, WORDS)
            .is_err());
    }

    #[test]
    fn test_enumerate_tags_stops_early() {
        let tagger = Tagger::new(&[TagScheme::TokenType]);
        let mut seen = Vec::new();
        tagger
            .enumerate_tags("a b c d", Unit::Word, TagScheme::TokenType, WORDS, |tagged| {
                seen.push(tagged.text.clone());
                seen.len() < 2
            })
            .unwrap();
        assert_eq!(seen, ["a", "b"]);
    }

    #[test]
    fn test_enumerate_matches_tags() {
        let tagger = Tagger::new(&[TagScheme::TokenType]);
        let text = "One, two; three!";
        let collected = tagger
            .tags(text, Unit::Word, TagScheme::TokenType, TokenOptions::NONE)
            .unwrap();
        let mut walked = Vec::new();
        tagger
            .enumerate_tags(text, Unit::Word, TagScheme::TokenType, TokenOptions::NONE, |t| {
                walked.push(t.clone());
                true
            })
            .unwrap();
        assert_eq!(collected, walked);
    }

    #[test]
    fn test_tag_at() {
        let tagger = Tagger::new(&[TagScheme::TokenType]);
        let tagged = tagger
            .tag_at("one two", 4, Unit::Word, TagScheme::TokenType)
            .unwrap()
            .unwrap();
        assert_eq!(tagged.text, "two");
        assert_eq!(tagged.tag.as_str(), "Word");
        assert!(tagger
            .tag_at("one two", 7, Unit::Word, TagScheme::TokenType)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_tags_for_all_schemes() {
        let tagger = Tagger::new(&[TagScheme::TokenType, TagScheme::Script]);
        let all = tagger.tags_for_all_schemes("Hi there", Unit::Word, WORDS).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, TagScheme::TokenType);
        assert_eq!(values(&all[1].1), ["Latn", "Latn"]);
    }
}
