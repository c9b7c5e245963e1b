//! # Segmentador Unicode
//!
//! Divide o texto bruto em unidades de uma granularidade escolhida
//! ([`Unit`]): palavras, sentenças, parágrafos ou o documento inteiro.
//! Cada token preserva sua posição original no texto (offsets em bytes),
//! assim quem chama pode destacar ou fatiar o texto sem copiá-lo.
//!
//! ## Esquema de Segmentação
//!
//! - **Word**: sequência máxima de letras/dígitos. Espaços formam um token por
//!   sequência; cada pontuação é um token. Apóstrofo entre letras é contração.
//! - **Sentence**: termina depois de `.`, `!`, `?` (e equivalentes) seguidos de
//!   espaço ou fim de texto, ou no fim de um parágrafo. O espaço final pertence
//!   à sentença anterior.
//! - **Paragraph**: separados por linhas em branco; se o texto não tiver
//!   nenhuma linha em branco, cada quebra de linha separa parágrafos.
//! - **Document**: um único token com o texto inteiro.
//!
//! A produção é preguiçosa: [`Segmenter::tokens`] devolve um iterador
//! ([`Tokens`]) que pode ser recriado quantas vezes for preciso.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use nl_core::tokenizer::{Segmenter, TokenOptions, Unit};
//!
//! let text = "I can't go.";
//!
//! // "I", "can't", "go"
//! let joined = Segmenter::new(Unit::Word)
//!     .with_options(TokenOptions::OMIT_WHITESPACE | TokenOptions::OMIT_PUNCTUATION | TokenOptions::JOIN_CONTRACTIONS);
//! let words: Vec<String> = joined.tokens(text).map(|t| t.text).collect();
//! assert_eq!(words, ["I", "can't", "go"]);
//!
//! // "I", "ca", "n't", "go"
//! let split = Segmenter::new(Unit::Word)
//!     .with_options(TokenOptions::OMIT_WHITESPACE | TokenOptions::OMIT_PUNCTUATION);
//! assert_eq!(split.tokens(text).count(), 4);
//! ```

use std::collections::VecDeque;
use std::ops::{BitAnd, BitOr, BitOrAssign, Range};

use serde::{Deserialize, Serialize};

use crate::boundary::{ParagraphScanner, SentenceScanner};
use crate::chars::{
    classify_grapheme, grapheme_at, is_apostrophe, is_numeric_joiner, CharClass,
};
use crate::error::Result;
use crate::text::check_range;

/// Granularidade da segmentação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Word,
    Sentence,
    Paragraph,
    /// Unidade trivial: o texto inteiro. Existe por simetria com as demais.
    Document,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Word
    }
}

/// Um modificador individual de [`TokenOptions`], usado na forma serializada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenOption {
    OmitWhitespace,
    OmitPunctuation,
    OmitOther,
    JoinContractions,
}

impl TokenOption {
    fn bits(self) -> u8 {
        match self {
            TokenOption::OmitWhitespace => TokenOptions::OMIT_WHITESPACE.0,
            TokenOption::OmitPunctuation => TokenOptions::OMIT_PUNCTUATION.0,
            TokenOption::OmitOther => TokenOptions::OMIT_OTHER.0,
            TokenOption::JoinContractions => TokenOptions::JOIN_CONTRACTIONS.0,
        }
    }

    const ALL: [TokenOption; 4] = [
        TokenOption::OmitWhitespace,
        TokenOption::OmitPunctuation,
        TokenOption::OmitOther,
        TokenOption::JoinContractions,
    ];
}

/// Conjunto de modificadores de segmentação/etiquetagem.
///
/// Só afetam a unidade [`Unit::Word`]: sentenças, parágrafos e documento
/// nunca são descartados nem recortados.
///
/// Em JSON é uma lista: `["omit_whitespace", "join_contractions"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<TokenOption>", into = "Vec<TokenOption>")]
pub struct TokenOptions(u8);

impl TokenOptions {
    pub const NONE: TokenOptions = TokenOptions(0);
    /// Descarta tokens de espaço em branco (inclui quebras de linha).
    pub const OMIT_WHITESPACE: TokenOptions = TokenOptions(1);
    /// Descarta tokens de pontuação.
    pub const OMIT_PUNCTUATION: TokenOptions = TokenOptions(1 << 1);
    /// Descarta símbolos, emoji e demais escalares sem classe.
    pub const OMIT_OTHER: TokenOptions = TokenOptions(1 << 2);
    /// Mantém contrações ("can't") como um único token.
    pub const JOIN_CONTRACTIONS: TokenOptions = TokenOptions(1 << 3);

    /// Só palavras: o que um tokenizador de palavras costuma devolver.
    pub const WORDS_ONLY: TokenOptions = TokenOptions(1 | (1 << 1) | (1 << 2));

    pub const fn contains(self, other: TokenOptions) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: TokenOptions) -> TokenOptions {
        TokenOptions(self.0 | other.0)
    }

    pub fn insert(&mut self, other: TokenOptions) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: TokenOptions) {
        self.0 &= !other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Verifica se um token deste tipo deve ser descartado.
    pub fn omits(self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Whitespace => self.contains(TokenOptions::OMIT_WHITESPACE),
            TokenKind::Punctuation => self.contains(TokenOptions::OMIT_PUNCTUATION),
            TokenKind::Other => self.contains(TokenOptions::OMIT_OTHER),
            _ => false,
        }
    }
}

impl BitOr for TokenOptions {
    type Output = TokenOptions;

    fn bitor(self, rhs: TokenOptions) -> TokenOptions {
        self.union(rhs)
    }
}

impl BitAnd for TokenOptions {
    type Output = TokenOptions;

    fn bitand(self, rhs: TokenOptions) -> TokenOptions {
        TokenOptions(self.0 & rhs.0)
    }
}

impl BitOrAssign for TokenOptions {
    fn bitor_assign(&mut self, rhs: TokenOptions) {
        self.insert(rhs);
    }
}

impl From<Vec<TokenOption>> for TokenOptions {
    fn from(options: Vec<TokenOption>) -> Self {
        TokenOptions(options.iter().fold(0, |acc, o| acc | o.bits()))
    }
}

impl From<TokenOptions> for Vec<TokenOption> {
    fn from(options: TokenOptions) -> Self {
        TokenOption::ALL
            .into_iter()
            .filter(|o| options.0 & o.bits() != 0)
            .collect()
    }
}

/// Classificação implícita de um token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    Punctuation,
    Whitespace,
    Other,
    Sentence,
    Paragraph,
    Document,
}

/// Um token extraído do texto original.
///
/// Os tokens de uma mesma segmentação nunca se sobrepõem e saem ordenados por
/// `start`. `start..end` é sempre um intervalo de bytes em fronteiras de escalar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// O texto do token (ex: "Lorem", ",", " ").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Posição do token na sequência emitida (0, 1, 2...).
    pub index: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Configuração de segmentação: unidade + opções.
///
/// Não guarda estado entre chamadas; pode ser construído uma vez e reutilizado
/// com quantos textos forem necessários.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Segmenter {
    unit: Unit,
    #[serde(default)]
    options: TokenOptions,
}

impl Segmenter {
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            options: TokenOptions::NONE,
        }
    }

    pub fn with_options(mut self, options: TokenOptions) -> Self {
        self.options = options;
        self
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn options(&self) -> TokenOptions {
        self.options
    }

    /// Itera os tokens do texto inteiro.
    pub fn tokens<'a>(&self, text: &'a str) -> Tokens<'a> {
        Tokens::new(text, 0, self.unit, self.options)
    }

    /// Itera os tokens de um trecho do texto.
    ///
    /// O trecho é segmentado como se fosse um texto independente, mas os
    /// offsets devolvidos continuam relativos ao texto completo.
    pub fn tokens_in<'a>(&self, text: &'a str, range: Range<usize>) -> Result<Tokens<'a>> {
        let range = check_range(text, range)?;
        let base = range.start;
        Ok(Tokens::new(&text[range], base, self.unit, self.options))
    }

    /// Token (sem aplicar as opções de omissão) que contém o byte `offset`.
    ///
    /// `offset == text.len()` não pertence a nenhum token.
    pub fn token_at(&self, text: &str, offset: usize) -> Result<Option<Token>> {
        check_range(text, offset..offset)?;
        let segmenter =
            Segmenter::new(self.unit).with_options(self.options & TokenOptions::JOIN_CONTRACTIONS);
        Ok(segmenter
            .tokens(text)
            .take_while(|t| t.start <= offset)
            .find(|t| t.start <= offset && offset < t.end))
    }
}

/// Segmenta `text` de uma vez, materializando todos os tokens.
pub fn segment(text: &str, unit: Unit, options: TokenOptions) -> Vec<Token> {
    Segmenter::new(unit).with_options(options).tokens(text).collect()
}

/// Só as palavras do texto, sem espaços, pontuação ou símbolos.
pub fn tokenize(text: &str) -> Vec<Token> {
    segment(text, Unit::Word, TokenOptions::WORDS_ONLY)
}

/// Iterador preguiçoso de tokens. Finito; para recomeçar basta pedir outro ao
/// [`Segmenter`].
pub struct Tokens<'a> {
    text: &'a str,
    base: usize,
    scanner: Scanner<'a>,
    options: TokenOptions,
    index: usize,
}

enum Scanner<'a> {
    Word(WordScanner<'a>),
    Sentence(SentenceScanner<'a>),
    Paragraph(ParagraphScanner<'a>),
    Document(Option<Range<usize>>),
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str, base: usize, unit: Unit, options: TokenOptions) -> Self {
        let scanner = match unit {
            Unit::Word => Scanner::Word(WordScanner::new(
                text,
                options.contains(TokenOptions::JOIN_CONTRACTIONS),
            )),
            Unit::Sentence => Scanner::Sentence(SentenceScanner::new(text)),
            Unit::Paragraph => Scanner::Paragraph(ParagraphScanner::new(text)),
            // Texto vazio não produz nenhum token, nem mesmo de documento
            Unit::Document => Scanner::Document((!text.is_empty()).then(|| 0..text.len())),
        };
        Self {
            text,
            base,
            scanner,
            options,
            index: 0,
        }
    }

    fn next_span(&mut self) -> Option<(Range<usize>, TokenKind)> {
        match &mut self.scanner {
            Scanner::Word(scanner) => scanner.next(),
            Scanner::Sentence(scanner) => scanner.next().map(|r| (r, TokenKind::Sentence)),
            Scanner::Paragraph(scanner) => scanner.next().map(|r| (r, TokenKind::Paragraph)),
            Scanner::Document(range) => range.take().map(|r| (r, TokenKind::Document)),
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let (range, kind) = self.next_span()?;
            if self.options.omits(kind) {
                continue;
            }
            let token = Token {
                text: self.text[range.clone()].to_string(),
                start: self.base + range.start,
                end: self.base + range.end,
                index: self.index,
                kind,
            };
            self.index += 1;
            return Some(token);
        }
    }
}

/// Varredura da unidade `Word`.
struct WordScanner<'a> {
    text: &'a str,
    pos: usize,
    join_contractions: bool,
    /// Pedaços de uma contração já dividida, aguardando emissão.
    pending: VecDeque<Range<usize>>,
}

impl<'a> WordScanner<'a> {
    fn new(text: &'a str, join_contractions: bool) -> Self {
        Self {
            text,
            pos: 0,
            join_contractions,
            pending: VecDeque::new(),
        }
    }

    fn next(&mut self) -> Option<(Range<usize>, TokenKind)> {
        if let Some(piece) = self.pending.pop_front() {
            return Some((piece, TokenKind::Word));
        }

        let start = self.pos;
        let grapheme = grapheme_at(self.text, start)?;
        let class = classify_grapheme(grapheme);

        match class {
            CharClass::Word => {
                let (end, apostrophes) = self.scan_word(start, grapheme);
                self.pos = end;
                if self.join_contractions || apostrophes.is_empty() {
                    return Some((start..end, TokenKind::Word));
                }
                self.pending = split_contraction(self.text, start..end, &apostrophes);
                self.pending.pop_front().map(|r| (r, TokenKind::Word))
            }
            CharClass::Whitespace | CharClass::LineBreak => {
                let mut end = start;
                while let Some(g) = grapheme_at(self.text, end) {
                    if !classify_grapheme(g).is_space() {
                        break;
                    }
                    end += g.len();
                }
                self.pos = end;
                Some((start..end, TokenKind::Whitespace))
            }
            CharClass::Punctuation => {
                self.pos = start + grapheme.len();
                Some((start..self.pos, TokenKind::Punctuation))
            }
            CharClass::Other => {
                self.pos = start + grapheme.len();
                Some((start..self.pos, TokenKind::Other))
            }
        }
    }

    /// Avança sobre uma sequência de letras/dígitos, absorvendo apóstrofos de
    /// contração e separadores numéricos. Devolve o fim e os offsets dos
    /// apóstrofos absorvidos.
    fn scan_word(&self, start: usize, first: &str) -> (usize, Vec<usize>) {
        let mut end = start + first.len();
        let mut last = first;
        let mut apostrophes = Vec::new();

        while let Some(next) = grapheme_at(self.text, end) {
            match classify_grapheme(next) {
                CharClass::Word => {
                    end += next.len();
                    last = next;
                }
                CharClass::Punctuation => {
                    let joiner = next.chars().next().unwrap_or(' ');
                    let contraction = is_apostrophe(joiner);
                    let numeric = is_numeric_joiner(joiner) && ends_with_digit(last);
                    if !contraction && !numeric {
                        break;
                    }
                    let after_start = end + next.len();
                    let Some(after) = grapheme_at(self.text, after_start) else {
                        break;
                    };
                    let continues = classify_grapheme(after) == CharClass::Word
                        && (contraction || starts_with_digit(after));
                    if !continues {
                        break;
                    }
                    if contraction {
                        apostrophes.push(end);
                    }
                    end = after_start + after.len();
                    last = after;
                }
                _ => break,
            }
        }
        (end, apostrophes)
    }
}

fn ends_with_digit(s: &str) -> bool {
    s.chars().next_back().is_some_and(char::is_numeric)
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_numeric)
}

/// Divide uma contração no estilo Penn Treebank: o apóstrofo abre o pedaço da
/// direita ("I" + "'m"), exceto em "n't", onde o `n` vai junto ("ca" + "n't").
fn split_contraction(text: &str, word: Range<usize>, apostrophes: &[usize]) -> VecDeque<Range<usize>> {
    let mut pieces = VecDeque::new();
    let mut piece_start = word.start;

    for (i, &apostrophe) in apostrophes.iter().enumerate() {
        let right_end = apostrophes.get(i + 1).copied().unwrap_or(word.end);
        let right = &text[apostrophe..right_end];
        let after_apostrophe = right.chars().skip(1).collect::<String>();
        let before = text[..apostrophe].chars().next_back();

        let mut split = apostrophe;
        if matches!(before, Some('n' | 'N')) && after_apostrophe.eq_ignore_ascii_case("t") {
            split -= 1;
        }
        if split <= piece_start {
            continue;
        }
        pieces.push_back(piece_start..split);
        piece_start = split;
    }
    pieces.push_back(piece_start..word.end);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_word_runs_and_separators() {
        let tokens = segment("Hi, you!", Unit::Word, TokenOptions::NONE);
        assert_eq!(texts(&tokens), ["Hi", ",", " ", "you", "!"]);
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[1].kind, TokenKind::Punctuation);
        assert_eq!(tokens[2].kind, TokenKind::Whitespace);
        assert_eq!(tokens[4].index, 4);
    }

    #[test]
    fn test_whitespace_run_is_one_token() {
        let tokens = segment("a \t\n b", Unit::Word, TokenOptions::NONE);
        assert_eq!(texts(&tokens), ["a", " \t\n ", "b"]);
    }

    #[test]
    fn test_omit_options() {
        let text = "Hi, you! :+)";
        let words = segment(text, Unit::Word, TokenOptions::WORDS_ONLY);
        assert_eq!(texts(&words), ["Hi", "you"]);

        let with_other = segment(
            text,
            Unit::Word,
            TokenOptions::OMIT_WHITESPACE | TokenOptions::OMIT_PUNCTUATION,
        );
        assert_eq!(texts(&with_other), ["Hi", "you", "+"]);
    }

    #[test]
    fn test_contractions() {
        let split = tokenize("can't");
        assert_eq!(texts(&split), ["ca", "n't"]);

        let joined = segment(
            "can't",
            Unit::Word,
            TokenOptions::WORDS_ONLY | TokenOptions::JOIN_CONTRACTIONS,
        );
        assert_eq!(texts(&joined), ["can't"]);

        assert_eq!(texts(&tokenize("I'm")), ["I", "'m"]);
        assert_eq!(texts(&tokenize("don\u{2019}t")), ["do", "n\u{2019}t"]);
        assert_eq!(texts(&tokenize("rock'n'roll")), ["rock", "'n", "'roll"]);
    }

    #[test]
    fn test_dangling_apostrophe_is_punctuation() {
        let tokens = segment("dogs' 'quoted'", Unit::Word, TokenOptions::OMIT_WHITESPACE);
        assert_eq!(texts(&tokens), ["dogs", "'", "'", "quoted", "'"]);
    }

    #[test]
    fn test_numbers_keep_separators() {
        assert_eq!(texts(&tokenize("pi is 3.14, 1,000 times.")), ["pi", "is", "3.14", "1,000", "times"]);
    }

    #[test]
    fn test_combining_marks_stay_in_word() {
        let text = "cafe\u{301} ok";
        assert_eq!(texts(&tokenize(text)), ["cafe\u{301}", "ok"]);
    }

    #[test]
    fn test_document_unit() {
        let tokens = segment("a b.\n\nc", Unit::Document, TokenOptions::WORDS_ONLY);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "a b.\n\nc");
        assert_eq!(tokens[0].kind, TokenKind::Document);
    }

    #[test]
    fn test_empty_input_yields_nothing_for_every_unit() {
        for unit in [Unit::Word, Unit::Sentence, Unit::Paragraph, Unit::Document] {
            assert!(segment("", unit, TokenOptions::NONE).is_empty(), "{unit:?}");
        }
    }

    #[test]
    fn test_whitespace_only_with_omit() {
        assert!(segment("  \n\t ", Unit::Word, TokenOptions::OMIT_WHITESPACE).is_empty());
    }

    #[test]
    fn test_tokens_in_keeps_absolute_offsets() {
        let text = "alpha beta gamma";
        let segmenter = Segmenter::new(Unit::Word).with_options(TokenOptions::WORDS_ONLY);
        let tokens: Vec<Token> = segmenter.tokens_in(text, 6..16).unwrap().collect();
        assert_eq!(texts(&tokens), ["beta", "gamma"]);
        assert_eq!(tokens[0].range(), 6..10);
        assert_eq!(&text[tokens[1].range()], "gamma");
    }

    #[test]
    fn test_tokens_in_rejects_bad_range() {
        let segmenter = Segmenter::new(Unit::Word);
        assert!(segmenter.tokens_in("é", 0..1).is_err());
        assert!(segmenter.tokens_in("abc", 0..9).is_err());
    }

    #[test]
    fn test_token_at() {
        let text = "one two";
        let segmenter = Segmenter::new(Unit::Word).with_options(TokenOptions::WORDS_ONLY);
        assert_eq!(segmenter.token_at(text, 5).unwrap().unwrap().text, "two");
        // o espaço também é token quando se procura por offset
        assert_eq!(segmenter.token_at(text, 3).unwrap().unwrap().text, " ");
        assert!(segmenter.token_at(text, 7).unwrap().is_none());
        assert!(segmenter.token_at(text, 8).is_err());
    }

    #[test]
    fn test_iterator_is_restartable() {
        let segmenter = Segmenter::new(Unit::Word);
        let first: Vec<Token> = segmenter.tokens("a b").collect();
        let second: Vec<Token> = segmenter.tokens("a b").collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_options_serde_roundtrip_names() {
        let options = TokenOptions::OMIT_WHITESPACE | TokenOptions::JOIN_CONTRACTIONS;
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"["omit_whitespace","join_contractions"]"#);
        let back: TokenOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
        assert!(back.contains(TokenOptions::JOIN_CONTRACTIONS));
        assert!(!back.contains(TokenOptions::OMIT_PUNCTUATION));
    }
}
