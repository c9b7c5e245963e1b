//! # Tabela de Classes de Caracteres
//!
//! O segmentador percorre o texto uma única vez e decide fronteiras olhando
//! apenas para a classe de cada cluster de grafemas. A classe de um cluster é a
//! classe do seu primeiro escalar: marcas combinantes ficam com a letra base e
//! `"\r\n"` vira uma única quebra de linha.
//!
//! | Classe        | Escalares                                         |
//! |---------------|---------------------------------------------------|
//! | `Word`        | letras e dígitos (`char::is_alphanumeric`)        |
//! | `LineBreak`   | `\n`, `\r`, VT, FF, NEL, U+2028, U+2029           |
//! | `Whitespace`  | demais espaços em branco                          |
//! | `Punctuation` | pontuação ASCII e blocos de pontuação Unicode/CJK |
//! | `Other`       | símbolos, emoji, controles                        |

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Classe de um cluster de grafemas para fins de segmentação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    Word,
    Whitespace,
    LineBreak,
    Punctuation,
    Other,
}

impl CharClass {
    /// Espaço em branco no sentido amplo (inclui quebras de linha).
    pub fn is_space(self) -> bool {
        matches!(self, CharClass::Whitespace | CharClass::LineBreak)
    }
}

/// Classifica um escalar.
pub fn classify(c: char) -> CharClass {
    if is_line_break(c) {
        CharClass::LineBreak
    } else if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() {
        CharClass::Word
    } else if is_punctuation(c) {
        CharClass::Punctuation
    } else {
        CharClass::Other
    }
}

/// Classifica um cluster de grafemas pelo seu primeiro escalar.
pub fn classify_grapheme(grapheme: &str) -> CharClass {
    grapheme
        .chars()
        .next()
        .map(classify)
        .unwrap_or(CharClass::Other)
}

/// Cluster de grafemas que começa no byte `pos` (que precisa ser fronteira de cluster).
pub(crate) fn grapheme_at(text: &str, pos: usize) -> Option<&str> {
    text.get(pos..)?.graphemes(true).next()
}

pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Apóstrofo ASCII ou aspa simples direita (U+2019), usados em contrações.
pub fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Separadores decimais/de milhar aceitos entre dois dígitos ("3.14", "1,000").
pub fn is_numeric_joiner(c: char) -> bool {
    c == '.' || c == ','
}

/// Marcas que encerram uma sentença quando seguidas de espaço ou fim de texto.
pub fn is_sentence_terminal(c: char) -> bool {
    matches!(
        c,
        '.' | '!' | '?' | '\u{2026}' | '\u{203C}' | '\u{2047}' | '\u{2048}' | '\u{2049}'
    ) || is_fullwidth_terminal(c)
}

/// Terminais CJK de largura total: encerram a sentença mesmo sem espaço depois.
pub fn is_fullwidth_terminal(c: char) -> bool {
    matches!(c, '\u{3002}' | '\u{FF01}' | '\u{FF1F}' | '\u{FF0E}')
}

/// Aspas e parênteses de fechamento que podem seguir um terminal ("fim.)").
pub fn is_closing(c: char) -> bool {
    matches!(
        c,
        '"' | '\''
            | ')'
            | ']'
            | '}'
            | '\u{BB}'
            | '\u{2019}'
            | '\u{201D}'
            | '\u{203A}'
            | '\u{300D}'
            | '\u{300F}'
            | '\u{3011}'
            | '\u{FF09}'
    )
}

pub fn is_punctuation(c: char) -> bool {
    if c.is_ascii() {
        return matches!(
            c,
            '!' | '"'
                | '#'
                | '%'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | ','
                | '-'
                | '.'
                | '/'
                | ':'
                | ';'
                | '?'
                | '@'
                | '['
                | '\\'
                | ']'
                | '_'
                | '{'
                | '}'
        );
    }
    matches!(
        c as u32,
        0x00A1
            | 0x00A7
            | 0x00AB
            | 0x00B6
            | 0x00B7
            | 0x00BB
            | 0x00BF
            | 0x2010..=0x2027
            | 0x2030..=0x205E
            | 0x2E00..=0x2E7F
            | 0x3001..=0x3003
            | 0x3008..=0x3011
            | 0x3014..=0x301F
            | 0x30FB
            | 0xFE10..=0xFE19
            | 0xFE30..=0xFE4F
            | 0xFE50..=0xFE6B
            | 0xFF01..=0xFF03
            | 0xFF05..=0xFF0A
            | 0xFF0C..=0xFF0F
            | 0xFF1A..=0xFF1B
            | 0xFF1F..=0xFF20
            | 0xFF3B..=0xFF3D
            | 0xFF3F
            | 0xFF5B
            | 0xFF5D
            | 0xFF5F..=0xFF65
    )
}
