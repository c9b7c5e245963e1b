//! # Fronteiras de Sentença e Parágrafo
//!
//! Regras usadas pelas unidades `Sentence` e `Paragraph` do segmentador.
//! Ambas percorrem o texto uma vez, por clusters de grafemas, e produzem
//! intervalos de bytes contíguos.
//!
//! ## Política de Parágrafos
//!
//! A política é fixa e vale para qualquer documento:
//!
//! 1. Se o texto contém pelo menos uma **linha em branco** (duas quebras de
//!    linha separadas apenas por espaços horizontais), os parágrafos são
//!    separados por linhas em branco; quebras simples ficam dentro do parágrafo.
//! 2. Caso contrário, **cada quebra de linha** separa parágrafos.
//!
//! O parágrafo inclui a quebra de linha que termina sua última linha. As
//! linhas em branco seguintes não pertencem a nenhum token.
//!
//! Uma sentença sem pontuação final termina no fim do parágrafo; quebras de
//! linha internas ao parágrafo não a encerram.

use std::ops::Range;

use crate::chars::{
    classify_grapheme, grapheme_at, is_closing, is_fullwidth_terminal, is_line_break,
    is_sentence_terminal, CharClass,
};

/// Abreviações cujo ponto não encerra a sentença (comparação em minúsculas).
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "dra", "prof", "profa", "sr", "sra", "jr", "st", "mt", "vs", "etc",
    "e.g", "i.e", "inc", "ltd", "corp", "approx", "dept", "fig", "av", "gov", "gen", "sen", "rep",
];

/// Comprimento da maior entrada de `ABBREVIATIONS`; limita a volta atrás.
const LONGEST_ABBREVIATION: usize = 6;

/// Varredura da unidade `Sentence`.
pub(crate) struct SentenceScanner<'a> {
    text: &'a str,
    pos: usize,
    blank_line_separated: bool,
}

impl<'a> SentenceScanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            blank_line_separated: has_blank_line(text),
        }
    }

    pub(crate) fn next(&mut self) -> Option<Range<usize>> {
        let start = self.pos;
        let mut cursor = start;
        // Espaço antes do primeiro caractere visível pertence à sentença seguinte
        let mut has_content = false;

        while let Some(grapheme) = grapheme_at(self.text, cursor) {
            let c = grapheme.chars().next().unwrap_or(' ');
            let class = classify_grapheme(grapheme);

            if is_sentence_terminal(c) && !is_abbreviation(self.text, cursor, c) {
                let mut end = cursor + grapheme.len();
                let mut fullwidth = is_fullwidth_terminal(c);
                while let Some(next) = grapheme_at(self.text, end) {
                    let n = next.chars().next().unwrap_or(' ');
                    if !(is_sentence_terminal(n) || is_closing(n)) {
                        break;
                    }
                    fullwidth |= is_fullwidth_terminal(n);
                    end += next.len();
                }
                match grapheme_at(self.text, end) {
                    None => return self.emit(start, end),
                    Some(next) if classify_grapheme(next).is_space() => {
                        let end = skip_spaces(self.text, end);
                        return self.emit(start, end);
                    }
                    Some(_) if fullwidth => return self.emit(start, end),
                    Some(_) => {
                        has_content = true;
                        cursor = end;
                    }
                }
            } else if class == CharClass::LineBreak
                && has_content
                && self.ends_paragraph(cursor + grapheme.len())
            {
                let end = skip_spaces(self.text, cursor);
                return self.emit(start, end);
            } else {
                has_content |= !class.is_space();
                cursor += grapheme.len();
            }
        }

        // Fim do texto: o que sobrou é uma sentença, a menos que seja só espaço
        self.pos = self.text.len();
        (has_content && start < self.text.len()).then(|| start..self.text.len())
    }

    /// A quebra que termina em `after` fecha um parágrafo? Só quando a linha
    /// seguinte é branca, a menos que cada quebra separe parágrafos.
    fn ends_paragraph(&self, after: usize) -> bool {
        if !self.blank_line_separated {
            return true;
        }
        is_blank(&self.text[after..line_end(self.text, after)])
    }

    fn emit(&mut self, start: usize, end: usize) -> Option<Range<usize>> {
        self.pos = end;
        Some(start..end)
    }
}

/// O ponto em `dot` fecha uma abreviação conhecida ("Dr.", "e.g.")?
fn is_abbreviation(text: &str, dot: usize, c: char) -> bool {
    if c != '.' {
        return false;
    }
    let before = &text[..dot];
    let mut len = 0;
    let mut word_start = dot;
    for (i, ch) in before.char_indices().rev() {
        if !(ch.is_alphabetic() || ch == '.') {
            break;
        }
        len += 1;
        if len > LONGEST_ABBREVIATION {
            return false;
        }
        word_start = i;
    }
    let word = before[word_start..].to_lowercase();
    !word.is_empty() && ABBREVIATIONS.contains(&word.as_str())
}

/// Avança sobre espaços e quebras de linha a partir de `pos`.
fn skip_spaces(text: &str, mut pos: usize) -> usize {
    while let Some(grapheme) = grapheme_at(text, pos) {
        if !classify_grapheme(grapheme).is_space() {
            break;
        }
        pos += grapheme.len();
    }
    pos
}

/// Uma linha: do início até depois da sua quebra (ou o fim do texto).
fn line_end(text: &str, mut pos: usize) -> usize {
    while let Some(grapheme) = grapheme_at(text, pos) {
        pos += grapheme.len();
        if classify_grapheme(grapheme) == CharClass::LineBreak {
            break;
        }
    }
    pos
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// O texto tem pelo menos uma linha em branco entre duas quebras de linha?
pub(crate) fn has_blank_line(text: &str) -> bool {
    let mut pos = 0;
    let mut after_break = false;
    while pos < text.len() {
        let end = line_end(text, pos);
        let line = &text[pos..end];
        let ends_with_break = line.chars().next_back().is_some_and(is_line_break);
        if after_break && ends_with_break && is_blank(line) {
            return true;
        }
        after_break = ends_with_break;
        pos = end;
    }
    false
}

/// Varredura da unidade `Paragraph`.
pub(crate) struct ParagraphScanner<'a> {
    text: &'a str,
    pos: usize,
    blank_line_separated: bool,
}

impl<'a> ParagraphScanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            blank_line_separated: has_blank_line(text),
        }
    }

    pub(crate) fn next(&mut self) -> Option<Range<usize>> {
        // Pula linhas em branco (separadores ou espaço no início/fim)
        while self.pos < self.text.len() {
            let end = line_end(self.text, self.pos);
            if !is_blank(&self.text[self.pos..end]) {
                break;
            }
            self.pos = end;
        }
        if self.pos >= self.text.len() {
            return None;
        }

        let start = self.pos;
        self.pos = line_end(self.text, self.pos);
        if self.blank_line_separated {
            while self.pos < self.text.len() {
                let next_end = line_end(self.text, self.pos);
                if is_blank(&self.text[self.pos..next_end]) {
                    break;
                }
                self.pos = next_end;
            }
        }
        Some(start..self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        let mut scanner = SentenceScanner::new(text);
        std::iter::from_fn(|| scanner.next())
            .map(|r| &text[r])
            .collect()
    }

    fn paragraphs(text: &str) -> Vec<&str> {
        let mut scanner = ParagraphScanner::new(text);
        std::iter::from_fn(|| scanner.next())
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn test_sentence_keeps_trailing_space() {
        assert_eq!(
            sentences("One here. Two there! Three?"),
            ["One here. ", "Two there! ", "Three?"]
        );
    }

    #[test]
    fn test_sentence_without_terminal_is_whole_text() {
        assert_eq!(sentences("no punctuation at all"), ["no punctuation at all"]);
    }

    #[test]
    fn test_sentence_terminal_inside_token_does_not_split() {
        assert_eq!(sentences("Version 3.14 works. Yes."), ["Version 3.14 works. ", "Yes."]);
        assert_eq!(sentences("see example.com now"), ["see example.com now"]);
    }

    #[test]
    fn test_sentence_abbreviations() {
        assert_eq!(
            sentences("Dr. Smith met Mrs. Jones, e.g. at noon. Then left."),
            ["Dr. Smith met Mrs. Jones, e.g. at noon. ", "Then left."]
        );
    }

    #[test]
    fn test_longest_abbreviation_matches_list() {
        let longest = ABBREVIATIONS.iter().map(|a| a.chars().count()).max();
        assert_eq!(longest, Some(LONGEST_ABBREVIATION));
    }

    #[test]
    fn test_long_dotted_run_scans_in_linear_time() {
        // cada ponto olha no máximo LONGEST_ABBREVIATION letras para trás
        let text = "a.".repeat(50_000);
        let found = sentences(&text);
        assert_eq!(found, [text.as_str()]);
        assert!(!is_abbreviation(&text, text.len() - 1, '.'));
        assert!(is_abbreviation("see e.g. this", 7, '.'));
        assert!(is_abbreviation("Approx. ten", 6, '.'));
        assert!(!is_abbreviation("xapprox. ten", 7, '.'));
    }

    #[test]
    fn test_sentence_closing_quote_and_ellipsis() {
        assert_eq!(
            sentences("He said \"go.\" She waited... Then ran."),
            ["He said \"go.\" ", "She waited... ", "Then ran."]
        );
    }

    #[test]
    fn test_sentence_ends_at_line_break() {
        assert_eq!(sentences("Title\nBody text."), ["Title\n", "Body text."]);
        assert_eq!(sentences("End.\n\nNext"), ["End.\n\n", "Next"]);
    }

    #[test]
    fn test_sentence_spans_line_breaks_inside_a_paragraph() {
        let text = "no terminal here\nstill same paragraph\n\nSecond paragraph";
        assert_eq!(
            paragraphs(text),
            ["no terminal here\nstill same paragraph\n", "Second paragraph"]
        );
        assert_eq!(
            sentences(text),
            ["no terminal here\nstill same paragraph\n\n", "Second paragraph"]
        );
        // sem linhas em branco, cada quebra fecha parágrafo e sentença
        assert_eq!(sentences("one\ntwo"), ["one\n", "two"]);
        // quebra final do texto também fecha
        assert_eq!(sentences("a\n\nb\n"), ["a\n\n", "b\n"]);
    }

    #[test]
    fn test_sentence_leading_whitespace_joins_first_sentence() {
        assert_eq!(sentences("\n  Hello. Bye."), ["\n  Hello. ", "Bye."]);
        assert!(sentences("   \n ").is_empty());
    }

    #[test]
    fn test_sentence_cjk_terminals() {
        assert_eq!(sentences("今日は晴れ。明日は雨？"), ["今日は晴れ。", "明日は雨？"]);
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let text = "First line\nsame paragraph\n\nSecond\n \n\nThird";
        assert_eq!(
            paragraphs(text),
            ["First line\nsame paragraph\n", "Second\n", "Third"]
        );
    }

    #[test]
    fn test_paragraphs_split_on_single_breaks_without_blank_lines() {
        assert_eq!(paragraphs("a\nb\r\nc"), ["a\n", "b\r\n", "c"]);
    }

    #[test]
    fn test_crlf_is_not_a_blank_line() {
        assert!(!has_blank_line("a\r\nb"));
        assert!(has_blank_line("a\r\n\r\nb"));
        assert!(has_blank_line("a\n  \nb"));
        assert!(!has_blank_line("\nb"));
    }

    #[test]
    fn test_paragraph_whitespace_only_is_skipped() {
        assert!(paragraphs("  \n\n \t").is_empty());
        assert_eq!(paragraphs("\n\nBody\n\n"), ["Body\n"]);
    }
}
