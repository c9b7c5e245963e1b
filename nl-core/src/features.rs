//! # Features de Trigramas de Caracteres
//!
//! O classificador de idiomas compara textos por seus **trigramas de
//! caracteres**. Cada palavra (sequência máxima de letras, em minúsculas) é
//! cercada por um espaço de cada lado, assim os trigramas também capturam
//! inícios e finais de palavra:
//!
//! ```text
//! "the" → " th", "the", "he "
//! ```
//!
//! ## Pesos
//!
//! A contagem bruta favorece demais trigramas muito frequentes (" de", "de "),
//! então cada trigrama recebe peso sublinear:
//!
//! $$ w(g) = 1 + \ln(\text{count}(g)) $$
//!
//! e dois perfis são comparados pelo cosseno:
//!
//! $$ \cos(a, b) = \frac{\sum_g a_g \cdot b_g}{\lVert a \rVert \, \lVert b \rVert} $$
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use nl_core::features::NgramProfile;
//!
//! let a = NgramProfile::from_text("the cat");
//! let b = NgramProfile::from_text("The cat!");
//! assert!((a.cosine(&b) - 1.0).abs() < 1e-9);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::script::ScriptHistogram;

/// Perfil esparso de trigramas com pesos sublineares.
///
/// Os trigramas ficam ordenados, então produto escalar e norma somam sempre na
/// mesma ordem e dão o mesmo resultado bit a bit em qualquer execução.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NgramProfile {
    /// Trigrama → peso `1 + ln(count)`.
    pub weights: BTreeMap<String, f64>,
    /// Norma L2 de `weights`, calculada uma vez.
    pub norm: f64,
}

impl NgramProfile {
    pub fn from_text(text: &str) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for word in words(text) {
            let padded: Vec<char> = std::iter::once(' ')
                .chain(word.chars())
                .chain(std::iter::once(' '))
                .collect();
            for window in padded.windows(3) {
                *counts.entry(window.iter().collect()).or_insert(0) += 1;
            }
        }

        let weights: BTreeMap<String, f64> = counts
            .into_iter()
            .map(|(gram, count)| (gram, 1.0 + (count as f64).ln()))
            .collect();
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        Self { weights, norm }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Produto escalar, iterando o menor dos dois mapas.
    pub fn dot(&self, other: &NgramProfile) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .map(|(gram, w)| w * large.weights.get(gram).unwrap_or(&0.0))
            .sum()
    }

    /// Similaridade de cosseno em [0, 1]; 0 quando algum perfil é vazio.
    pub fn cosine(&self, other: &NgramProfile) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        self.dot(other) / (self.norm * other.norm)
    }
}

/// Tudo o que o modelo precisa saber de um texto a classificar.
#[derive(Debug, Clone)]
pub struct TextSample {
    pub profile: NgramProfile,
    pub scripts: ScriptHistogram,
}

impl TextSample {
    pub fn new(text: &str) -> Self {
        Self {
            profile: NgramProfile::from_text(text),
            scripts: ScriptHistogram::new(text),
        }
    }
}

/// Marcas combinantes que continuam uma palavra (acentos soltos, marcas tailandesas).
fn is_combining_mark(c: char) -> bool {
    matches!(
        c as u32,
        0x0300..=0x036F
            | 0x0483..=0x0489
            | 0x0591..=0x05BD
            | 0x064B..=0x065F
            | 0x0E31
            | 0x0E34..=0x0E3A
            | 0x0E47..=0x0E4E
            | 0x1AB0..=0x1AFF
            | 0x1DC0..=0x1DFF
            | 0x20D0..=0x20FF
            | 0x3099..=0x309A
            | 0xFE20..=0xFE2F
    )
}

/// Palavras em minúsculas: sequências máximas de letras (dígitos separam palavras).
pub fn words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphabetic() || is_combining_mark(c) {
            current.extend(c.to_lowercase());
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_lowercase_letter_runs() {
        assert_eq!(words("Hello, World 42x"), ["hello", "world", "x"]);
        assert_eq!(words("can't"), ["can", "t"]);
        assert_eq!(words("cafe\u{301}"), ["cafe\u{301}"]);
        assert!(words("  123 !").is_empty());
    }

    #[test]
    fn test_trigrams_include_word_edges() {
        let profile = NgramProfile::from_text("the");
        let mut grams: Vec<&str> = profile.weights.keys().map(String::as_str).collect();
        grams.sort();
        assert_eq!(grams, [" th", "he ", "the"]);
    }

    #[test]
    fn test_sublinear_weights() {
        let profile = NgramProfile::from_text("aa aa aa");
        // só dois trigramas, " aa" e "aa ", cada um 3 vezes
        assert_eq!(profile.len(), 2);
        let w = profile.weights[" aa"];
        assert!((w - (1.0 + 3f64.ln())).abs() < 1e-12);
        assert_eq!(profile.weights["aa "], w);
        let expected_norm = (2.0 * w * w).sqrt();
        assert!((profile.norm - expected_norm).abs() < 1e-12);
    }

    #[test]
    fn test_short_words_still_produce_trigrams() {
        let profile = NgramProfile::from_text("a");
        assert_eq!(profile.len(), 1);
        assert!(profile.weights.contains_key(" a "));
    }

    #[test]
    fn test_cosine_bounds() {
        let a = NgramProfile::from_text("the quick brown fox");
        let b = NgramProfile::from_text("der schnelle braune fuchs");
        let empty = NgramProfile::from_text("123");
        assert!((a.cosine(&a) - 1.0).abs() < 1e-9);
        let ab = a.cosine(&b);
        assert!((0.0..1.0).contains(&ab));
        assert_eq!(a.cosine(&empty), 0.0);
        assert!((a.dot(&b) - b.dot(&a)).abs() < 1e-12);
    }

    #[test]
    fn test_profiles_compare_bit_for_bit() {
        let text = "Der Hund schläft unter dem Tisch in der Küche.";
        let reference = NgramProfile::from_text("der hund und die katze schlafen in der küche");
        let first = NgramProfile::from_text(text);
        for _ in 0..20 {
            let again = NgramProfile::from_text(text);
            assert_eq!(again.norm.to_bits(), first.norm.to_bits());
            assert_eq!(
                again.cosine(&reference).to_bits(),
                first.cosine(&reference).to_bits()
            );
        }
    }

    #[test]
    fn test_text_sample_counts_scripts() {
        let sample = TextSample::new("やっていき");
        assert_eq!(sample.scripts.total(), 5);
        assert!(!sample.profile.is_empty());
    }
}
