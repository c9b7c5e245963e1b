//! # Detecção de Sistema de Escrita
//!
//! Cada escalar pertence a no máximo um sistema de escrita ([`Script`]), decidido
//! por faixas de code points. Escalares comuns (espaços, dígitos, pontuação,
//! símbolos) não pertencem a nenhum e são ignorados nas contagens.
//!
//! O classificador de idiomas usa o histograma de escritas como primeiro filtro:
//! um texto em Hiragana nunca pode ser português, independentemente dos trigramas.

use serde::{Deserialize, Serialize};

/// Sistemas de escrita reconhecidos, com o código ISO 15924 como forma serializada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Script {
    #[serde(rename = "Latn")]
    Latin,
    #[serde(rename = "Cyrl")]
    Cyrillic,
    #[serde(rename = "Grek")]
    Greek,
    #[serde(rename = "Arab")]
    Arabic,
    #[serde(rename = "Hebr")]
    Hebrew,
    #[serde(rename = "Thai")]
    Thai,
    #[serde(rename = "Deva")]
    Devanagari,
    #[serde(rename = "Hira")]
    Hiragana,
    #[serde(rename = "Kana")]
    Katakana,
    #[serde(rename = "Hani")]
    Han,
    #[serde(rename = "Hang")]
    Hangul,
}

impl Script {
    pub const ALL: [Script; 11] = [
        Script::Latin,
        Script::Cyrillic,
        Script::Greek,
        Script::Arabic,
        Script::Hebrew,
        Script::Thai,
        Script::Devanagari,
        Script::Hiragana,
        Script::Katakana,
        Script::Han,
        Script::Hangul,
    ];

    /// Código ISO 15924 (ex: "Latn").
    pub fn code(self) -> &'static str {
        match self {
            Script::Latin => "Latn",
            Script::Cyrillic => "Cyrl",
            Script::Greek => "Grek",
            Script::Arabic => "Arab",
            Script::Hebrew => "Hebr",
            Script::Thai => "Thai",
            Script::Devanagari => "Deva",
            Script::Hiragana => "Hira",
            Script::Katakana => "Kana",
            Script::Han => "Hani",
            Script::Hangul => "Hang",
        }
    }

    /// Sistema de escrita de um escalar, se ele tiver um.
    pub fn of(c: char) -> Option<Script> {
        let script = match c as u32 {
            0x41..=0x5A | 0x61..=0x7A => Script::Latin,
            0xD7 | 0xF7 => return None,
            0xC0..=0x24F | 0x1E00..=0x1EFF => Script::Latin,
            0x370..=0x3FF | 0x1F00..=0x1FFF => Script::Greek,
            0x400..=0x52F => Script::Cyrillic,
            0x590..=0x5FF => Script::Hebrew,
            0x600..=0x6FF | 0x750..=0x77F => Script::Arabic,
            0x900..=0x97F => Script::Devanagari,
            0xE00..=0xE7F => Script::Thai,
            0x1100..=0x11FF | 0x3130..=0x318F | 0xAC00..=0xD7AF => Script::Hangul,
            0x3040..=0x309F => Script::Hiragana,
            0x30A0..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF9F => Script::Katakana,
            0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF => Script::Han,
            _ => return None,
        };
        Some(script)
    }
}

/// Contagem de escalares por sistema de escrita.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptHistogram {
    counts: [usize; Script::ALL.len()],
    total: usize,
}

impl ScriptHistogram {
    pub fn new(text: &str) -> Self {
        let mut histogram = Self::default();
        for script in text.chars().filter_map(Script::of) {
            histogram.counts[script as usize] += 1;
            histogram.total += 1;
        }
        histogram
    }

    /// Total de escalares com sistema de escrita conhecido.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, script: Script) -> usize {
        self.counts[script as usize]
    }

    /// Fração dos escalares escritos em algum dos `scripts` (0 quando não há nenhum).
    pub fn coverage(&self, scripts: &[Script]) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let covered: usize = scripts.iter().map(|&s| self.count(s)).sum();
        covered as f64 / self.total as f64
    }

    /// Escrita mais frequente; empates ficam com a primeira em [`Script::ALL`].
    pub fn dominant(&self) -> Option<Script> {
        Script::ALL
            .into_iter()
            .filter(|&s| self.count(s) > 0)
            .fold(None, |best: Option<Script>, s| match best {
                Some(b) if self.count(b) >= self.count(s) => Some(b),
                _ => Some(s),
            })
    }
}

/// Escrita dominante de um trecho de texto.
pub fn dominant_script(text: &str) -> Option<Script> {
    ScriptHistogram::new(text).dominant()
}
