//! # Catálogo de Idiomas
//!
//! Conjunto fechado de idiomas que o classificador conhece. A ordem de
//! [`Language::ALL`] é a ordem do catálogo e desempata hipóteses com a mesma
//! probabilidade.
//!
//! | Código    | Idioma                | Escritas          |
//! |-----------|-----------------------|-------------------|
//! | `en`      | English               | Latn              |
//! | `fr`      | French                | Latn              |
//! | `de`      | German                | Latn              |
//! | `es`      | Spanish               | Latn              |
//! | `it`      | Italian               | Latn              |
//! | `pt`      | Portuguese            | Latn              |
//! | `nl`      | Dutch                 | Latn              |
//! | `ja`      | Japanese              | Hira, Kana, Hani  |
//! | `zh-Hans` | Simplified Chinese    | Hani              |
//! | `ko`      | Korean                | Hang              |
//! | `ru`      | Russian               | Cyrl              |
//! | `el`      | Greek                 | Grek              |
//! | `ar`      | Arabic                | Arab              |
//! | `he`      | Hebrew                | Hebr              |
//! | `th`      | Thai                  | Thai              |

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::NlError;
use crate::script::Script;

/// Um idioma do catálogo. Serializado pelo código (ex: `"en"`, `"zh-Hans"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    French,
    German,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
    Japanese,
    SimplifiedChinese,
    Korean,
    Russian,
    Greek,
    Arabic,
    Hebrew,
    Thai,
}

impl Language {
    pub const ALL: [Language; 15] = [
        Language::English,
        Language::French,
        Language::German,
        Language::Spanish,
        Language::Italian,
        Language::Portuguese,
        Language::Dutch,
        Language::Japanese,
        Language::SimplifiedChinese,
        Language::Korean,
        Language::Russian,
        Language::Greek,
        Language::Arabic,
        Language::Hebrew,
        Language::Thai,
    ];

    /// Código ISO 639-1, com subtag de escrita quando o idioma precisa dela.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::German => "de",
            Language::Spanish => "es",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Dutch => "nl",
            Language::Japanese => "ja",
            Language::SimplifiedChinese => "zh-Hans",
            Language::Korean => "ko",
            Language::Russian => "ru",
            Language::Greek => "el",
            Language::Arabic => "ar",
            Language::Hebrew => "he",
            Language::Thai => "th",
        }
    }

    /// Nome em inglês, para exibição.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Dutch => "Dutch",
            Language::Japanese => "Japanese",
            Language::SimplifiedChinese => "Simplified Chinese",
            Language::Korean => "Korean",
            Language::Russian => "Russian",
            Language::Greek => "Greek",
            Language::Arabic => "Arabic",
            Language::Hebrew => "Hebrew",
            Language::Thai => "Thai",
        }
    }

    /// Sistemas de escrita em que o idioma é escrito.
    pub fn scripts(self) -> &'static [Script] {
        match self {
            Language::English
            | Language::French
            | Language::German
            | Language::Spanish
            | Language::Italian
            | Language::Portuguese
            | Language::Dutch => &[Script::Latin],
            Language::Japanese => &[Script::Hiragana, Script::Katakana, Script::Han],
            Language::SimplifiedChinese => &[Script::Han],
            Language::Korean => &[Script::Hangul],
            Language::Russian => &[Script::Cyrillic],
            Language::Greek => &[Script::Greek],
            Language::Arabic => &[Script::Arabic],
            Language::Hebrew => &[Script::Hebrew],
            Language::Thai => &[Script::Thai],
        }
    }

    /// Posição no catálogo (critério de desempate).
    pub fn catalog_index(self) -> usize {
        self as usize
    }

    /// Interpreta um código de idioma no estilo BCP 47.
    ///
    /// Aceita `_` ou `-` como separador, ignora maiúsculas no idioma e
    /// descarta a região (`pt-BR` → `pt`). `zh`, `zh-Hans` e `zh-CN` apontam
    /// para o chinês simplificado; `zh-Hant` não está no catálogo.
    pub fn from_code(code: &str) -> Result<Language, NlError> {
        let unknown = || NlError::UnknownLanguage(code.to_string());
        let captures = code_pattern().captures(code.trim()).ok_or_else(unknown)?;
        let primary = captures[1].to_ascii_lowercase();
        let script = captures.get(2).map(|m| m.as_str().to_ascii_lowercase());

        let language = match primary.as_str() {
            "en" | "eng" => Language::English,
            "fr" | "fra" => Language::French,
            "de" | "deu" => Language::German,
            "es" | "spa" => Language::Spanish,
            "it" | "ita" => Language::Italian,
            "pt" | "por" => Language::Portuguese,
            "nl" | "nld" => Language::Dutch,
            "ja" | "jpn" => Language::Japanese,
            "zh" | "zho" if script.as_deref().map_or(true, |s| s == "hans") => {
                Language::SimplifiedChinese
            }
            "ko" | "kor" => Language::Korean,
            "ru" | "rus" => Language::Russian,
            "el" | "ell" => Language::Greek,
            "ar" | "ara" => Language::Arabic,
            "he" | "heb" => Language::Hebrew,
            "th" | "tha" => Language::Thai,
            _ => return Err(unknown()),
        };
        Ok(language)
    }
}

/// idioma, escrita opcional (4 letras), região opcional (2 letras ou 3 dígitos)
fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{2,3})(?:[-_]([A-Za-z]{4}))?(?:[-_](?:[A-Za-z]{2}|\d{3}))?$")
            .unwrap_or_else(|e| unreachable!("static language-code pattern: {e}"))
    })
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = NlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}

impl TryFrom<String> for Language {
    type Error = NlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::from_code(&value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()).unwrap(), language);
        }
    }

    #[test]
    fn test_catalog_order() {
        for (i, language) in Language::ALL.iter().enumerate() {
            assert_eq!(language.catalog_index(), i);
        }
    }

    #[test]
    fn test_from_code_variants() {
        assert_eq!(Language::from_code("pt-BR").unwrap(), Language::Portuguese);
        assert_eq!(Language::from_code("EN_us").unwrap(), Language::English);
        assert_eq!(Language::from_code("zh").unwrap(), Language::SimplifiedChinese);
        assert_eq!(Language::from_code("zh-Hans-CN").unwrap(), Language::SimplifiedChinese);
        assert_eq!(Language::from_code("es-419").unwrap(), Language::Spanish);
        assert_eq!(Language::from_code("jpn").unwrap(), Language::Japanese);
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        for code in ["", "xx", "zh-Hant", "english", "en--US", "e"] {
            assert!(
                matches!(Language::from_code(code), Err(NlError::UnknownLanguage(_))),
                "{code}"
            );
        }
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&Language::SimplifiedChinese).unwrap();
        assert_eq!(json, "\"zh-Hans\"");
        let back: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(back, Language::French);
        assert!(serde_json::from_str::<Language>("\"xx\"").is_err());
    }

    #[test]
    fn test_scripts() {
        assert_eq!(Language::Portuguese.scripts(), &[Script::Latin]);
        assert!(Language::Japanese.scripts().contains(&Script::Hiragana));
    }
}
