//! # Modelo de Idiomas
//!
//! O modelo guarda um perfil de trigramas por idioma e responde uma única
//! pergunta: *quão bem este texto combina com este idioma?*
//!
//! ## Pontuação
//!
//! $$ \text{score}(t, L) = \text{coverage}(t, L) \cdot \cos(\text{perfil}(t), \text{perfil}(L)) $$
//!
//! - **coverage**: fração dos escalares do texto (com escrita conhecida) que
//!   estão em alguma escrita do idioma. Um texto todo em Hiragana tem
//!   cobertura 0 para qualquer idioma latino, e portanto score 0.
//! - **cosseno**: similaridade entre os perfis de trigramas (ver
//!   [`crate::features`]).
//!
//! O score fica em [0, 1]. A normalização em probabilidades, as dicas e as
//! restrições ficam em [`crate::recognizer`].
//!
//! O modelo é construído uma vez e compartilhado via `Arc`; depois de pronto
//! ele nunca muda, então pode ser consultado de várias threads ao mesmo tempo.

use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use tracing::debug;

use crate::corpus::reference_text;
use crate::features::{NgramProfile, TextSample};
use crate::language::Language;

/// Interface do modelo de idiomas consultado pelo reconhecedor.
pub trait LanguageModel: Send + Sync {
    /// Idiomas que o modelo sabe pontuar, na ordem do catálogo.
    fn catalog(&self) -> &[Language];

    /// Score em [0, 1] de `sample` para `language`. Idiomas fora do catálogo valem 0.
    fn score(&self, sample: &TextSample, language: Language) -> f64;
}

/// Modelo de trigramas construído a partir dos textos de referência.
#[derive(Debug, Clone)]
pub struct NgramLanguageModel {
    languages: Vec<Language>,
    profiles: Vec<NgramProfile>,
}

impl NgramLanguageModel {
    /// Constrói o modelo padrão com todos os idiomas do catálogo.
    ///
    /// Os perfis são independentes entre si e são calculados em paralelo.
    pub fn build() -> Self {
        let texts: Vec<(Language, String)> = Language::ALL
            .iter()
            .map(|&language| (language, reference_text(language)))
            .filter(|(_, text)| !text.is_empty())
            .collect();

        let model = Self::from_texts(texts);
        debug!(languages = model.languages.len(), "modelo de idiomas construído");
        model
    }

    /// Constrói um modelo a partir de amostras arbitrárias.
    ///
    /// Várias amostras do mesmo idioma são concatenadas; a ordem do catálogo
    /// resultante segue [`Language::ALL`], não a ordem de entrada.
    pub fn with_samples<'a>(samples: impl IntoIterator<Item = (Language, &'a str)>) -> Self {
        let mut texts: Vec<(Language, String)> = Vec::new();
        for (language, text) in samples {
            match texts.iter_mut().find(|(l, _)| *l == language) {
                Some((_, existing)) => {
                    existing.push('\n');
                    existing.push_str(text);
                }
                None => texts.push((language, text.to_string())),
            }
        }
        texts.sort_by_key(|(language, _)| language.catalog_index());
        Self::from_texts(texts)
    }

    fn from_texts(texts: Vec<(Language, String)>) -> Self {
        let profiles: Vec<NgramProfile> = texts
            .par_iter()
            .map(|(_, text)| NgramProfile::from_text(text))
            .collect();
        Self {
            languages: texts.into_iter().map(|(language, _)| language).collect(),
            profiles,
        }
    }

    /// Perfil de um idioma, se ele estiver no catálogo do modelo.
    pub fn profile(&self, language: Language) -> Option<&NgramProfile> {
        self.languages
            .iter()
            .position(|&l| l == language)
            .map(|i| &self.profiles[i])
    }
}

/// Modelo padrão, construído na primeira chamada e compartilhado pelo processo.
pub fn shared_model() -> Arc<NgramLanguageModel> {
    static MODEL: OnceLock<Arc<NgramLanguageModel>> = OnceLock::new();
    Arc::clone(MODEL.get_or_init(|| Arc::new(NgramLanguageModel::build())))
}

impl Default for NgramLanguageModel {
    fn default() -> Self {
        Self::build()
    }
}

impl LanguageModel for NgramLanguageModel {
    fn catalog(&self) -> &[Language] {
        &self.languages
    }

    fn score(&self, sample: &TextSample, language: Language) -> f64 {
        let Some(profile) = self.profile(language) else {
            return 0.0;
        };
        let coverage = sample.scripts.coverage(language.scripts());
        if coverage == 0.0 {
            return 0.0;
        }
        coverage * sample.profile.cosine(profile)
    }
}
