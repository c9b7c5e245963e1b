//! # Reconhecedor de Idiomas
//!
//! Transforma os scores brutos do [`LanguageModel`] numa distribuição de
//! probabilidade sobre os idiomas candidatos.
//!
//! ## Algoritmo
//!
//! 1. **Candidatos**: catálogo do modelo ∩ restrições (quando existirem).
//! 2. **Scores**: `score(texto, L)` para cada candidato.
//! 3. **Piso**: se nenhum candidato alcança `min_score`, não há resposta.
//! 4. **Dicas**: o peso da dica (limitado a [0, 1]) é **somado** ao score dos
//!    candidatos viáveis (score > 0). Uma dica nunca ressuscita um idioma cuja
//!    escrita não aparece no texto.
//! 5. **Normalização**: $p(L) = b(L) / \sum_K b(K)$.
//! 6. **Ordenação**: probabilidade decrescente, empates pela ordem do catálogo.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use nl_core::language::Language;
//! use nl_core::recognizer::{LanguageHints, LanguageRecognizer};
//!
//! let recognizer = LanguageRecognizer::default();
//! let hints = LanguageHints::new().with(Language::English, 0.1);
//! assert_eq!(
//!     recognizer.identify_with("やっていき", &hints, None),
//!     Some(Language::Japanese)
//! );
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::features::TextSample;
use crate::language::Language;
use crate::model::{shared_model, LanguageModel};

/// Piso de score padrão abaixo do qual o texto é considerado não identificável.
pub const DEFAULT_MIN_SCORE: f64 = 0.02;

/// Pesos a priori por idioma. Em JSON: `{"fr": 0.2, "en": 0.1}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageHints(BTreeMap<Language, f64>);

impl LanguageHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Versão encadeável de [`LanguageHints::insert`].
    pub fn with(mut self, language: Language, weight: f64) -> Self {
        self.insert(language, weight);
        self
    }

    pub fn insert(&mut self, language: Language, weight: f64) {
        self.0.insert(language, clamp_weight(weight));
    }

    /// Peso efetivo (0 quando não há dica para o idioma).
    pub fn weight(&self, language: Language) -> f64 {
        self.0.get(&language).copied().map_or(0.0, clamp_weight)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.0.keys().copied()
    }

    /// Monta dicas a partir de códigos de idioma; códigos desconhecidos são
    /// ignorados com um aviso.
    pub fn from_codes<'a>(codes: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut hints = Self::new();
        for (code, weight) in codes {
            match Language::from_code(code) {
                Ok(language) => hints.insert(language, weight),
                Err(e) => warn!(%e, "dica ignorada"),
            }
        }
        hints
    }
}

impl FromIterator<(Language, f64)> for LanguageHints {
    fn from_iter<I: IntoIterator<Item = (Language, f64)>>(iter: I) -> Self {
        let mut hints = Self::new();
        for (language, weight) in iter {
            hints.insert(language, weight);
        }
        hints
    }
}

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}

/// Um idioma candidato e sua probabilidade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub language: Language,
    pub probability: f64,
}

/// Hipóteses ordenadas por probabilidade decrescente.
///
/// Sem restrições e sem truncamento as probabilidades somam 1; truncada em
/// `max` entradas a soma é ≤ 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageHypotheses(Vec<Hypothesis>);

impl LanguageHypotheses {
    pub fn best(&self) -> Option<Language> {
        self.0.first().map(|h| h.language)
    }

    pub fn probability(&self, language: Language) -> Option<f64> {
        self.0
            .iter()
            .find(|h| h.language == language)
            .map(|h| h.probability)
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|h| h.probability).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hypothesis> {
        self.0.iter()
    }

    pub fn languages(&self) -> Vec<Language> {
        self.0.iter().map(|h| h.language).collect()
    }
}

impl IntoIterator for LanguageHypotheses {
    type Item = Hypothesis;
    type IntoIter = std::vec::IntoIter<Hypothesis>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Reconhecedor configurável: guarda dicas, restrições e o piso de score.
///
/// Não guarda estado entre chamadas: `identify` e `hypotheses` são funções puras
/// do texto e da configuração. Mudar a configuração exige `&mut self`.
#[derive(Clone)]
pub struct LanguageRecognizer {
    model: Arc<dyn LanguageModel>,
    hints: LanguageHints,
    constraints: Option<Vec<Language>>,
    min_score: f64,
}

impl Default for LanguageRecognizer {
    /// Reconhecedor com o modelo padrão compartilhado.
    fn default() -> Self {
        Self::new(shared_model())
    }
}

impl std::fmt::Debug for LanguageRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageRecognizer")
            .field("catalog", &self.model.catalog())
            .field("hints", &self.hints)
            .field("constraints", &self.constraints)
            .field("min_score", &self.min_score)
            .finish()
    }
}

impl LanguageRecognizer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            hints: LanguageHints::new(),
            constraints: None,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn model(&self) -> &Arc<dyn LanguageModel> {
        &self.model
    }

    pub fn hints(&self) -> &LanguageHints {
        &self.hints
    }

    pub fn constraints(&self) -> Option<&[Language]> {
        self.constraints.as_deref()
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn set_hints(&mut self, hints: LanguageHints) {
        self.hints = hints;
    }

    /// `None` remove as restrições (todo o catálogo volta a ser candidato).
    pub fn set_constraints(&mut self, constraints: Option<Vec<Language>>) {
        self.constraints = constraints;
    }

    /// Restringe por códigos de idioma; códigos desconhecidos são ignorados com aviso.
    pub fn set_constraint_codes<'a>(&mut self, codes: impl IntoIterator<Item = &'a str>) {
        let languages = codes
            .into_iter()
            .filter_map(|code| match Language::from_code(code) {
                Ok(language) => Some(language),
                Err(e) => {
                    warn!(%e, "restrição ignorada");
                    None
                }
            })
            .collect();
        self.constraints = Some(languages);
    }

    /// Volta à configuração inicial (sem dicas, sem restrições).
    pub fn reset(&mut self) {
        self.hints = LanguageHints::new();
        self.constraints = None;
    }

    /// Idioma dominante com a configuração atual.
    pub fn identify(&self, text: &str) -> Option<Language> {
        self.identify_with(text, &self.hints, self.constraints.as_deref())
    }

    /// Idioma dominante com dicas e restrições explícitas.
    pub fn identify_with(
        &self,
        text: &str,
        hints: &LanguageHints,
        constraints: Option<&[Language]>,
    ) -> Option<Language> {
        self.rank(text, hints, constraints).best()
    }

    /// Até `max` hipóteses com a configuração atual.
    pub fn hypotheses(&self, text: &str, max: usize) -> LanguageHypotheses {
        self.hypotheses_with(text, max, &self.hints, self.constraints.as_deref())
    }

    pub fn hypotheses_with(
        &self,
        text: &str,
        max: usize,
        hints: &LanguageHints,
        constraints: Option<&[Language]>,
    ) -> LanguageHypotheses {
        let mut ranked = self.rank(text, hints, constraints);
        ranked.0.truncate(max);
        ranked
    }

    /// Identifica vários textos independentes em paralelo.
    pub fn identify_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Option<Language>> {
        texts
            .par_iter()
            .map(|text| self.identify(text.as_ref()))
            .collect()
    }

    fn rank(
        &self,
        text: &str,
        hints: &LanguageHints,
        constraints: Option<&[Language]>,
    ) -> LanguageHypotheses {
        let catalog = self.model.catalog();

        for language in hints.languages().filter(|l| !catalog.contains(l)) {
            warn!(%language, "dica para idioma fora do catálogo do modelo ignorada");
        }
        let candidates: Vec<Language> = match constraints {
            None => catalog.to_vec(),
            Some(allowed) => {
                for language in allowed.iter().filter(|l| !catalog.contains(l)) {
                    warn!(%language, "restrição para idioma fora do catálogo do modelo ignorada");
                }
                catalog
                    .iter()
                    .copied()
                    .filter(|l| allowed.contains(l))
                    .collect()
            }
        };
        if candidates.is_empty() {
            return LanguageHypotheses::default();
        }

        let sample = TextSample::new(text);
        let scores: Vec<(Language, f64)> = candidates
            .iter()
            .map(|&language| (language, self.model.score(&sample, language)))
            .collect();

        let best = scores.iter().map(|&(_, s)| s).fold(0.0, f64::max);
        if best <= 0.0 || best < self.min_score {
            debug!(best, min_score = self.min_score, "texto abaixo do piso de score");
            return LanguageHypotheses::default();
        }

        let biased: Vec<(Language, f64)> = scores
            .into_iter()
            .filter(|&(_, score)| score > 0.0)
            .map(|(language, score)| (language, score + hints.weight(language)))
            .collect();
        let total: f64 = biased.iter().map(|&(_, b)| b).sum();

        let mut hypotheses: Vec<Hypothesis> = biased
            .into_iter()
            .map(|(language, b)| Hypothesis {
                language,
                probability: b / total,
            })
            .collect();
        hypotheses.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
                .then(a.language.catalog_index().cmp(&b.language.catalog_index()))
        });
        LanguageHypotheses(hypotheses)
    }
}
