//! Domain models: language, regions, static region content, and quiz questions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// UI language. Everything user-facing is available in both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  #[default]
  Vi,
  En,
}

impl Language {
  pub fn code(self) -> &'static str {
    match self {
      Language::Vi => "vi",
      Language::En => "en",
    }
  }

  /// Pick the localized variant of a pair of strings.
  pub fn pick<'a>(self, vi: &'a str, en: &'a str) -> &'a str {
    match self {
      Language::Vi => vi,
      Language::En => en,
    }
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

/// Regions shown on the map, plus the standalone ideology quiz topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionId {
  Un,
  Eu,
  Africa,
  Asean,
  Apec,
  HcmIdeology,
}

impl RegionId {
  pub const MAP: [RegionId; 5] = [RegionId::Un, RegionId::Eu, RegionId::Africa, RegionId::Asean, RegionId::Apec];

  pub fn as_str(self) -> &'static str {
    match self {
      RegionId::Un => "UN",
      RegionId::Eu => "EU",
      RegionId::Africa => "AFRICA",
      RegionId::Asean => "ASEAN",
      RegionId::Apec => "APEC",
      RegionId::HcmIdeology => "HCM_IDEOLOGY",
    }
  }

  /// Case-insensitive parse of the wire id ("asean", "UN", ...).
  pub fn parse(s: &str) -> Option<Self> {
    let up = s.trim().to_ascii_uppercase();
    [RegionId::HcmIdeology].iter().chain(RegionId::MAP.iter()).copied().find(|r| r.as_str() == up)
  }
}

#[derive(Clone, Debug, Serialize)]
pub struct Coordinates {
  pub top: &'static str,
  pub left: &'static str,
}

/// One map pin, already localized.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
  pub id: RegionId,
  pub name: String,
  pub short_description: String,
  pub coordinates: Coordinates,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
  pub year: String,
  pub event: String,
}

/// Static study content for one region in one language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionContent {
  pub history: String,
  pub contribution: String,
  pub meaning: String,
  pub milestones: Vec<Milestone>,
}

/// A validated multiple-choice question.
///
/// `id` is the position in the batch, assigned during normalization.
/// `correct_answer_index` always points into `options`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub id: usize,
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer_index: usize,
  pub explanation: String,
}
