//! In-process quiz cache keyed by `"{topic}-{lang}"`.
//!
//! Entries live for the process lifetime. Concurrent misses for the same key
//! may both call the provider; the last write wins.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::{Language, QuizQuestion};

pub type Quiz = Arc<Vec<QuizQuestion>>;

#[derive(Clone, Default)]
pub struct QuizCache {
  entries: Arc<RwLock<HashMap<String, Quiz>>>,
}

pub fn cache_key(topic: &str, lang: Language) -> String {
  format!("{}-{}", topic, lang.code())
}

impl QuizCache {
  pub fn new() -> Self {
    Self::default()
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn get(&self, topic: &str, lang: Language) -> Option<Quiz> {
    self.entries.read().await.get(&cache_key(topic, lang)).cloned()
  }

  /// Stores `quiz`. Empty quizzes are never cached.
  pub async fn insert(&self, topic: &str, lang: Language, quiz: Quiz) -> bool {
    if quiz.is_empty() {
      return false;
    }
    let key = cache_key(topic, lang);
    debug!(target: "quiz", %key, count = quiz.len(), "Caching quiz");
    self.entries.write().await.insert(key, quiz);
    true
  }

  /// Drops the entry so the next request regenerates it.
  pub async fn invalidate(&self, topic: &str, lang: Language) -> bool {
    self.entries.write().await.remove(&cache_key(topic, lang)).is_some()
  }

  pub async fn len(&self) -> usize {
    self.entries.read().await.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn quiz(n: usize) -> Quiz {
    Arc::new(
      (0..n)
        .map(|id| QuizQuestion {
          id,
          question: format!("Q{id}"),
          options: vec!["A".into(), "B".into()],
          correct_answer_index: 0,
          explanation: String::new(),
        })
        .collect(),
    )
  }

  #[test]
  fn key_joins_topic_and_language_code() {
    assert_eq!(cache_key("ASEAN", Language::Vi), "ASEAN-vi");
    assert_eq!(cache_key("United Nations (UN)", Language::En), "United Nations (UN)-en");
  }

  #[tokio::test]
  async fn languages_are_cached_separately() {
    let cache = QuizCache::new();
    assert!(cache.insert("ASEAN", Language::Vi, quiz(3)).await);
    assert!(cache.get("ASEAN", Language::En).await.is_none());
    assert_eq!(cache.get("ASEAN", Language::Vi).await.unwrap().len(), 3);
  }

  #[tokio::test]
  async fn empty_quiz_is_not_cached() {
    let cache = QuizCache::new();
    assert!(!cache.insert("EU", Language::En, quiz(0)).await);
    assert_eq!(cache.len().await, 0);
  }

  #[tokio::test]
  async fn invalidate_removes_entry() {
    let cache = QuizCache::new();
    cache.insert("APEC", Language::En, quiz(1)).await;
    assert!(cache.invalidate("APEC", Language::En).await);
    assert!(!cache.invalidate("APEC", Language::En).await);
    assert!(cache.get("APEC", Language::En).await.is_none());
  }
}
