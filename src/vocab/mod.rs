pub mod source;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

const VOCABULARY_EN_VI: &str = include_str!("../../assets/vocabulary.json");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub english: String,
    pub translation: String,
    #[serde(rename = "type")]
    pub word_type: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub example_translation: String,
}

/// Which side of an entry the player has to type. The other side is the prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerField {
    #[default]
    English,
    Translation,
}

impl VocabularyEntry {
    pub fn answer(&self, field: AnswerField) -> &str {
        match field {
            AnswerField::English => &self.english,
            AnswerField::Translation => &self.translation,
        }
    }

    pub fn prompt(&self, field: AnswerField) -> &str {
        match field {
            AnswerField::English => &self.translation,
            AnswerField::Translation => &self.english,
        }
    }
}

/// Ordered, read-only word list. Never empty once constructed.
#[derive(Clone, Debug)]
pub struct Corpus {
    entries: Vec<VocabularyEntry>,
}

impl Corpus {
    pub fn new(entries: Vec<VocabularyEntry>) -> Result<Self, GameError> {
        // Entries without something to type on either side are unplayable
        let entries: Vec<VocabularyEntry> = entries
            .into_iter()
            .filter(|e| !e.english.trim().is_empty() && !e.translation.trim().is_empty())
            .collect();
        if entries.is_empty() {
            return Err(GameError::EmptyCorpus);
        }
        Ok(Self { entries })
    }

    pub fn bundled() -> Result<Self, GameError> {
        Self::from_json(VOCABULARY_EN_VI)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let entries: Vec<VocabularyEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self, GameError> {
        let content = fs::read_to_string(path).map_err(|source| GameError::CorpusRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VocabularyEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }
}

#[cfg(test)]
pub(crate) fn entry(english: &str, translation: &str) -> VocabularyEntry {
    VocabularyEntry {
        english: english.to_string(),
        translation: translation.to_string(),
        word_type: "n".to_string(),
        example: String::new(),
        example_translation: String::new(),
    }
}
