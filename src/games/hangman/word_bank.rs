use serde::Deserialize;
use thiserror::Error;

use super::normalize::normalize_text;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordBankError {
    #[error("the word bank has no categories")]
    NoCategories,
    #[error("category '{0}' has no words")]
    EmptyCategory(String),
    #[error("category '{0}' is defined more than once")]
    DuplicateCategory(String),
    #[error("word '{word}' in category '{category}' must contain only letters")]
    InvalidWord { category: String, word: String },
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// One named list of candidate words.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

/// Category -> words, in the order categories are cycled through.
///
/// Construction validates every list, so a `WordBank` always has at least one
/// category and every category at least one playable word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    categories: Vec<Category>,
}

/// On-disk shape of a word list file.
#[derive(Debug, Deserialize)]
struct WordBankFile {
    categories: Vec<Category>,
}

impl WordBank {
    pub fn new(categories: Vec<Category>) -> Result<Self, WordBankError> {
        if categories.is_empty() {
            return Err(WordBankError::NoCategories);
        }

        let mut validated: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if validated.iter().any(|c| c.name == category.name) {
                return Err(WordBankError::DuplicateCategory(category.name));
            }
            if category.words.is_empty() {
                return Err(WordBankError::EmptyCategory(category.name));
            }

            let mut words = Vec::with_capacity(category.words.len());
            for word in category.words {
                let word = word.trim().to_lowercase();
                if !is_playable(&word) {
                    return Err(WordBankError::InvalidWord { category: category.name, word });
                }
                words.push(word);
            }

            validated.push(Category { name: category.name, words });
        }

        Ok(Self { categories: validated })
    }

    /// Build a bank from `(name, words)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, WordBankError>
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let categories = pairs
            .into_iter()
            .map(|(name, words)| Category {
                name: name.to_string(),
                words: words.iter().map(|w| w.to_string()).collect(),
            })
            .collect();
        Self::new(categories)
    }

    /// Parse a JSON word list: `{"categories": [{"name": .., "words": [..]}]}`.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let file: WordBankFile = serde_json::from_str(json)?;
        Ok(Self::new(file.categories)?)
    }

    /// The built-in Spanish lists.
    pub fn spanish() -> Self {
        Self {
            categories: vec![
                category("animales", &["perro", "gato", "elefante", "jirafa", "león", "tigre", "delfín", "ballena"]),
                category("paises", &["españa", "francia", "italia", "alemania", "portugal", "brasil", "argentina"]),
                category("frutas", &["manzana", "plátano", "naranja", "pera", "melocotón", "fresa", "sandía"]),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn position(&self, name: &str) -> Result<usize, WordBankError> {
        self.categories
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| WordBankError::UnknownCategory(name.to_string()))
    }

    /// Index of the category after `index`, wrapping to the first.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.categories.len()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::spanish()
    }
}

fn category(name: &str, words: &[&str]) -> Category {
    Category {
        name: name.to_string(),
        words: words.iter().map(|w| w.to_string()).collect(),
    }
}

fn is_playable(word: &str) -> bool {
    !word.is_empty() && normalize_text(word).chars().all(char::is_alphabetic)
}
