use crate::catalog::CategoryCatalog;
use crate::error::Error;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// What a session draws its questions from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolScope {
    Category(String),
    All,
}

impl fmt::Display for PoolScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolScope::Category(name) => f.write_str(name),
            PoolScope::All => f.write_str("all categories"),
        }
    }
}

/// One image to ask about, tagged with its owning category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionItem {
    pub file_name: String,
    pub category: String,
    /// File name without extension. Compared case-insensitively.
    pub answer: String,
}

impl QuestionItem {
    pub fn new(category: &str, file_name: &str) -> Self {
        let answer = Path::new(file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        Self {
            file_name: file_name.to_string(),
            category: category.to_string(),
            answer,
        }
    }

    pub fn accepts(&self, text: &str) -> bool {
        normalize(text) == normalize(&self.answer)
    }
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Shuffle-without-replacement selection that starts a new cycle once every item was used.
///
/// Items are identified by their position in the pool, so identical file names in
/// different categories stay distinct.
#[derive(Debug, Clone)]
pub struct ImagePool {
    scope: PoolScope,
    items: Vec<QuestionItem>,
    used: HashSet<usize>,
    cycles: usize,
}

impl ImagePool {
    pub fn build<R: Rng + ?Sized>(
        scope: PoolScope,
        catalog: &CategoryCatalog,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let mut items = Vec::new();
        match &scope {
            PoolScope::Category(category) => {
                for file_name in catalog.list_images(category)? {
                    items.push(QuestionItem::new(category, &file_name));
                }
            }
            PoolScope::All => {
                for category in catalog.names() {
                    for file_name in catalog.list_images(category)? {
                        items.push(QuestionItem::new(category, &file_name));
                    }
                }
            }
        }
        Self::from_items(scope, items, rng)
    }

    pub fn from_items<R: Rng + ?Sized>(
        scope: PoolScope,
        mut items: Vec<QuestionItem>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if items.is_empty() {
            return Err(Error::EmptyPool(scope.to_string()));
        }
        items.shuffle(rng);
        debug!("Built pool of {} images for {}", items.len(), scope);
        Ok(Self {
            scope,
            items,
            used: HashSet::new(),
            cycles: 0,
        })
    }

    pub fn scope(&self) -> &PoolScope {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[QuestionItem] {
        &self.items
    }

    /// Number of completed passes over the whole pool.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn remaining_in_cycle(&self) -> usize {
        self.items.len() - self.used.len()
    }

    /// Uniformly pick an item not yet used in this cycle. When the cycle is
    /// exhausted the used set is cleared and every item is eligible again.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&QuestionItem, Error> {
        if self.items.is_empty() {
            return Err(Error::EmptyPool(self.scope.to_string()));
        }
        if self.used.len() >= self.items.len() {
            self.used.clear();
            self.cycles += 1;
            debug!("Pool for {} exhausted, starting cycle {}", self.scope, self.cycles + 1);
        }

        let used = &self.used;
        let index = (0..self.items.len())
            .filter(|i| !used.contains(i))
            .choose(rng)
            .ok_or_else(|| Error::EmptyPool(self.scope.to_string()))?;
        self.used.insert(index);
        Ok(&self.items[index])
    }
}
