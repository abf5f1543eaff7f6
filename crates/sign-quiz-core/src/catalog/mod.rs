pub mod walk;

use crate::config::AppConfig;
use crate::error::Error;
use crate::profile::PlayerProfile;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use walk::ImageMatcher;

/// Display palette for category buttons, assigned by discovery index.
pub const PALETTE: [&str; 6] = [
    "#FFB3BA", "#BAFFC9", "#BAE1FF", "#FFFFBA", "#FFDFBA", "#E0BBE4",
];

#[derive(Debug, Clone)]
struct Category {
    name: String,
    total_images: usize,
}

/// Per-category progress for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryInfo {
    pub name: String,
    pub total_images: usize,
    pub correct_count: u32,
    pub mastery_percent: f64,
    pub color_index: usize,
}

impl CategoryInfo {
    pub fn color(&self) -> &'static str {
        PALETTE[self.color_index % PALETTE.len()]
    }
}

pub fn mastery_percent(correct_count: u32, total_images: usize) -> f64 {
    if total_images == 0 {
        return 0.0;
    }
    correct_count as f64 / total_images as f64 * 100.0
}

/// Categories found under the base folder, in a stable order for the whole run.
/// Image counts are read once and never refreshed without a new `discover`.
pub struct CategoryCatalog {
    base: PathBuf,
    highlights_folder: String,
    matcher: ImageMatcher,
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn discover(config: &AppConfig) -> Result<Self, Error> {
        let matcher = ImageMatcher::new(&config.image_patterns);
        let base = config.base_folder.clone();

        let mut categories = Vec::new();
        for name in walk::list_subdirectories(&base)? {
            if name == config.highlights_folder {
                continue;
            }
            let total_images = walk::list_images(&base.join(&name), &matcher)?.len();
            categories.push(Category { name, total_images });
        }
        info!(
            "Discovered {} categories under {}",
            categories.len(),
            base.display()
        );

        Ok(Self {
            base,
            highlights_folder: config.highlights_folder.clone(),
            matcher,
            categories,
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.index_of(category).is_some()
    }

    pub fn total_images(&self, category: &str) -> Result<usize, Error> {
        self.index_of(category)
            .map(|i| self.categories[i].total_images)
            .ok_or_else(|| Error::CategoryNotFound(category.to_string()))
    }

    pub fn color_for(&self, category: &str) -> Option<&'static str> {
        self.index_of(category).map(|i| PALETTE[i % PALETTE.len()])
    }

    pub fn stats(&self, category: &str, profile: &PlayerProfile) -> Result<CategoryInfo, Error> {
        let index = self
            .index_of(category)
            .ok_or_else(|| Error::CategoryNotFound(category.to_string()))?;
        Ok(self.info_at(index, profile))
    }

    pub fn all_stats(&self, profile: &PlayerProfile) -> Vec<CategoryInfo> {
        (0..self.categories.len())
            .map(|i| self.info_at(i, profile))
            .collect()
    }

    /// Eligible image file names in one category, sorted.
    pub fn list_images(&self, category: &str) -> Result<Vec<String>, Error> {
        if !self.contains(category) {
            return Err(Error::CategoryNotFound(category.to_string()));
        }
        Ok(walk::list_images(&self.base.join(category), &self.matcher)?)
    }

    pub fn image_path(&self, category: &str, file_name: &str) -> PathBuf {
        self.base.join(category).join(file_name)
    }

    /// Up to `count` images from the reserved highlights folder. A missing folder yields none.
    pub fn highlights(&self, count: usize) -> Vec<PathBuf> {
        let folder = self.base.join(&self.highlights_folder);
        if !folder.is_dir() {
            return Vec::new();
        }
        match walk::list_images(&folder, &self.matcher) {
            Ok(images) => images
                .into_iter()
                .take(count)
                .map(|name| folder.join(name))
                .collect(),
            Err(err) => {
                warn!("Could not read highlights in {}: {}", folder.display(), err);
                Vec::new()
            }
        }
    }

    /// Make the profile's stat keys exactly the discovered categories.
    /// Returns the names of pruned keys.
    pub fn align_stats(&self, profile: &mut PlayerProfile) -> Vec<String> {
        let pruned: Vec<String> = profile
            .category_stats
            .keys()
            .filter(|name| !self.contains(name))
            .cloned()
            .collect();
        for name in &pruned {
            warn!(
                "Dropping stats for unknown category '{}' from player {}",
                name, profile.name
            );
            profile.category_stats.remove(name);
        }
        for category in &self.categories {
            profile
                .category_stats
                .entry(category.name.clone())
                .or_insert(0);
        }
        pruned
    }

    fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == category)
    }

    fn info_at(&self, index: usize, profile: &PlayerProfile) -> CategoryInfo {
        let category = &self.categories[index];
        let correct_count = profile.correct_count(&category.name);
        CategoryInfo {
            name: category.name.clone(),
            total_images: category.total_images,
            correct_count,
            mastery_percent: mastery_percent(correct_count, category.total_images),
            color_index: index % PALETTE.len(),
        }
    }
}
