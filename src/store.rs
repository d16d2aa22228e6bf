use crate::models::{Movie, MoviesDocument, PageAssignment, PagesDocument, PagesMetadata};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct DataStore {
    movies: Vec<Movie>,
    pages: PagesMetadata,
}

impl DataStore {
    pub fn new(movies: Vec<Movie>, pages: PagesMetadata) -> Self {
        Self { movies, pages }
    }

    pub fn load(movies_path: &Path, pages_path: &Path) -> Result<Self> {
        let movies: MoviesDocument = read_json(movies_path)?;
        info!(
            "Loaded {} movies from {}",
            movies.items.len(),
            movies_path.display()
        );

        let pages: PagesDocument = read_json(pages_path)?;
        let store = Self::new(movies.items, pages.pages);
        match store.highest_page() {
            Some(highest) => info!(
                "Loaded {} page assignments from {} (highest page {})",
                store.assignments().len(),
                pages_path.display(),
                highest
            ),
            None => info!("Loaded no page assignments from {}", pages_path.display()),
        }
        Ok(store)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn metadata(&self) -> &PagesMetadata {
        &self.pages
    }

    pub fn assignments(&self) -> &[PageAssignment] {
        &self.pages.page_list
    }

    pub fn highest_page(&self) -> Option<i64> {
        self.assignments().iter().map(|a| a.page).max()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}
