//! CSV-backed movie tables
//!
//! Both tables are read once at startup and never change afterwards:
//! - the catalog (`movies_data.csv`): one movie per row, only `title` is used
//! - the recommendation table (`recommendations.csv`): source title in the
//!   first column followed by similar titles, most similar first
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{AppError, AppResult};

const TITLE_COLUMN: &str = "title";

/// Titles offered by the movie selector, in file order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    titles: Vec<String>,
}

impl Catalog {
    pub fn new(titles: Vec<String>) -> Self {
        Self { titles }
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            titles = catalog.len(),
            "Loaded movie catalog"
        );

        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let title_idx = rdr
            .headers()?
            .iter()
            .position(|h| h.trim() == TITLE_COLUMN)
            .ok_or_else(|| {
                AppError::InvalidInput(format!("Catalog has no '{}' column", TITLE_COLUMN))
            })?;

        let mut titles = Vec::new();
        for record in rdr.records() {
            let record = record?;
            match record.get(title_idx) {
                Some(title) if !title.trim().is_empty() => titles.push(title.to_string()),
                _ => continue,
            }
        }

        Ok(Self { titles })
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Precomputed similar-title lists keyed by exact source title
#[derive(Debug, Clone, Default)]
pub struct RecommendationTable {
    entries: HashMap<String, Vec<String>>,
}

impl RecommendationTable {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            entries = table.len(),
            "Loaded recommendation table"
        );

        Ok(table)
    }

    /// Parses a header row followed by `source, similar_1, similar_2, ...` rows
    ///
    /// Rows may have different widths. Blank cells are skipped and the rest are
    /// stored verbatim. When a source title appears more than once, the first
    /// row wins.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();

        for record in rdr.records() {
            let record = record?;
            let mut cells = record.iter();

            let source = match cells.next() {
                Some(source) if !source.trim().is_empty() => source.to_string(),
                _ => continue,
            };

            if entries.contains_key(&source) {
                tracing::warn!(title = %source, "Duplicate recommendation row ignored");
                continue;
            }

            let similar: Vec<String> = cells
                .filter(|cell| !cell.trim().is_empty())
                .map(str::to_string)
                .collect();

            entries.insert(source, similar);
        }

        Ok(Self { entries })
    }

    /// Stored list for `title`, most similar first
    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.entries.get(title).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
