use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, TableModelError};
use crate::page::{PageDoc, WikiPage};

/// Source of parsed wiki pages, addressable by document id
pub trait Corpus {
    /// Non-empty document ids, in a stable order
    fn doc_ids(&self) -> Vec<String>;

    /// Retrieve one parsed page
    fn get_page(&self, id: &str) -> Result<WikiPage>;
}

/// Corpus backed by a JSONL file: one `PageDoc` object per line,
/// keyed by page title. Loaded eagerly.
pub struct JsonlCorpus {
    pages: BTreeMap<String, WikiPage>,
}

impl JsonlCorpus {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut pages = BTreeMap::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: PageDoc = serde_json::from_str(&line)?;
            let page = WikiPage::from_doc(doc);
            pages.insert(page.title.clone(), page);
        }

        log::info!("Loaded {} pages from corpus", pages.len());
        Ok(Self { pages })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl Corpus for JsonlCorpus {
    fn doc_ids(&self) -> Vec<String> {
        self.pages.keys().cloned().collect()
    }

    fn get_page(&self, id: &str) -> Result<WikiPage> {
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| TableModelError::UnknownPage(id.to_string()))
    }
}

/// In-memory corpus for tests and embedding
pub struct MemoryCorpus {
    pages: Vec<WikiPage>,
}

impl MemoryCorpus {
    pub fn new(pages: Vec<WikiPage>) -> Self {
        Self { pages }
    }
}

impl Corpus for MemoryCorpus {
    fn doc_ids(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.title.clone()).collect()
    }

    fn get_page(&self, id: &str) -> Result<WikiPage> {
        self.pages
            .iter()
            .find(|p| p.title == id)
            .cloned()
            .ok_or_else(|| TableModelError::UnknownPage(id.to_string()))
    }
}
