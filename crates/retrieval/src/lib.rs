mod builtin;

use std::cmp::Ordering;
use std::path::Path;

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;
use yatri_core::{LocalCorpusItem, RetrievalSource};

pub const TOP_K: usize = 8;

const SNIPPET_CHARS: usize = 220;

#[derive(Debug, Clone)]
pub struct Corpus {
    items: Vec<LocalCorpusItem>,
}

impl Corpus {
    pub fn builtin() -> Self {
        Self {
            items: builtin::kolkata_catalogue(),
        }
    }

    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let items = load_items(path.as_ref())?;
        if items.is_empty() {
            bail!(
                "no corpus items found under {}",
                path.as_ref().display()
            );
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[LocalCorpusItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn score(query: &str, corpus: &[LocalCorpusItem]) -> Vec<RetrievalSource> {
    let query = query.to_lowercase();
    let tokens = query.split_whitespace().collect::<Vec<_>>();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored = corpus
        .iter()
        .map(|item| {
            let haystack =
                format!("{} {} {}", item.title, item.body, item.category).to_lowercase();
            let hits = tokens
                .iter()
                .filter(|token| haystack.contains(*token))
                .count();
            (hits as f32 / tokens.len() as f32, item)
        })
        .filter(|(score, _)| *score > 0.0)
        .collect::<Vec<_>>();

    scored.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .take(TOP_K)
        .map(|(score, item)| RetrievalSource {
            title: item.title.clone(),
            snippet: snippet(&item.body, SNIPPET_CHARS),
            score,
            kind: item.kind,
            url: None,
        })
        .collect()
}

pub fn snippet(input: &str, max_chars: usize) -> String {
    let compact = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() <= max_chars {
        compact
    } else {
        compact.chars().take(max_chars).collect::<String>() + "..."
    }
}

fn load_items(root: &Path) -> Result<Vec<LocalCorpusItem>> {
    let mut items = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry.path().extension().and_then(|ext| ext.to_str()) == Some("json")
        })
    {
        let path = entry.path();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading corpus file: {}", path.display()))?;

        match serde_json::from_str::<Vec<LocalCorpusItem>>(&raw) {
            Ok(list) => items.extend(list),
            Err(_) => {
                let single = serde_json::from_str::<LocalCorpusItem>(&raw).with_context(|| {
                    format!(
                        "corpus file is neither an item list nor a single item: {}",
                        path.display()
                    )
                })?;
                items.push(single);
            }
        }
    }
    Ok(items)
}
