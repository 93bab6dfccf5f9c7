// src/ingest/filter.rs

/// Case-insensitive substring match against a fixed keyword list.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    needles: Vec<String>, // lowercased
}

impl KeywordFilter {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let needles = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { needles }
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    pub fn matches_text(&self, text: &str) -> bool {
        let hay = text.to_lowercase();
        self.needles.iter().any(|k| hay.contains(k.as_str()))
    }

    /// Title plus stripped description, joined by a space.
    pub fn matches(&self, title: &str, plain_description: &str) -> bool {
        self.matches_text(&format!("{title} {plain_description}"))
    }
}
