/// Default vocabulary for columns that mean "finished"
pub const DEFAULT_DONE_KEYWORDS: [&str; 6] = [
    "done",
    "complete",
    "finished",
    "готово",
    "завершен",
    "выполнен",
];

/// Classifies columns as terminal by their display name.
///
/// Matching is a case-insensitive substring test; there is no persisted
/// "terminal column" flag on the service side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoneColumnMatcher {
    keywords: Vec<String>,
}

impl DoneColumnMatcher {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_done(&self, column_name: &str) -> bool {
        let name = column_name.to_lowercase();
        self.keywords.iter().any(|keyword| name.contains(keyword.as_str()))
    }
}

impl Default for DoneColumnMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_DONE_KEYWORDS)
    }
}
