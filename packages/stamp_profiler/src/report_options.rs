use foldhash::HashSet;

/// Controls which per-sample detail lines a rendered report contains.
///
/// Every key always gets a summary line. Detail lines listing each individual sample are added
/// either for all keys (see [`need_details()`](Self::need_details)) or only for the keys
/// explicitly named via [`display_key()`](Self::display_key) and
/// [`display_keys()`](Self::display_keys).
///
/// # Examples
///
/// ```
/// use stamp_profiler::ReportOptions;
///
/// // Summary lines only, plus detail lines for "parse".
/// let options = ReportOptions::new().display_key("parse");
/// assert!(!options.needs_details());
/// assert!(options.displays_key("parse"));
///
/// // Detail lines for every key.
/// let options = ReportOptions::detailed();
/// assert!(options.displays_key("anything"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReportOptions {
    need_details: bool,
    display_keys: HashSet<String>,
}

impl ReportOptions {
    /// Options for a summary-only report without detail lines for any key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a report with detail lines for every key.
    #[must_use]
    pub fn detailed() -> Self {
        Self::new().need_details(true)
    }

    /// Sets whether detail lines are rendered for every key.
    #[must_use]
    pub fn need_details(mut self, need_details: bool) -> Self {
        self.need_details = need_details;
        self
    }

    /// Adds a key whose detail lines are rendered even if details are not needed for all keys.
    #[must_use]
    pub fn display_key(mut self, key: impl Into<String>) -> Self {
        self.display_keys.insert(key.into());
        self
    }

    /// Adds several keys whose detail lines are rendered.
    #[must_use]
    pub fn display_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.display_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Whether detail lines are rendered for every key.
    #[must_use]
    pub fn needs_details(&self) -> bool {
        self.need_details
    }

    /// Whether detail lines are rendered for `key`.
    #[must_use]
    pub fn displays_key(&self, key: &str) -> bool {
        self.need_details || self.display_keys.contains(key)
    }
}
