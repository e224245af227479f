//! Configuration for page tree traversal.

/// Default bound on how deep a page tree walk may go before giving up.
pub const DEFAULT_MAX_DEPTH: u32 = 256;

/// Page tree traversal configuration.
///
/// Every recursive walk (parent chains during attribute inheritance, kids
/// during counting and leaf collection) is bounded by `max_depth`.
///
/// # Example
///
/// ```
/// use pdf_page_tree::config::PageTreeConfig;
///
/// let config = PageTreeConfig::new().with_max_depth(32);
/// assert_eq!(config.max_depth, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTreeConfig {
    /// Maximum number of levels a single walk may visit.
    pub max_depth: u32,
}

impl Default for PageTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTreeConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum traversal depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}
