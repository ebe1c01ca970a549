/// Switches that change how paths are resolved and applied.
///
/// ```
/// use pw_access::AccessOptions;
///
/// let options = AccessOptions::new().strict_generics(true);
/// assert!(options.create_missing);
/// assert!(options.strict_generics);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessOptions {
    /// Create missing optional values, list entries and map entries
    /// while writing. Defaults to `true`.
    pub create_missing: bool,
    /// Reject containers declared without an element type instead of
    /// treating their elements as raw strings. Defaults to `false`.
    pub strict_generics: bool,
    /// Resolve `length` and `size` on containers to their element count.
    /// Defaults to `true`.
    pub pseudo_properties: bool,
    /// The most placeholder elements a single step may append to a list
    /// to reach the addressed index. Defaults to `1024`.
    pub max_list_padding: usize,
}

impl AccessOptions {
    pub const DEFAULT: Self = Self {
        create_missing: true,
        strict_generics: false,
        pseudo_properties: true,
        max_list_padding: 1024,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub const fn create_missing(mut self, enabled: bool) -> Self {
        self.create_missing = enabled;
        self
    }

    #[inline]
    pub const fn strict_generics(mut self, enabled: bool) -> Self {
        self.strict_generics = enabled;
        self
    }

    #[inline]
    pub const fn pseudo_properties(mut self, enabled: bool) -> Self {
        self.pseudo_properties = enabled;
        self
    }

    #[inline]
    pub const fn max_list_padding(mut self, limit: usize) -> Self {
        self.max_list_padding = limit;
        self
    }
}

impl Default for AccessOptions {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
