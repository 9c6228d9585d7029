//! Loading options.

/// Options for loading PDF documents.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// How malformed page geometry is handled
    pub error_mode: ErrorMode,

    /// Skip the header sniff before parsing
    pub skip_detection: bool,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (replace malformed boxes with defaults).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Do not check the `%PDF-` header before parsing.
    pub fn skip_detection(mut self) -> Self {
        self.skip_detection = true;
        self
    }
}

/// Error handling mode for page geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on a malformed box or rotation
    #[default]
    Strict,
    /// Log a warning and fall back to defaults
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::new().lenient().skip_detection();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.skip_detection);
    }

    #[test]
    fn test_default_options() {
        let options = LoadOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(!options.skip_detection);
    }
}
