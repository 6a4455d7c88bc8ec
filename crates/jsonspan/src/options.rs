/// Nesting limit used by [`ScanOptions::default`].
pub const DEFAULT_MAX_DEPTH: u8 = 20;

/// Configuration for the scanner.
///
/// # Examples
///
/// ```rust
/// use jsonspan::{ScanError, ScanOptions, validate_with};
///
/// let shallow = ScanOptions { max_depth: 1 };
/// assert_eq!(validate_with(b"[1]", shallow), Ok(3));
/// assert!(matches!(
///     validate_with(b"[[1]]", shallow),
///     Err(ScanError::TooDeep { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum number of simultaneously open arrays and objects.
    ///
    /// Opening a container beyond this limit fails the scan with
    /// [`ScanError::TooDeep`](crate::ScanError::TooDeep). The depth stack is
    /// a fixed inline array, so the limit never causes allocation.
    ///
    /// # Default
    ///
    /// `20`
    pub max_depth: u8,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration for path resolution.
///
/// # Default
///
/// Scanner defaults, and the scan always runs to the end of the first
/// top-level value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Options for the underlying scan.
    pub scan: ScanOptions,

    /// Whether to stop scanning as soon as the path resolves.
    ///
    /// When `false`, the whole value is scanned even after a match, so a
    /// syntax error after the matched value still yields no match. When
    /// `true`, the scanner halts at the matching token and anything after it
    /// is never examined.
    ///
    /// # Default
    ///
    /// `false`
    pub stop_at_match: bool,
}
