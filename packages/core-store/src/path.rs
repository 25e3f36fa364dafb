//! Path type: an ordered sequence of non-empty segments.

use std::fmt;
use std::slice;

/// The separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '/';

/// A segment that cannot be rendered into a key and parsed back.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid segment '{segment}' at position {position}: {reason}")]
pub struct PathError {
    pub segment: String,
    pub position: usize,
    pub reason: String,
}

/// A path into the remote key-value namespace.
///
/// Segments are arbitrary non-empty strings that never contain the
/// separator. The separator itself is not part of the path; it is supplied
/// when the path is rendered to (or parsed from) a transport key.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub components: Vec<String>,
}

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Path::default()
    }

    /// Parse a key using the default `/` separator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvtree_core::Path;
    ///
    /// let path = Path::parse("app/db/host");
    /// assert_eq!(path.len(), 3);
    ///
    /// // Leading, trailing and doubled separators are normalized away
    /// assert_eq!(Path::parse("/app//db/"), Path::parse("app/db"));
    /// ```
    pub fn parse(s: &str) -> Self {
        Self::parse_with(s, DEFAULT_SEPARATOR)
    }

    /// Parse a key split on `separator`.
    ///
    /// Empty segments are dropped, so this never fails.
    pub fn parse_with(s: &str, separator: char) -> Self {
        Path {
            components: s
                .split(separator)
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string())
                .collect(),
        }
    }

    /// Validate a single path segment.
    pub fn validate_component(
        component: &str,
        position: usize,
        separator: char,
    ) -> Result<(), PathError> {
        if component.is_empty() {
            return Err(PathError {
                segment: String::new(),
                position,
                reason: "empty segment".to_string(),
            });
        }

        if component.contains(separator) {
            return Err(PathError {
                segment: component.to_string(),
                position,
                reason: format!("contains the separator '{}'", separator),
            });
        }

        Ok(())
    }

    /// Check if this path is empty (root path).
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over components.
    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.components.iter()
    }

    /// Return a new path with `segment` appended.
    ///
    /// The segment is validated against `separator`.
    pub fn child(&self, segment: &str, separator: char) -> Result<Path, PathError> {
        Self::validate_component(segment, self.components.len(), separator)?;
        let mut components = self.components.clone();
        components.push(segment.to_string());
        Ok(Path { components })
    }

    /// Render as a transport key.
    pub fn to_key(&self, separator: char) -> String {
        self.components.join(&separator.to_string())
    }

    /// Render as a directory-marker key (trailing separator).
    ///
    /// The root renders as the empty string; it has nothing to mark.
    pub fn to_directory_key(&self, separator: char) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut key = self.to_key(separator);
        key.push(separator);
        key
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_key(DEFAULT_SEPARATOR))
    }
}

/// Macro for creating `/`-separated paths.
///
/// # Example
///
/// ```rust
/// use kvtree_core::path;
///
/// let p = path!("app/db/host");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s)
    };
}
