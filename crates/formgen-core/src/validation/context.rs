//! Path tracking for validation walks

use std::fmt;

/// Tracks the JSON path of the value currently being checked, so every
/// reported violation can name its exact location in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    path: String,
}

impl PathContext {
    /// A context rooted at the document root (`$`)
    pub fn root() -> Self {
        Self {
            path: "$".to_string(),
        }
    }

    /// Descend into an object key
    pub fn child<S: AsRef<str>>(&self, segment: S) -> Self {
        Self {
            path: format!("{}.{}", self.path, segment.as_ref()),
        }
    }

    /// Descend into an array element
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
        }
    }

    /// The accumulated JSON path
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for PathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
