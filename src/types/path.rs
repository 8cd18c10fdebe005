use serde::Serialize;
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

/// The location of a value inside the variables of an operation, for example
/// `variables.images.3`.
///
/// Object keys and list indices are joined with dots, as expected by the `map` field of a
/// multipart request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VariablePath(String);

impl VariablePath {
    /// The path of the variables object itself.
    pub fn root() -> Self {
        Self("variables".to_string())
    }

    /// Path of the value under `key` of the object at this path.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        Self(format!("{}.{}", self.0, key))
    }

    /// Path of the element at `index` of the list at this path.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}.{}", self.0, index))
    }

    /// The path as a string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VariablePath {
    fn default() -> Self {
        Self::root()
    }
}

impl Display for VariablePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for VariablePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for VariablePath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_str() == *other
    }
}

impl From<VariablePath> for String {
    fn from(path: VariablePath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments() {
        let path = VariablePath::root().child("input").child("images").index(3);
        assert_eq!(path, "variables.input.images.3");
        assert_eq!(path.to_string(), "variables.input.images.3");
        assert_eq!(
            serde_json::to_string(&path).unwrap(),
            r#""variables.input.images.3""#
        );
    }
}
