use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PatchFormatError, PatchResult};

/// One step of a [`Path`]: an array index or an object key.
///
/// Serialized untagged, so the JSON path `["items", 0, "name"]` maps to
/// `[Key("items"), Index(0), Key("name")]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Position inside an ordered sequence.
    Index(u64),
    /// Name of an entry inside a mapping.
    Key(String),
}

/// Ordered sequence of segments. The empty path addresses the root.
pub type Path = Vec<PathSegment>;

/// Largest position an array slot can have (`2^32 - 2`). Larger indices
/// address named entries instead, as they do on script arrays.
pub const MAX_ARRAY_INDEX: u64 = u32::MAX as u64 - 1;

impl PathSegment {
    /// Parse one JSON path element. `position` is only used for error reporting.
    pub fn from_json(value: &Value, position: usize) -> PatchResult<Self> {
        match value {
            Value::String(key) => Ok(Self::Key(key.clone())),
            Value::Number(n) => n.as_u64().map(Self::Index).ok_or_else(|| {
                PatchFormatError::InvalidSegment {
                    position,
                    found: n.to_string(),
                }
            }),
            other => Err(PatchFormatError::InvalidSegment {
                position,
                found: other.to_string(),
            }),
        }
    }

    /// Returns `true` for [`PathSegment::Index`].
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// The array position this segment addresses, if any.
    ///
    /// Keys count as positions when they are canonical decimal integers
    /// (`"3"`, not `"03"` or `"+3"`), the same way property access on an
    /// array treats them. Anything above [`MAX_ARRAY_INDEX`] is not a
    /// position.
    pub fn as_index(&self) -> Option<usize> {
        let index = match self {
            Self::Index(i) => *i,
            Self::Key(key) => canonical_index(key)?,
        };
        if index > MAX_ARRAY_INDEX {
            return None;
        }
        usize::try_from(index).ok()
    }

    /// The object key this segment addresses. Indices use their decimal form.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Self::Index(i) => Cow::Owned(i.to_string()),
            Self::Key(key) => Cow::Borrowed(key),
        }
    }
}

/// Parse a JSON array into a [`Path`].
pub fn path_from_json(value: &Value) -> PatchResult<Path> {
    let Value::Array(items) = value else {
        return Err(PatchFormatError::PathNotArray(value.to_string()));
    };
    items
        .iter()
        .enumerate()
        .map(|(position, item)| PathSegment::from_json(item, position))
        .collect()
}

fn canonical_index(key: &str) -> Option<u64> {
    let canonical = key == "0"
        || (!key.is_empty() && !key.starts_with('0') && key.bytes().all(|b| b.is_ascii_digit()));
    if canonical {
        key.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(key) => write!(f, "{key:?}"),
        }
    }
}

impl From<u64> for PathSegment {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index as u64)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_mixed_path() {
        let path = path_from_json(&json!(["items", 0, "name"])).unwrap();
        assert_eq!(
            path,
            vec![
                PathSegment::from("items"),
                PathSegment::Index(0),
                PathSegment::from("name"),
            ]
        );
    }

    #[test]
    fn empty_path_is_root() {
        assert!(path_from_json(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array_path() {
        let err = path_from_json(&json!("a/b")).unwrap_err();
        assert!(matches!(err, PatchFormatError::PathNotArray(_)));
    }

    #[test]
    fn rejects_negative_and_fractional_indices() {
        let err = path_from_json(&json!(["a", -1])).unwrap_err();
        assert_eq!(
            err,
            PatchFormatError::InvalidSegment {
                position: 1,
                found: "-1".into()
            }
        );
        assert!(path_from_json(&json!([1.5])).is_err());
        assert!(path_from_json(&json!([null])).is_err());
        assert!(path_from_json(&json!([{"k": 1}])).is_err());
    }

    #[test]
    fn canonical_keys_act_as_indices() {
        assert_eq!(PathSegment::from("0").as_index(), Some(0));
        assert_eq!(PathSegment::from("12").as_index(), Some(12));
        assert_eq!(PathSegment::from("012").as_index(), None);
        assert_eq!(PathSegment::from("+1").as_index(), None);
        assert_eq!(PathSegment::from("").as_index(), None);
        assert_eq!(PathSegment::from("name").as_index(), None);
    }

    #[test]
    fn huge_indices_are_not_positions() {
        assert_eq!(
            PathSegment::Index(MAX_ARRAY_INDEX).as_index(),
            usize::try_from(MAX_ARRAY_INDEX).ok()
        );
        assert_eq!(PathSegment::Index(MAX_ARRAY_INDEX + 1).as_index(), None);
        assert_eq!(PathSegment::Index(1_000_000_000_000).as_index(), None);
        assert_eq!(PathSegment::from("4294967295").as_index(), None);
        assert_eq!(PathSegment::from("99999999999999999999999").as_index(), None);
        assert_eq!(PathSegment::Index(1_000_000_000_000).as_key(), "1000000000000");
    }

    #[test]
    fn indices_act_as_keys() {
        assert_eq!(PathSegment::Index(7).as_key(), "7");
        assert_eq!(PathSegment::from("x").as_key(), "x");
    }

    #[test]
    fn serde_is_untagged() {
        let path: Path = serde_json::from_value(json!(["a", 2])).unwrap();
        assert_eq!(path, vec![PathSegment::from("a"), PathSegment::Index(2)]);
        assert_eq!(serde_json::to_value(&path).unwrap(), json!(["a", 2]));
    }
}
