//! Best-effort lookup of previous values.

use std::borrow::Cow;

use serde_json::Value;

use patchdiff_types::PathSegment;

/// Name of the synthetic entry reporting the length of arrays and strings.
pub const LENGTH_KEY: &str = "length";

/// Walk `state` along `path` and return what is there, if anything.
///
/// Any step that cannot be taken (a missing key, an index past the end, or
/// stepping into a scalar or `null`) ends the walk with `None`. The empty
/// path returns `state` itself. Indices address object keys by their
/// decimal form, and canonical numeric keys address array positions.
///
/// `length` on an array or string yields its length, computed rather than
/// borrowed. Strings count UTF-16 code units.
pub fn try_get<'a>(state: &'a Value, path: &[PathSegment]) -> Option<Cow<'a, Value>> {
    let mut current = state;
    for (depth, segment) in path.iter().enumerate() {
        match step(current, segment)? {
            Step::Descend(next) => current = next,
            Step::Length(len) => {
                // A length is a number; nothing lies below it.
                return (depth + 1 == path.len()).then(|| Cow::Owned(Value::from(len)));
            }
        }
    }
    Some(Cow::Borrowed(current))
}

enum Step<'a> {
    Descend(&'a Value),
    Length(usize),
}

fn step<'a>(current: &'a Value, segment: &PathSegment) -> Option<Step<'a>> {
    match current {
        Value::Object(map) => map.get(&*segment.as_key()).map(Step::Descend),
        Value::Array(items) => match segment.as_index() {
            Some(i) => items.get(i).map(Step::Descend),
            None if segment.as_key() == LENGTH_KEY => Some(Step::Length(items.len())),
            None => None,
        },
        Value::String(s) if segment.as_key() == LENGTH_KEY => {
            Some(Step::Length(s.encode_utf16().count()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(p: Value) -> Vec<PathSegment> {
        serde_json::from_value(p).unwrap()
    }

    fn get(state: &Value, p: Value) -> Option<Value> {
        try_get(state, &path(p)).map(Cow::into_owned)
    }

    #[test]
    fn finds_nested_values() {
        let state = json!({"a": {"b": [10, {"c": 2}]}});
        assert_eq!(get(&state, json!(["a", "b", 1, "c"])), Some(json!(2)));
        assert_eq!(get(&state, json!(["a", "b", 0])), Some(json!(10)));
        assert!(matches!(try_get(&state, &path(json!(["a"]))), Some(Cow::Borrowed(_))));
    }

    #[test]
    fn empty_path_is_whole_state() {
        let state = json!({"a": 1});
        assert_eq!(try_get(&state, &[]).as_deref(), Some(&state));
    }

    #[test]
    fn missing_steps_absorb_to_none() {
        let state = json!({"a": {"b": 1}, "n": null, "list": [1]});
        assert_eq!(get(&state, json!(["x"])), None);
        assert_eq!(get(&state, json!(["x", "y", "z"])), None);
        assert_eq!(get(&state, json!(["a", "b", "c"])), None);
        assert_eq!(get(&state, json!(["n", "c"])), None);
        assert_eq!(get(&state, json!(["list", 5])), None);
        assert_eq!(get(&state, json!(["list", "first"])), None);
        assert_eq!(get(&state, json!(["list", 1_000_000_000_000u64])), None);
    }

    #[test]
    fn explicit_null_is_found() {
        let state = json!({"n": null});
        assert_eq!(get(&state, json!(["n"])), Some(Value::Null));
    }

    #[test]
    fn cross_kind_segments() {
        let state = json!({"0": "zero", "list": ["a", "b"]});
        assert_eq!(get(&state, json!([0])), Some(json!("zero")));
        assert_eq!(get(&state, json!(["list", "1"])), Some(json!("b")));
    }

    #[test]
    fn length_of_arrays_and_strings() {
        let state = json!({"d": ["bar", "baz"], "c": "foo", "o": {"length": 9}, "e": "é"});
        assert_eq!(get(&state, json!(["d", "length"])), Some(json!(2)));
        assert_eq!(get(&state, json!(["c", "length"])), Some(json!(3)));
        assert_eq!(get(&state, json!(["e", "length"])), Some(json!(1)));
        assert_eq!(get(&state, json!(["o", "length"])), Some(json!(9)));
        assert_eq!(get(&state, json!(["d", "length", "x"])), None);
        assert_eq!(get(&state, json!(["d", "size"])), None);
    }
}
