mod matching;
pub mod path;

use path::{Key, Path};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Configuration for how two JSON documents are compared.
///
/// Both toggles default to off: arrays must match index for index and the
/// actual document may not carry fields the expected one lacks. The
/// combinators return a new value and leave the receiver usable, so a base
/// comparator can be specialized per call site.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Comparator {
    pub(crate) any_array_order: bool,
    pub(crate) allow_extra_fields: bool,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat arrays as equivalent regardless of element order.
    ///
    /// Order insensitivity relaxes position only, never cardinality: the
    /// arrays still have to be the same length.
    pub fn with_any_array_order(mut self) -> Self {
        self.any_array_order = true;
        self
    }

    /// Tolerate fields in the actual document that the expected one lacks.
    ///
    /// Fields present in expected but missing from actual always fail,
    /// whatever the configuration.
    pub fn with_extra_fields_allowed(mut self) -> Self {
        self.allow_extra_fields = true;
        self
    }

    /// Compares `actual` against `expected`, reporting the first divergence.
    pub fn compare<'a>(&self, expected: &'a Value, actual: &'a Value) -> ComparisonResult<'a> {
        match compare_values(expected, actual, Path::Root, *self) {
            Ok(()) => ComparisonResult::Pass,
            Err(failure) => ComparisonResult::Fail(failure),
        }
    }
}

/// Outcome of one comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonResult<'a> {
    Pass,
    Fail(Failure<'a>),
}

impl<'a> ComparisonResult<'a> {
    pub fn passed(&self) -> bool {
        matches!(self, ComparisonResult::Pass)
    }

    pub fn failed(&self) -> bool {
        !self.passed()
    }

    pub fn failure(&self) -> Option<&Failure<'a>> {
        match self {
            ComparisonResult::Pass => None,
            ComparisonResult::Fail(failure) => Some(failure),
        }
    }

    /// Rendered explanation of the divergence, if any.
    pub fn describe(&self) -> Option<String> {
        self.failure().map(|failure| failure.to_string())
    }
}

/// The witness of a failed comparison: where the documents diverge and how.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure<'a> {
    pub path: Path<'a>,
    pub mismatch: Mismatch<'a>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Mismatch<'a> {
    /// The values are of incompatible kinds, e.g. object vs array.
    Kind {
        expected: &'a Value,
        actual: &'a Value,
    },
    /// Same kind, unequal value.
    Value {
        expected: &'a Value,
        actual: &'a Value,
    },
    /// An expected object key is absent from actual.
    MissingField { key: &'a str, expected: &'a Value },
    /// An actual object key is absent from expected. Only surfaced when
    /// extra fields are disallowed.
    UnexpectedField { key: &'a str, actual: &'a Value },
    /// The arrays have different lengths.
    Length {
        expected_len: usize,
        actual_len: usize,
    },
    /// Under order-insensitive comparison, no actual element is equivalent
    /// to this expected element.
    UnmatchedElement { index: usize, element: &'a Value },
}

impl<'a> fmt::Display for Failure<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pretty = |value: &Value| serde_json::to_string_pretty(value).unwrap();

        match &self.mismatch {
            Mismatch::Kind { expected, actual } => {
                writeln!(
                    f,
                    "json kinds at path \"{}\" differ: expected {} but got {}:",
                    self.path,
                    kind_name(expected),
                    kind_name(actual)
                )?;
                writeln!(f, "    expected:")?;
                writeln!(f, "{}", indent(&pretty(expected), 8))?;
                writeln!(f, "    actual:")?;
                write!(f, "{}", indent(&pretty(actual), 8))
            }
            Mismatch::Value { expected, actual } => {
                writeln!(f, "json atoms at path \"{}\" are not equal:", self.path)?;
                writeln!(f, "    expected:")?;
                writeln!(f, "{}", indent(&pretty(expected), 8))?;
                writeln!(f, "    actual:")?;
                write!(f, "{}", indent(&pretty(actual), 8))
            }
            Mismatch::MissingField { expected, .. } => {
                writeln!(
                    f,
                    "json atom at path \"{}\" is missing from actual:",
                    self.path
                )?;
                writeln!(f, "    expected:")?;
                write!(f, "{}", indent(&pretty(expected), 8))
            }
            Mismatch::UnexpectedField { actual, .. } => {
                writeln!(
                    f,
                    "json atom at path \"{}\" is missing from expected:",
                    self.path
                )?;
                writeln!(f, "    actual:")?;
                write!(f, "{}", indent(&pretty(actual), 8))
            }
            Mismatch::Length {
                expected_len,
                actual_len,
            } => {
                write!(
                    f,
                    "json arrays at path \"{}\" differ in length: expected {} elements, got {}",
                    self.path, expected_len, actual_len
                )
            }
            Mismatch::UnmatchedElement { element, .. } => {
                writeln!(
                    f,
                    "json atom at path \"{}\" matches no element of the actual array:",
                    self.path
                )?;
                writeln!(f, "    expected:")?;
                write!(f, "{}", indent(&pretty(element), 8))
            }
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn compare_values<'a>(
    expected: &'a Value,
    actual: &'a Value,
    path: Path<'a>,
    comparator: Comparator,
) -> Result<(), Failure<'a>> {
    match (expected, actual) {
        (Value::Null, Value::Null) => Ok(()),
        (Value::Bool(expected_flag), Value::Bool(actual_flag)) => {
            if expected_flag == actual_flag {
                Ok(())
            } else {
                Err(Failure {
                    path,
                    mismatch: Mismatch::Value { expected, actual },
                })
            }
        }
        (Value::Number(expected_number), Value::Number(actual_number)) => {
            if numbers_equal(expected_number, actual_number) {
                Ok(())
            } else {
                Err(Failure {
                    path,
                    mismatch: Mismatch::Value { expected, actual },
                })
            }
        }
        (Value::String(expected_text), Value::String(actual_text)) => {
            if expected_text == actual_text {
                Ok(())
            } else {
                Err(Failure {
                    path,
                    mismatch: Mismatch::Value { expected, actual },
                })
            }
        }
        (Value::Object(expected_fields), Value::Object(actual_fields)) => {
            compare_objects(expected_fields, actual_fields, path, comparator)
        }
        (Value::Array(expected_elements), Value::Array(actual_elements)) => {
            compare_arrays(expected_elements, actual_elements, path, comparator)
        }
        _ => Err(Failure {
            path,
            mismatch: Mismatch::Kind { expected, actual },
        }),
    }
}

/// Two JSON numbers denote the same mathematical value. `3` equals `3.0`,
/// and 64-bit integers are compared at full precision rather than through
/// `f64`.
fn numbers_equal(expected: &Number, actual: &Number) -> bool {
    if let (Some(expected_int), Some(actual_int)) = (expected.as_i64(), actual.as_i64()) {
        return expected_int == actual_int;
    }
    if let (Some(expected_int), Some(actual_int)) = (expected.as_u64(), actual.as_u64()) {
        return expected_int == actual_int;
    }
    expected.as_f64() == actual.as_f64()
}

fn compare_objects<'a>(
    expected: &'a Map<String, Value>,
    actual: &'a Map<String, Value>,
    path: Path<'a>,
    comparator: Comparator,
) -> Result<(), Failure<'a>> {
    for (key, expected_value) in expected {
        let field_path = path.append(Key::Field(key));
        match actual.get(key) {
            Some(actual_value) => {
                compare_values(expected_value, actual_value, field_path, comparator)?
            }
            None => {
                return Err(Failure {
                    path: field_path,
                    mismatch: Mismatch::MissingField {
                        key,
                        expected: expected_value,
                    },
                })
            }
        }
    }

    if !comparator.allow_extra_fields {
        for (key, actual_value) in actual {
            if !expected.contains_key(key) {
                return Err(Failure {
                    path: path.append(Key::Field(key)),
                    mismatch: Mismatch::UnexpectedField {
                        key,
                        actual: actual_value,
                    },
                });
            }
        }
    }

    Ok(())
}

fn compare_arrays<'a>(
    expected: &'a [Value],
    actual: &'a [Value],
    path: Path<'a>,
    comparator: Comparator,
) -> Result<(), Failure<'a>> {
    // Order insensitivity never tolerates extra or missing elements.
    if expected.len() != actual.len() {
        return Err(Failure {
            path,
            mismatch: Mismatch::Length {
                expected_len: expected.len(),
                actual_len: actual.len(),
            },
        });
    }

    if comparator.any_array_order {
        match matching::find_assignment(expected, actual, comparator) {
            Ok(_) => Ok(()),
            Err(index) => Err(Failure {
                path: path.append(Key::Idx(index)),
                mismatch: Mismatch::UnmatchedElement {
                    index,
                    element: &expected[index],
                },
            }),
        }
    } else {
        for (index, (expected_value, actual_value)) in expected.iter().zip(actual).enumerate() {
            compare_values(
                expected_value,
                actual_value,
                path.append(Key::Idx(index)),
                comparator,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn all_comparators() -> [Comparator; 4] {
        [
            Comparator::new(),
            Comparator::new().with_any_array_order(),
            Comparator::new().with_extra_fields_allowed(),
            Comparator::new()
                .with_any_array_order()
                .with_extra_fields_allowed(),
        ]
    }

    #[test]
    fn test_leaf_values() {
        let comparator = Comparator::new();

        assert!(comparator.compare(&json!(null), &json!(null)).passed());
        assert!(comparator.compare(&json!(true), &json!(true)).passed());
        assert!(comparator.compare(&json!(false), &json!(true)).failed());
        assert!(comparator.compare(&json!(3), &json!(3)).passed());
        assert!(comparator.compare(&json!(3), &json!(4)).failed());
        assert!(comparator.compare(&json!("abc"), &json!("abc")).passed());
        assert!(comparator.compare(&json!("abc"), &json!("abd")).failed());
        assert!(comparator.compare(&json!("abc"), &json!("ABC")).failed());
    }

    #[test]
    fn test_numeric_equivalence() {
        let comparator = Comparator::new();

        assert!(comparator.compare(&json!(3), &json!(3.0)).passed());
        assert!(comparator.compare(&json!(3.0), &json!(3)).passed());
        assert!(comparator.compare(&json!(1.5), &json!(1.5)).passed());
        assert!(comparator.compare(&json!(1.5), &json!(1.25)).failed());
        assert!(comparator.compare(&json!(0), &json!(0.0)).passed());

        // Values outside f64's exact integer range still compare exactly.
        assert!(comparator
            .compare(&json!(u64::MAX), &json!(u64::MAX))
            .passed());
        assert!(comparator
            .compare(&json!(u64::MAX), &json!(u64::MAX - 1))
            .failed());
        assert!(comparator
            .compare(&json!(i64::MIN), &json!(i64::MIN))
            .passed());
        assert!(comparator.compare(&json!(-1), &json!(u64::MAX)).failed());
    }

    #[test]
    fn test_kind_mismatch() {
        let comparator = Comparator::new();

        let expected = json!({});
        let actual = json!([]);
        let result = comparator.compare(&expected, &actual);
        assert!(matches!(
            result.failure().unwrap().mismatch,
            Mismatch::Kind { .. }
        ));

        assert!(comparator.compare(&json!(null), &json!(0)).failed());
        assert!(comparator.compare(&json!("3"), &json!(3)).failed());
        assert!(comparator.compare(&json!(1), &json!(true)).failed());
    }

    #[test]
    fn test_empty_objects() {
        assert!(Comparator::new().compare(&json!({}), &json!({})).passed());
    }

    #[test]
    fn test_unexpected_field() {
        let expected = json!({});
        let actual = json!({ "foo": 3 });

        let result = Comparator::new().compare(&expected, &actual);
        let failure = result.failure().unwrap();
        assert_eq!(failure.path.to_string(), ".foo");
        assert!(matches!(
            failure.mismatch,
            Mismatch::UnexpectedField { key: "foo", .. }
        ));
    }

    #[test]
    fn test_extra_fields_allowed() {
        let expected = json!({ "b": 7 });
        let actual = json!({ "a": 3, "b": 7 });

        assert!(Comparator::new().compare(&expected, &actual).failed());
        assert!(Comparator::new()
            .with_extra_fields_allowed()
            .compare(&expected, &actual)
            .passed());
    }

    #[test]
    fn test_missing_field_never_tolerated() {
        let expected = json!({ "a": 3, "b": 7 });
        let actual = json!({ "b": 7 });

        for comparator in all_comparators() {
            let result = comparator.compare(&expected, &actual);
            let failure = result.failure().unwrap();
            assert_eq!(failure.path.to_string(), ".a");
            assert!(matches!(
                failure.mismatch,
                Mismatch::MissingField { key: "a", .. }
            ));
        }
    }

    #[test]
    fn test_nested_object_path() {
        let expected = json!({ "user": { "address": { "street": "29 Acacia Road" } } });
        let actual = json!({ "user": { "address": { "street": "30 Acacia Road" } } });

        let result = Comparator::new().compare(&expected, &actual);
        let failure = result.failure().unwrap();
        assert_eq!(failure.path.to_string(), ".user.address.street");
        assert!(matches!(failure.mismatch, Mismatch::Value { .. }));
    }

    #[test]
    fn test_ordered_arrays() {
        let comparator = Comparator::new();

        assert!(comparator.compare(&json!([]), &json!([])).passed());
        assert!(comparator.compare(&json!([1, 2, 3]), &json!([1, 2, 3])).passed());
        assert!(comparator.compare(&json!([1, 2, 3]), &json!([1, 3, 2])).failed());

        let expected = json!([1, 2, 3]);
        let actual = json!([1, 9, 3]);
        let result = comparator.compare(&expected, &actual);
        let failure = result.failure().unwrap();
        assert_eq!(failure.path.to_string(), "[1]");
        assert!(matches!(failure.mismatch, Mismatch::Value { .. }));
    }

    #[test]
    fn test_array_length_mismatch() {
        let expected = json!([1, 2, 3]);
        let actual = json!([1, 2]);
        for comparator in all_comparators() {
            let result = comparator.compare(&expected, &actual);
            assert!(matches!(
                result.failure().unwrap().mismatch,
                Mismatch::Length {
                    expected_len: 3,
                    actual_len: 2,
                }
            ));
        }
    }

    #[test]
    fn test_any_array_order() {
        let expected = json!([5, 2, 1]);
        let actual = json!([1, 5, 2]);

        assert!(Comparator::new().compare(&expected, &actual).failed());
        assert!(Comparator::new()
            .with_any_array_order()
            .compare(&expected, &actual)
            .passed());
    }

    #[test]
    fn test_unmatched_element_witness() {
        let expected = json!([1, 2, 3]);
        let actual = json!([1, 9, 9]);

        let result = Comparator::new()
            .with_any_array_order()
            .compare(&expected, &actual);
        let failure = result.failure().unwrap();
        assert_eq!(failure.path.to_string(), "[1]");
        assert!(matches!(
            failure.mismatch,
            Mismatch::UnmatchedElement {
                index: 1,
                element: &Value::Number(_),
            }
        ));
    }

    #[test]
    fn test_any_order_recurses_into_elements() {
        let expected = json!([{ "arr": [5, 2, 1] }]);
        let actual = json!([{ "b": 3, "arr": [1, 5, 2] }]);

        // Order insensitivity alone does not excuse the extra field.
        assert!(Comparator::new()
            .with_any_array_order()
            .compare(&expected, &actual)
            .failed());
        assert!(Comparator::new()
            .with_any_array_order()
            .with_extra_fields_allowed()
            .compare(&expected, &actual)
            .passed());
    }

    #[test]
    fn test_reflexivity() {
        let document = json!({
            "id": 42,
            "name": "John Smith",
            "scores": [3, 1.5, null, true],
            "address": { "street": "29 Acacia Road", "tags": [["a"], ["b", "c"]] },
        });

        for comparator in all_comparators() {
            assert!(comparator.compare(&document, &document).passed());
        }
    }

    #[test]
    fn test_relaxing_flags_preserves_passes() {
        let cases = [
            (json!({ "a": [1, 2] }), json!({ "a": [1, 2] })),
            (json!([{ "x": 1 }]), json!([{ "x": 1 }])),
            (json!(3), json!(3.0)),
        ];

        for (expected, actual) in &cases {
            assert!(Comparator::new().compare(expected, actual).passed());
            for comparator in all_comparators() {
                assert!(comparator.compare(expected, actual).passed());
            }
        }
    }

    #[test]
    fn test_combinators_leave_base_unchanged() {
        let base = Comparator::new();
        let relaxed = base.with_any_array_order().with_extra_fields_allowed();

        assert_eq!(base, Comparator::new());
        assert_ne!(base, relaxed);
        assert!(base.compare(&json!([2, 1]), &json!([1, 2])).failed());
        assert!(relaxed.compare(&json!([2, 1]), &json!([1, 2])).passed());
    }

    #[test]
    fn test_describe_value_mismatch() {
        let expected = json!({ "fib": [0, 1, 1, 2, 3] });
        let actual = json!({ "fib": [0, 1, 1, 2, 4] });

        let result = Comparator::new().compare(&expected, &actual);
        let description = result.describe().unwrap();
        assert!(description.contains("\".fib[4]\""));
        assert!(description.contains("3"));
        assert!(description.contains("4"));
    }

    #[test]
    fn test_describe_kind_mismatch() {
        let expected = json!({ "value": 3 });
        let actual = json!({ "value": "3" });

        let description = Comparator::new()
            .compare(&expected, &actual)
            .describe()
            .unwrap();
        assert!(description.contains("a number"));
        assert!(description.contains("a string"));
        assert!(description.contains("\".value\""));
    }

    #[test]
    fn test_describe_none_on_pass() {
        let value = json!(1);
        let result = Comparator::new().compare(&value, &value);
        assert!(result.passed());
        assert_eq!(result.describe(), None);
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("foo", 2), "  foo");
        assert_eq!(indent("foo\nbar", 2), "  foo\n  bar");
    }
}
