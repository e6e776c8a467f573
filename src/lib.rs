// Copyright 2025 The SameJSON Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

use serde::Serialize;
use serde_json::Value;
use std::fmt;

mod compare;

pub use compare::path::{Key, Path};
pub use compare::{Comparator, ComparisonResult, Failure, Mismatch};

/// Matcher asserting that one JSON document is structurally equivalent to
/// another.
///
/// The matcher holds the expected document together with a [`Comparator`].
/// The `allowing_*` combinators return a reconfigured matcher and leave the
/// receiver usable, so a base matcher can be specialized per assertion.
///
/// # Examples
///
/// ```
/// use same_json::same_json_as;
/// use serde_json::json;
///
/// let expected = json!({"fib": [0, 1, 1, 2, 3]});
/// let actual = json!({"fib": [3, 1, 0, 2, 1]});
///
/// assert!(same_json_as(&expected)
///     .allowing_any_array_order()
///     .matches(&actual));
/// ```
#[derive(Debug, Copy, Clone)]
pub struct SameJsonAs<'a> {
    expected: &'a Value,
    comparator: Comparator,
}

/// Creates a matcher comparing against `expected` under the default
/// [`Comparator`].
pub fn same_json_as(expected: &Value) -> SameJsonAs<'_> {
    SameJsonAs {
        expected,
        comparator: Comparator::new(),
    }
}

impl<'a> SameJsonAs<'a> {
    /// Allows any element ordering within JSON arrays. For example,
    /// `{"fib":[0,1,1,2,3]}` will match `{"fib":[3,1,0,2,1]}`.
    pub fn allowing_any_array_order(mut self) -> Self {
        self.comparator = self.comparator.with_any_array_order();
        self
    }

    /// Allows fields in the actual document that the expected document
    /// lacks. Fields present in expected but missing from actual still
    /// fail, and array elements must exist in both documents.
    pub fn allowing_extra_fields(mut self) -> Self {
        self.comparator = self.comparator.with_extra_fields_allowed();
        self
    }

    /// The comparator this matcher compares with.
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn matches(&self, actual: &Value) -> bool {
        self.check(actual).passed()
    }

    /// Compares `actual` against the expected document, returning the full
    /// result with the witness of the first divergence on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use same_json::same_json_as;
    /// use serde_json::json;
    ///
    /// let expected = json!({"name": "John Smith"});
    /// let actual = json!({"name": "Bob Jones"});
    ///
    /// let result = same_json_as(&expected).check(&actual);
    /// assert!(result.failed());
    /// assert!(result.describe().unwrap().contains(".name"));
    /// ```
    pub fn check<'v>(&self, actual: &'v Value) -> ComparisonResult<'v>
    where
        'a: 'v,
    {
        self.comparator.compare(self.expected, actual)
    }
}

/// Error type for the assertion helpers.
#[derive(Debug)]
pub enum AssertionError {
    /// A document could not be converted into a JSON value.
    MalformedDocument(String),
    /// The documents are not structurally equivalent.
    DocumentsDiffer(String),
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionError::MalformedDocument(message) => {
                write!(f, "malformed document: {}", message)
            }
            AssertionError::DocumentsDiffer(description) => {
                write!(f, "documents differ: {}", description)
            }
        }
    }
}

/// Compares two serializable documents, reporting the first divergence.
///
/// This is the non-panicking form of [`assert_same_json!`]: both documents
/// are serialized to JSON values and compared under `comparator`. A document
/// without a JSON value form (for example a map with non-string keys) is
/// fatal to the comparison and reported as
/// [`AssertionError::MalformedDocument`].
///
/// # Examples
///
/// ```
/// use same_json::{check_same_json, Comparator};
/// use serde_json::json;
///
/// let result = check_same_json(
///     &json!([5, 2, 1]),
///     &json!([1, 5, 2]),
///     Comparator::new().with_any_array_order(),
/// );
/// assert!(result.is_ok());
/// ```
pub fn check_same_json<E, A>(
    expected: &E,
    actual: &A,
    comparator: Comparator,
) -> Result<(), AssertionError>
where
    E: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    let expected = serde_json::to_value(expected)
        .map_err(|err| AssertionError::MalformedDocument(err.to_string()))?;
    let actual = serde_json::to_value(actual)
        .map_err(|err| AssertionError::MalformedDocument(err.to_string()))?;

    match comparator.compare(&expected, &actual).describe() {
        None => Ok(()),
        Some(description) => Err(AssertionError::DocumentsDiffer(description)),
    }
}

/// Panics unless the two documents are structurally equivalent under the
/// default [`Comparator`].
///
/// # Examples
///
/// ```
/// use same_json::assert_same_json;
/// use serde_json::json;
///
/// assert_same_json!(json!({"id": 1}), json!({"id": 1}));
/// ```
#[macro_export]
macro_rules! assert_same_json {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert_same_json_with!($expected, $actual, $crate::Comparator::new())
    };
}

/// Panics unless the two documents are structurally equivalent under the
/// given [`Comparator`].
///
/// # Examples
///
/// ```
/// use same_json::{assert_same_json_with, Comparator};
/// use serde_json::json;
///
/// assert_same_json_with!(
///     json!([5, 2, 1]),
///     json!([1, 5, 2]),
///     Comparator::new().with_any_array_order(),
/// );
/// ```
#[macro_export]
macro_rules! assert_same_json_with {
    ($expected:expr, $actual:expr, $comparator:expr $(,)?) => {
        match $crate::check_same_json(&$expected, &$actual, $comparator) {
            Ok(()) => {}
            Err(err) => panic!("{}", err),
        }
    };
}
