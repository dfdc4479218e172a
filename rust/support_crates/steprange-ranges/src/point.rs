//! A single addressable location in a range chain.

use std::sync::Arc;

use steprange_common::Value;

use crate::source::{SharedSource, Source};

/// The role a [`Point`] plays in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// Always emits its own resolved value and never combines with a neighbor.
    Stop,
    /// Paired with an adjacent step, bounds a derivable run.
    Step,
}

/// A stop or step carrying a value and an optional indirection source.
///
/// Without a source (or with an empty one) the point stands for `value`.
/// With a non-empty source, `value` is an index and the point stands for
/// `source[value]`.
#[derive(Debug, Clone)]
pub struct Point {
    kind: PointKind,
    value: Value,
    source: Option<SharedSource>,
}

impl Point {
    pub fn new(kind: PointKind, value: impl Into<Value>, source: Option<SharedSource>) -> Point {
        Point {
            kind,
            value: value.into(),
            source,
        }
    }

    pub fn stop(value: impl Into<Value>) -> Point {
        Point::new(PointKind::Stop, value, None)
    }

    pub fn step(value: impl Into<Value>) -> Point {
        Point::new(PointKind::Step, value, None)
    }

    /// Attaches `source`, replacing any previous one.
    pub fn with_source(self, source: impl Source + 'static) -> Point {
        self.with_shared_source(Arc::new(source))
    }

    pub fn with_shared_source(mut self, source: SharedSource) -> Point {
        self.source = Some(source);
        self
    }

    pub fn kind(&self) -> PointKind {
        self.kind
    }

    pub fn is_step(&self) -> bool {
        self.kind == PointKind::Step
    }

    /// The raw value, before any source indirection.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn source(&self) -> Option<&SharedSource> {
        self.source.as_ref()
    }

    /// Returns `true` if a non-empty source is attached.
    ///
    /// An empty source behaves exactly like no source.
    pub fn has_source(&self) -> bool {
        self.source.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Resolves the value this point stands for.
    ///
    /// Returns `source[value]` when a non-empty source is attached (`None` if
    /// `value` is not an integer or falls outside the source), otherwise the
    /// raw value.
    pub fn effective_value(&self) -> Option<Value> {
        if self.has_source() {
            self.value.as_i64().and_then(|index| self.lookup(index))
        } else {
            Some(self.value.clone())
        }
    }

    /// Resolves `index` against the attached source.
    ///
    /// Returns `None` when no source is attached or `index` is out of range.
    pub fn lookup(&self, index: i64) -> Option<Value> {
        self.source.as_ref().and_then(|s| s.lookup(index))
    }

    /// The effective value as an integer, if it is one.
    pub(crate) fn effective_int(&self) -> Option<i64> {
        if self.has_source() {
            self.effective_value().and_then(|v| v.as_i64())
        } else {
            self.value.as_i64()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, PointKind};
    use steprange_common::Value;

    fn source() -> Value {
        Value::from(vec![0, 1, 34231])
    }

    #[test]
    fn test_literal_point() {
        let p = Point::stop("test");
        assert_eq!(p.kind(), PointKind::Stop);
        assert!(!p.has_source());
        assert_eq!(p.effective_value(), Some(Value::from("test")));
        assert_eq!(p.lookup(0), None);
    }

    #[test]
    fn test_indexed_point() {
        let p = Point::step(2).with_source(source());
        assert!(p.is_step());
        assert!(p.has_source());
        assert_eq!(p.value(), &Value::Int(2));
        assert_eq!(p.effective_value(), Some(Value::Int(34231)));
        assert_eq!(p.lookup(1), Some(Value::Int(1)));
        assert_eq!(p.lookup(3), None);
    }

    #[test]
    fn test_out_of_range_index_is_none() {
        let p = Point::stop(7).with_source(source());
        assert_eq!(p.effective_value(), None);

        let p = Point::stop("two").with_source(source());
        assert_eq!(p.effective_value(), None);
    }

    #[test]
    fn test_empty_source_is_ignored() {
        let p = Point::step(5).with_source(Vec::<Value>::new());
        assert!(p.source().is_some());
        assert!(!p.has_source());
        assert_eq!(p.effective_value(), Some(Value::Int(5)));
        assert_eq!(p.effective_int(), Some(5));
    }
}
