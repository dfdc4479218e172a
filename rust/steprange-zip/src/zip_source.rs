//! Sources accepted by a [`Container`](crate::Container) and their normalization.

use std::fmt;

use steprange_common::{Result, Value, result::verify_limit};
use steprange_ranges::{DerivationLimits, NumberRange, Point, Range};

/// A boxed pull-protocol source.
pub type BoxedValueIter = Box<dyn Iterator<Item = Option<Value>> + Send>;

/// One column of a zip.
///
/// Sources start in their original shape and are replaced in place by their
/// [`Concrete`] form when the container is zipped.
pub enum ZipSource {
    Range(Range),
    Point(Point),
    Iter(BoxedValueIter),
    Concrete(Concrete),
}

/// A fully materialized source.
#[derive(Debug, Clone, PartialEq)]
pub enum Concrete {
    /// Yields one cell per row until its elements run out.
    List(Vec<Option<Value>>),
    /// Yields its value on the first row only.
    Scalar(Option<Value>),
}

impl Concrete {
    /// Number of rows this source covers; a scalar counts as one.
    pub fn len(&self) -> usize {
        match self {
            Concrete::List(items) => items.len(),
            Concrete::Scalar(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_value(value: Option<Value>) -> Concrete {
        match value {
            Some(Value::List(items)) => Concrete::List(items.into_iter().map(Some).collect()),
            other => Concrete::Scalar(other),
        }
    }
}

impl ZipSource {
    pub fn from_iter_source<I>(iter: I) -> ZipSource
    where
        I: IntoIterator<Item = Option<Value>>,
        I::IntoIter: Send + 'static,
    {
        ZipSource::Iter(Box::new(iter.into_iter()))
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, ZipSource::Concrete(_))
    }

    pub fn as_concrete(&self) -> Option<&Concrete> {
        match self {
            ZipSource::Concrete(concrete) => Some(concrete),
            _ => None,
        }
    }

    /// Replaces this source with its concrete form.
    ///
    /// Ranges and iterators are drained fully; a point becomes its effective
    /// value, list-like if that value is a [`Value::List`].
    pub fn normalize(&mut self) {
        let concrete = match self {
            ZipSource::Range(range) => Concrete::List(range.collect()),
            ZipSource::Point(point) => Concrete::from_value(point.effective_value()),
            ZipSource::Iter(iter) => Concrete::List(iter.collect()),
            ZipSource::Concrete(_) => return,
        };
        *self = ZipSource::Concrete(concrete);
    }

    /// Like [`ZipSource::normalize`], but rejects ranges and iterators that would
    /// exceed `limits`.
    ///
    /// A range is measured before it is materialized. An iterator is drained
    /// up to `limits.max_sequence_len + 1` items; if it yields more, it is left
    /// partially consumed and the source is not replaced.
    pub fn normalize_checked(&mut self, limits: &DerivationLimits) -> Result<()> {
        match self {
            ZipSource::Range(range) => {
                range.check_limits(limits)?;
                self.normalize();
            }
            ZipSource::Iter(iter) => {
                let cap = limits.max_sequence_len.saturating_add(1);
                let items: Vec<_> = iter
                    .take(usize::try_from(cap).unwrap_or(usize::MAX))
                    .collect();
                verify_limit("iterator source", limits.max_sequence_len, items.len() as u64)
                    .inspect_err(|e| log::warn!("rejecting zip source: {e}"))?;
                *self = ZipSource::Concrete(Concrete::List(items));
            }
            ZipSource::Point(_) | ZipSource::Concrete(_) => self.normalize(),
        }
        Ok(())
    }
}

impl fmt::Debug for ZipSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZipSource::Range(range) => f.debug_tuple("Range").field(range).finish(),
            ZipSource::Point(point) => f.debug_tuple("Point").field(point).finish(),
            ZipSource::Iter(_) => f.write_str("Iter(..)"),
            ZipSource::Concrete(concrete) => f.debug_tuple("Concrete").field(concrete).finish(),
        }
    }
}

impl From<Range> for ZipSource {
    fn from(range: Range) -> Self {
        ZipSource::Range(range)
    }
}

impl From<NumberRange> for ZipSource {
    fn from(range: NumberRange) -> Self {
        ZipSource::Range(range.into_range())
    }
}

impl From<Point> for ZipSource {
    fn from(point: Point) -> Self {
        ZipSource::Point(point)
    }
}

/// Any other value is wrapped in a stop pointing at it.
impl From<Value> for ZipSource {
    fn from(value: Value) -> Self {
        ZipSource::Point(Point::stop(value))
    }
}

impl From<i64> for ZipSource {
    fn from(v: i64) -> Self {
        Value::from(v).into()
    }
}

impl From<i32> for ZipSource {
    fn from(v: i32) -> Self {
        Value::from(v).into()
    }
}

impl From<f64> for ZipSource {
    fn from(v: f64) -> Self {
        Value::from(v).into()
    }
}

impl From<bool> for ZipSource {
    fn from(v: bool) -> Self {
        Value::from(v).into()
    }
}

impl From<&str> for ZipSource {
    fn from(v: &str) -> Self {
        Value::from(v).into()
    }
}

impl From<String> for ZipSource {
    fn from(v: String) -> Self {
        Value::from(v).into()
    }
}

impl<T: Into<Value>> From<Vec<T>> for ZipSource {
    fn from(items: Vec<T>) -> Self {
        Value::from(items).into()
    }
}

#[cfg(test)]
mod tests {
    use super::{Concrete, ZipSource};
    use steprange_common::Value;
    use steprange_ranges::{DerivationLimits, NumberRange, Point};

    #[test]
    fn test_normalize_shapes() {
        let mut range = ZipSource::from(NumberRange::new(0, 3));
        range.normalize();
        assert_eq!(
            range.as_concrete(),
            Some(&Concrete::List(vec![
                Some(Value::Int(0)),
                Some(Value::Int(1)),
                Some(Value::Int(2))
            ]))
        );

        let mut scalar = ZipSource::from("874342");
        scalar.normalize();
        assert_eq!(
            scalar.as_concrete(),
            Some(&Concrete::Scalar(Some(Value::from("874342"))))
        );
        assert_eq!(scalar.as_concrete().map(Concrete::len), Some(1));

        let mut list = ZipSource::from(vec!["a", "b"]);
        list.normalize();
        assert_eq!(list.as_concrete().map(Concrete::len), Some(2));

        let mut iter = ZipSource::from_iter_source((0..4).map(|i| Some(Value::Int(i))));
        assert!(!iter.is_concrete());
        iter.normalize();
        assert_eq!(iter.as_concrete().map(Concrete::len), Some(4));
    }

    #[test]
    fn test_indexed_point_normalizes_to_effective_value() {
        let mut hit = ZipSource::from(Point::stop(1).with_source(Value::from(vec![5, 6])));
        hit.normalize();
        assert_eq!(hit.as_concrete(), Some(&Concrete::Scalar(Some(Value::Int(6)))));

        let mut miss = ZipSource::from(Point::stop(9).with_source(Value::from(vec![5, 6])));
        miss.normalize();
        assert_eq!(miss.as_concrete(), Some(&Concrete::Scalar(None)));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut source = ZipSource::from(NumberRange::new(2, 0));
        source.normalize();
        let first = source.as_concrete().cloned();
        source.normalize();
        assert_eq!(source.as_concrete().cloned(), first);
    }

    #[test]
    fn test_checked_iterator_is_capped() {
        let limits = DerivationLimits {
            max_sequence_len: 10,
            ..Default::default()
        };
        let mut endless = ZipSource::from_iter_source((0..).map(|i| Some(Value::Int(i))));
        let err = endless.normalize_checked(&limits).unwrap_err();
        assert!(err.is_limit_exceeded());
        assert!(!endless.is_concrete());

        let mut short = ZipSource::from_iter_source((0..10).map(|i| Some(Value::Int(i))));
        short.normalize_checked(&limits).unwrap();
        assert_eq!(short.as_concrete().map(Concrete::len), Some(10));
    }

    #[test]
    fn test_checked_range_is_measured_first() {
        let limits = DerivationLimits {
            max_run_len: 5,
            ..Default::default()
        };
        let mut wide = ZipSource::from(NumberRange::new(0, 6));
        assert!(wide.normalize_checked(&limits).is_err());
        assert!(!wide.is_concrete());

        let mut narrow = ZipSource::from(NumberRange::new(0, 5));
        narrow.normalize_checked(&limits).unwrap();
        assert!(narrow.is_concrete());
    }
}
