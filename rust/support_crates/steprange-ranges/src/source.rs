//! Integer-indexed lookup used by points for indirection.

use std::{fmt, sync::Arc};

use steprange_common::Value;

/// An ordered collection that can be looked up by integer index.
///
/// Lookups never fail: a negative or out-of-bounds index yields `None`.
pub trait Source: fmt::Debug + Send + Sync {
    /// Returns the element at `index`, or `None` if there is none.
    fn lookup(&self, index: i64) -> Option<Value>;

    /// Returns the number of addressable elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A source shared between the points that reference it.
pub type SharedSource = Arc<dyn Source>;

#[inline]
fn slice_lookup(items: &[Value], index: i64) -> Option<Value> {
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
}

impl Source for Vec<Value> {
    fn lookup(&self, index: i64) -> Option<Value> {
        slice_lookup(self, index)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// A list value is a source over its elements; any other value is an empty source.
impl Source for Value {
    fn lookup(&self, index: i64) -> Option<Value> {
        self.as_list().and_then(|items| slice_lookup(items, index))
    }

    fn len(&self) -> usize {
        self.as_list().map_or(0, <[Value]>::len)
    }
}

impl<S: Source + ?Sized> Source for Arc<S> {
    fn lookup(&self, index: i64) -> Option<Value> {
        self.as_ref().lookup(index)
    }

    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

#[cfg(test)]
mod tests {
    use super::Source;
    use steprange_common::Value;

    #[test]
    fn test_vec_lookup_bounds() {
        let src: Vec<Value> = vec![0.into(), 1.into(), 34231.into()];
        assert_eq!(src.lookup(2), Some(Value::Int(34231)));
        assert_eq!(src.lookup(3), None);
        assert_eq!(src.lookup(-1), None);
        assert_eq!(Source::len(&src), 3);
    }

    #[test]
    fn test_value_as_source() {
        let list = Value::from(vec!["a", "b"]);
        assert_eq!(list.lookup(1), Some(Value::from("b")));
        assert_eq!(Source::len(&list), 2);

        let scalar = Value::from(7);
        assert!(Source::is_empty(&scalar));
        assert_eq!(scalar.lookup(0), None);
    }
}
