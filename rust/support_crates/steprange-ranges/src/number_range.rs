//! The half-open integer run between two steps.

use steprange_common::Value;

use crate::{
    range::{Range, RangeIter},
    source::Source,
};

/// A [`Range`] of exactly two steps, `start` and `end`.
///
/// The sequence runs from `start` towards `end`, excluding `end`, in whichever
/// direction `end` lies. `NumberRange::new(a, a)` is empty.
#[derive(Debug, Clone)]
pub struct NumberRange {
    start: i64,
    end: i64,
    range: Range,
}

impl NumberRange {
    pub fn new(start: i64, end: i64) -> NumberRange {
        let mut range = Range::new();
        range.append_step(start).append_step(end);
        NumberRange { start, end, range }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// `1` when ascending, `-1` when descending, `0` when empty.
    pub fn direction(&self) -> i64 {
        self.end.cmp(&self.start) as i64
    }

    /// Returns `(start, end)`, whatever the direction.
    pub fn bounds(&self) -> (i64, i64) {
        (self.start, self.end)
    }

    pub fn len(&self) -> usize {
        usize::try_from(self.start.abs_diff(self.end)).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the integer at `index`, or `None` past the end.
    pub fn at(&self, index: usize) -> Option<i64> {
        let index = u64::try_from(index).ok()?;
        if index >= self.start.abs_diff(self.end) {
            return None;
        }
        Some((self.start as i128 + self.direction() as i128 * index as i128) as i64)
    }

    pub fn contains(&self, n: i64) -> bool {
        match self.direction() {
            1 => self.start <= n && n < self.end,
            -1 => self.end < n && n <= self.start,
            _ => false,
        }
    }

    /// The sequence as plain integers.
    pub fn ints(&self) -> impl Iterator<Item = i64> + Clone + use<> {
        let (start, step) = (self.start, self.direction());
        (0..self.start.abs_diff(self.end))
            .map(move |k| (start as i128 + step as i128 * k as i128) as i64)
    }

    /// The sequence through the generic [`Range`] machinery.
    pub fn iter(&self) -> RangeIter<'_> {
        self.range.iter()
    }

    pub fn collect(&self) -> Vec<Option<Value>> {
        self.range.collect()
    }

    pub fn as_range(&self) -> &Range {
        &self.range
    }

    pub fn into_range(self) -> Range {
        self.range
    }
}

impl From<NumberRange> for Range {
    fn from(number_range: NumberRange) -> Range {
        number_range.into_range()
    }
}

impl<'a> IntoIterator for &'a NumberRange {
    type Item = Option<Value>;
    type IntoIter = RangeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Source for NumberRange {
    fn lookup(&self, index: i64) -> Option<Value> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.at(i))
            .map(Value::Int)
    }

    fn len(&self) -> usize {
        NumberRange::len(self)
    }
}
