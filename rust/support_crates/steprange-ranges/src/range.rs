//! Point chains and the derivation of their sequences.
//!
//! A [`Range`] is scanned pairwise: every point is evaluated together with its
//! successor in scan order.
//!
//! 1. If both are steps with distinct integer effective values, the pair
//!    derives the half-open run from the first towards the second, moving by
//!    `±1`. Each position is resolved through the first step's source if it
//!    has one, otherwise the position itself is emitted.
//! 2. If both are steps with equal effective values, nothing is emitted.
//! 3. Otherwise the current point emits its effective value, unless it is a
//!    step that just closed a step pair: the closing step is the exclusive
//!    end of that pair's run and is never emitted on its own.
//!
//! A step pair whose effective values are not both integers is not derivable
//! and falls under rule 3.
//!
//! So `Step(0), Step(2), Stop(9)` yields `0, 1, 9`: the closing step `2` is
//! dropped even though a stop follows it, and the stop emits under rule 3.

use std::iter::FusedIterator;

use steprange_common::{Result, Value, result::verify_limit};

use crate::{limits::DerivationLimits, point::Point, source::Source};

/// The order in which a chain is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scan {
    /// First point to last point.
    #[default]
    Forward,
    /// Last point to first point.
    Backward,
}

/// An ordered chain of [`Point`]s describing a lazily derived sequence.
///
/// Iteration never mutates the range: every call to [`Range::iter`] starts
/// from the beginning of the chain with its own cursor.
#[derive(Debug, Clone, Default)]
pub struct Range {
    points: Vec<Point>,
    scan: Scan,
}

impl Range {
    /// Creates an empty, forward-scanned range.
    pub fn new() -> Range {
        Range::default()
    }

    /// Creates an empty range scanned from its last point to its first.
    pub fn backward() -> Range {
        Range::new().with_scan(Scan::Backward)
    }

    pub fn from_points(points: Vec<Point>) -> Range {
        Range {
            points,
            scan: Scan::Forward,
        }
    }

    pub fn with_scan(mut self, scan: Scan) -> Range {
        self.scan = scan;
        self
    }

    pub fn scan(&self) -> Scan {
        self.scan
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn push(&mut self, point: Point) -> &mut Self {
        self.points.push(point);
        self
    }

    pub fn append_step(&mut self, value: impl Into<Value>) -> &mut Self {
        self.push(Point::step(value))
    }

    pub fn append_stop(&mut self, value: impl Into<Value>) -> &mut Self {
        self.push(Point::stop(value))
    }

    pub fn append_step_with_source(
        &mut self,
        value: impl Into<Value>,
        source: impl Source + 'static,
    ) -> &mut Self {
        self.push(Point::step(value).with_source(source))
    }

    pub fn append_stop_with_source(
        &mut self,
        value: impl Into<Value>,
        source: impl Source + 'static,
    ) -> &mut Self {
        self.push(Point::stop(value).with_source(source))
    }

    /// Returns a lazy iterator over the derived sequence.
    ///
    /// `None` items are positions that resolve to nothing, e.g. an index that
    /// falls outside a point's source.
    pub fn iter(&self) -> RangeIter<'_> {
        RangeIter {
            walker: Walker::new(&self.points, self.scan),
            run: None,
        }
    }

    /// Materializes the derived sequence.
    pub fn collect(&self) -> Vec<Option<Value>> {
        self.iter().collect()
    }

    /// Materializes the derived sequence after checking it against `limits`.
    ///
    /// Fails with `LimitExceeded` if any derived run is wider than
    /// `limits.max_run_len` or the whole sequence is longer than
    /// `limits.max_sequence_len`. Nothing is materialized in that case.
    pub fn try_collect(&self, limits: &DerivationLimits) -> Result<Vec<Option<Value>>> {
        limits.validate()?;
        self.check_limits(limits)?;
        Ok(self.collect())
    }

    /// Checks the derived sequence against `limits` without materializing it,
    /// returning its length.
    pub fn check_limits(&self, limits: &DerivationLimits) -> Result<u64> {
        let mut total = 0u64;
        for segment in self.segments() {
            match segment {
                Segment::Emit(_) => total = total.saturating_add(1),
                Segment::Run(run) => {
                    let width = run.remaining();
                    verify_limit("derived run", limits.max_run_len, width)
                        .inspect_err(|e| log::warn!("rejecting range: {e}"))?;
                    total = total.saturating_add(width);
                }
                Segment::Skip => {}
            }
        }
        verify_limit("sequence", limits.max_sequence_len, total)
            .inspect_err(|e| log::warn!("rejecting range: {e}"))?;
        Ok(total)
    }

    /// Returns the effective values of the first and the last point of the chain.
    ///
    /// Independent of the scan direction and of any iteration in progress.
    /// Returns `(None, None)` for an empty chain.
    pub fn bounds(&self) -> (Option<Value>, Option<Value>) {
        (
            self.points.first().and_then(Point::effective_value),
            self.points.last().and_then(Point::effective_value),
        )
    }

    /// Returns the number of items [`Range::iter`] yields.
    ///
    /// Runs are measured, not materialized.
    pub fn len(&self) -> usize {
        let total = self
            .segments()
            .map(|segment| match segment {
                Segment::Emit(_) => 1,
                Segment::Run(run) => run.remaining(),
                Segment::Skip => 0,
            })
            .fold(0u64, u64::saturating_add);
        usize::try_from(total).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.segments().all(|segment| matches!(segment, Segment::Skip))
    }

    /// Returns the item at `index` of the derived sequence.
    ///
    /// Literal runs are skipped arithmetically. Returns `None` both past the
    /// end and for a position that resolves to nothing; compare against
    /// [`Range::len`] to tell the two apart.
    pub fn at(&self, index: usize) -> Option<Value> {
        let mut remaining = index as u64;
        for segment in self.segments() {
            match segment {
                Segment::Emit(point) => {
                    if remaining == 0 {
                        return point.effective_value();
                    }
                    remaining -= 1;
                }
                Segment::Run(run) => {
                    let width = run.remaining();
                    if remaining < width {
                        return run.resolve(run.position(remaining));
                    }
                    remaining -= width;
                }
                Segment::Skip => {}
            }
        }
        None
    }

    /// Returns `true` if the derived sequence yields the integer `n`.
    pub fn contains(&self, n: i64) -> bool {
        let target = Value::Int(n);
        self.segments().any(|segment| match segment {
            Segment::Emit(point) => point.effective_value().as_ref() == Some(&target),
            Segment::Run(run) if run.is_literal() => run.covers(n),
            Segment::Run(mut run) => run.any(|v| v.as_ref() == Some(&target)),
            Segment::Skip => false,
        })
    }

    fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        let mut walker = Walker::new(&self.points, self.scan);
        std::iter::from_fn(move || walker.next_segment())
    }
}

impl FromIterator<Point> for Range {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Range::from_points(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Range {
    type Item = Option<Value>;
    type IntoIter = RangeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A range is a source over its derived sequence.
impl Source for Range {
    fn lookup(&self, index: i64) -> Option<Value> {
        usize::try_from(index).ok().and_then(|i| self.at(i))
    }

    fn len(&self) -> usize {
        Range::len(self)
    }
}

/// Lazy iterator over the sequence derived from a [`Range`].
#[derive(Debug, Clone)]
pub struct RangeIter<'a> {
    walker: Walker<'a>,
    run: Option<Run<'a>>,
}

impl Iterator for RangeIter<'_> {
    type Item = Option<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(run) = self.run.as_mut() {
                if let Some(item) = run.next() {
                    return Some(item);
                }
                self.run = None;
            }
            match self.walker.next_segment()? {
                Segment::Emit(point) => return Some(point.effective_value()),
                Segment::Run(run) => {
                    log::trace!(
                        "deriving run {}..{} (step {}, indexed: {})",
                        run.next,
                        run.end,
                        run.step,
                        !run.is_literal()
                    );
                    self.run = Some(run);
                }
                Segment::Skip => {}
            }
        }
    }

    /// The lower bound covers the run in progress; the upper bound is unknown
    /// until the remaining pairs are inspected.
    fn size_hint(&self) -> (usize, Option<usize>) {
        let in_run = self
            .run
            .as_ref()
            .map_or(0, |run| usize::try_from(run.remaining()).unwrap_or(usize::MAX));
        if self.walker.is_done() {
            (in_run, Some(in_run))
        } else {
            (in_run, None)
        }
    }
}

impl FusedIterator for RangeIter<'_> {}

/// What a single step of the pairwise scan contributes.
enum Segment<'a> {
    /// The point's effective value.
    Emit(&'a Point),
    /// A run derived from a step pair.
    Run(Run<'a>),
    /// Nothing: an equal step pair, or a step that closed a pair.
    Skip,
}

/// Pairwise cursor over a chain of points.
#[derive(Debug, Clone)]
struct Walker<'a> {
    points: &'a [Point],
    scan: Scan,
    cursor: Option<usize>,
    /// Set when the point under the cursor closed a step pair.
    closes_pair: bool,
}

impl<'a> Walker<'a> {
    fn new(points: &'a [Point], scan: Scan) -> Self {
        let cursor = match scan {
            Scan::Forward => (!points.is_empty()).then_some(0),
            Scan::Backward => points.len().checked_sub(1),
        };
        Walker {
            points,
            scan,
            cursor,
            closes_pair: false,
        }
    }

    fn is_done(&self) -> bool {
        self.cursor.is_none()
    }

    fn successor(&self, pos: usize) -> Option<usize> {
        match self.scan {
            Scan::Forward => (pos + 1 < self.points.len()).then_some(pos + 1),
            Scan::Backward => pos.checked_sub(1),
        }
    }

    fn next_segment(&mut self) -> Option<Segment<'a>> {
        let pos = self.cursor?;
        let points = self.points;
        let current = &points[pos];
        let next = self.successor(pos).map(|succ| &points[succ]);
        self.cursor = self.successor(pos);
        let closes_pair = std::mem::replace(&mut self.closes_pair, false);

        if let Some(next) = next.filter(|next| current.is_step() && next.is_step()) {
            if let (Some(from), Some(to)) = (current.effective_int(), next.effective_int()) {
                self.closes_pair = true;
                return Some(if from == to {
                    Segment::Skip
                } else {
                    Segment::Run(Run::new(current, from, to))
                });
            }
        }

        if closes_pair {
            Some(Segment::Skip)
        } else {
            Some(Segment::Emit(current))
        }
    }
}

/// The half-open run `from..to` derived from a step pair, walked by `±1`.
#[derive(Debug, Clone)]
struct Run<'a> {
    origin: &'a Point,
    next: i64,
    end: i64,
    step: i64,
}

impl<'a> Run<'a> {
    fn new(origin: &'a Point, from: i64, to: i64) -> Self {
        debug_assert_ne!(from, to);
        Run {
            origin,
            next: from,
            end: to,
            step: if to > from { 1 } else { -1 },
        }
    }

    fn remaining(&self) -> u64 {
        self.next.abs_diff(self.end)
    }

    /// Positions are emitted as-is unless the opening step has a source.
    fn is_literal(&self) -> bool {
        !self.origin.has_source()
    }

    /// The position `offset` steps ahead. `offset` must be below `remaining()`.
    fn position(&self, offset: u64) -> i64 {
        (self.next as i128 + self.step as i128 * offset as i128) as i64
    }

    fn covers(&self, n: i64) -> bool {
        if self.step > 0 {
            self.next <= n && n < self.end
        } else {
            self.end < n && n <= self.next
        }
    }

    fn resolve(&self, position: i64) -> Option<Value> {
        if self.is_literal() {
            Some(Value::Int(position))
        } else {
            self.origin.lookup(position)
        }
    }
}

impl Iterator for Run<'_> {
    type Item = Option<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.end {
            return None;
        }
        let position = self.next;
        self.next += self.step;
        Some(self.resolve(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
