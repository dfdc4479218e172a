//! The zip-longest container.

use steprange_common::{Result, Value, error::Error};
use steprange_ranges::{DerivationLimits, NumberRange};

use crate::zip_source::{Concrete, ZipSource};

/// One zipped row: a cell per source, `None` where the source has run out.
pub type Row = Vec<Option<Value>>;

/// Collects sources and zips them row-major to the length of the longest one.
///
/// ```
/// use steprange_zip::Container;
/// use steprange_common::Value;
///
/// let mut container = Container::new();
/// container.add_number_range(0, 3).add_source("tag");
/// let rows = container.zip().value().unwrap();
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[0], vec![Some(Value::Int(0)), Some(Value::from("tag"))]);
/// assert_eq!(rows[2], vec![Some(Value::Int(2)), None]);
/// ```
#[derive(Debug, Default)]
pub struct Container {
    sources: Vec<ZipSource>,
    value: Option<Vec<Row>>,
    limits: DerivationLimits,
}

impl Container {
    pub fn new() -> Container {
        Container::default()
    }

    /// Sets the limits enforced by [`Container::try_zip`].
    pub fn with_limits(mut self, limits: DerivationLimits) -> Container {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &DerivationLimits {
        &self.limits
    }

    /// Adds a single source.
    ///
    /// Ranges and points are kept as-is; any other value is wrapped in a stop
    /// pointing at it.
    pub fn add_source(&mut self, item: impl Into<ZipSource>) -> &mut Self {
        self.sources.push(item.into());
        self
    }

    pub fn add_sources<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<ZipSource>,
    {
        self.sources.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn add_number_range(&mut self, start: i64, end: i64) -> &mut Self {
        self.add_source(NumberRange::new(start, end))
    }

    /// Adds a pull-protocol source, drained when the container is zipped.
    pub fn add_iter<I>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<Value>>,
        I::IntoIter: Send + 'static,
    {
        self.add_source(ZipSource::from_iter_source(iter))
    }

    pub fn sources(&self) -> &[ZipSource] {
        &self.sources
    }

    /// Number of sources, i.e. the width of every zipped row.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Normalizes every source in place and zips them into [`Container::value`].
    ///
    /// Zipping again recomputes the same rows from the normalized sources.
    pub fn zip(&mut self) -> &mut Self {
        self.sources.iter_mut().for_each(ZipSource::normalize);
        self.zip_normalized();
        self
    }

    /// Like [`Container::zip`], but fails instead of materializing a source that
    /// exceeds the container's limits.
    ///
    /// Sources normalized before the failing one stay normalized; `value` is
    /// left untouched.
    pub fn try_zip(&mut self) -> Result<&mut Self> {
        self.limits.validate()?;
        let limits = self.limits;
        for source in &mut self.sources {
            source.normalize_checked(&limits)?;
        }
        self.zip_normalized();
        Ok(self)
    }

    /// The rows computed by the last zip, or `None` before the first one.
    pub fn value(&self) -> Option<&[Row]> {
        self.value.as_deref()
    }

    pub fn into_value(self) -> Option<Vec<Row>> {
        self.value
    }

    /// Renders the last zip as a JSON array of rows, `null` before the first zip.
    ///
    /// Intended for diagnostics and tests.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(&self.value)
            .map_err(|e| Error::invalid_arg("value", e.to_string()))
    }

    fn zip_normalized(&mut self) {
        let columns: Vec<&Concrete> = self
            .sources
            .iter()
            .filter_map(ZipSource::as_concrete)
            .collect();
        debug_assert_eq!(columns.len(), self.sources.len());

        let row_count = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        log::debug!("zipping {} sources into {} rows", columns.len(), row_count);

        // Sources that may still produce a cell.
        let mut unfinished = vec![true; columns.len()];
        let mut rows = Vec::with_capacity(row_count);
        for row_idx in 0..row_count {
            let mut row = Row::with_capacity(columns.len());
            for (col, column) in columns.iter().enumerate() {
                if !unfinished[col] {
                    row.push(None);
                    continue;
                }
                match column {
                    Concrete::List(items) => {
                        row.push(items.get(row_idx).cloned().flatten());
                        if row_idx + 1 >= items.len() {
                            unfinished[col] = false;
                        }
                    }
                    Concrete::Scalar(value) => {
                        row.push(if row_idx == 0 { value.clone() } else { None });
                        unfinished[col] = false;
                    }
                }
            }
            rows.push(row);
        }
        self.value = Some(rows);
    }
}
