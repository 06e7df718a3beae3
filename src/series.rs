//! Time series storage and change notifications.
//!
//! A [`TimeSeries`] is an ordered, append-only list of [`TimeValue`]
//! records. Every mutation is announced to subscribers as a
//! [`SeriesChange`]: single appends as [`SeriesChange::Appended`], anything
//! else (clear, replace, bulk removal) as [`SeriesChange::Reset`] carrying the
//! full new contents.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::SeriesError;

/// Instant attached to each sample.
pub type Timestamp = DateTime<Utc>;

/// Stable identifier of a [`TimeValue`] within its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeValueId(u64);

impl TimeValueId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimeValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single immutable sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeValue {
    id: TimeValueId,
    timestamp: Timestamp,
    value: f64,
}

impl TimeValue {
    /// Create a record with an explicit identifier.
    ///
    /// Records created by [`TimeSeries::append`] get their identifier from
    /// the series; this constructor exists for [`TimeSeries::replace`].
    pub fn new(id: TimeValueId, timestamp: Timestamp, value: f64) -> Self {
        Self {
            id,
            timestamp,
            value,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> TimeValueId {
        self.id
    }

    /// Capture instant.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Sample value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A structural change to a [`TimeSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesChange<'a> {
    /// One record was appended at the end.
    Appended(TimeValue),
    /// The contents were replaced; the slice holds every current record.
    Reset(&'a [TimeValue]),
}

/// Handle returned by [`TimeSeries::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangeListener = Box<dyn FnMut(&SeriesChange<'_>)>;

/// Ordered, append-only sequence of samples with change notifications.
pub struct TimeSeries {
    values: Vec<TimeValue>,
    next_id: u64,
    listeners: Vec<(SubscriptionId, ChangeListener)>,
    next_subscription: u64,
}

impl TimeSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            next_id: 1,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Build a series from raw values, all stamped with the current time.
    pub fn from_values<I>(values: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut series = Self::new();
        series.extend_values(values)?;
        Ok(series)
    }

    /// Append a value and return the identifier of the new record.
    ///
    /// A missing timestamp defaults to the current time.
    pub fn append(
        &mut self,
        value: f64,
        timestamp: Option<Timestamp>,
    ) -> Result<TimeValueId, SeriesError> {
        if !value.is_finite() {
            return Err(SeriesError::NonFiniteValue(value));
        }
        let record = TimeValue::new(
            self.allocate_id()?,
            timestamp.unwrap_or_else(Utc::now),
            value,
        );
        self.values.push(record);
        notify(&mut self.listeners, &SeriesChange::Appended(record));
        Ok(record.id)
    }

    /// Append several values, announcing each one individually.
    ///
    /// The batch is validated up front; a non-finite value rejects the whole
    /// batch and nothing is appended.
    pub fn extend_values<I>(&mut self, values: I) -> Result<usize, SeriesError>
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if let Some(bad) = values.iter().copied().find(|value| !value.is_finite()) {
            return Err(SeriesError::NonFiniteValue(bad));
        }
        let count = u64::try_from(values.len()).map_err(|_| SeriesError::IdsExhausted)?;
        if self.next_id.checked_add(count).is_none() {
            return Err(SeriesError::IdsExhausted);
        }
        self.values.reserve(values.len());
        let now = Utc::now();
        for value in &values {
            let record = TimeValue::new(self.allocate_id()?, now, *value);
            self.values.push(record);
            notify(&mut self.listeners, &SeriesChange::Appended(record));
        }
        Ok(values.len())
    }

    /// Replace the full contents of the series.
    ///
    /// Identifiers must be unique within the batch. Later appends continue
    /// numbering above the largest identifier seen.
    pub fn replace<I>(&mut self, records: I) -> Result<(), SeriesError>
    where
        I: IntoIterator<Item = TimeValue>,
    {
        let records: Vec<TimeValue> = records.into_iter().collect();
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !record.value.is_finite() {
                return Err(SeriesError::NonFiniteValue(record.value));
            }
            if !seen.insert(record.id) {
                return Err(SeriesError::DuplicateId(record.id));
            }
        }
        if let Some(max) = records.iter().map(|record| record.id.0).max() {
            let after = max.checked_add(1).ok_or(SeriesError::IdsExhausted)?;
            self.next_id = self.next_id.max(after);
        }
        self.values = records;
        notify(&mut self.listeners, &SeriesChange::Reset(&self.values));
        Ok(())
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.values.clear();
        notify(&mut self.listeners, &SeriesChange::Reset(&self.values));
    }

    /// Keep only the records matching `keep`; returns how many were removed.
    ///
    /// Subscribers see a reset only when something was removed.
    pub fn retain(&mut self, keep: impl FnMut(&TimeValue) -> bool) -> usize {
        let before = self.values.len();
        self.values.retain(keep);
        let removed = before - self.values.len();
        if removed > 0 {
            notify(&mut self.listeners, &SeriesChange::Reset(&self.values));
        }
        removed
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&SeriesChange<'_>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a change listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of registered change listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// All records in insertion order.
    pub fn as_slice(&self) -> &[TimeValue] {
        &self.values
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimeValue> {
        self.values.iter()
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: TimeValueId) -> Option<&TimeValue> {
        self.values.iter().find(|record| record.id == id)
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TimeValue> {
        self.values.last()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series has no records.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `u64::MAX` is never handed out, so `next_id` cannot wrap.
    fn allocate_id(&mut self) -> Result<TimeValueId, SeriesError> {
        let next = self
            .next_id
            .checked_add(1)
            .ok_or(SeriesError::IdsExhausted)?;
        let id = TimeValueId(self.next_id);
        self.next_id = next;
        Ok(id)
    }
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSeries")
            .field("values", &self.values)
            .field("next_id", &self.next_id)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a TimeValue;
    type IntoIter = std::slice::Iter<'a, TimeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn notify(listeners: &mut [(SubscriptionId, ChangeListener)], change: &SeriesChange<'_>) {
    for (_, listener) in listeners.iter_mut() {
        listener(change);
    }
}
