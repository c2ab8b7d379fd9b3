//! Time-keyed values.
//!
//! A [`TimeSeries`] holds the breakpoints of a quantity that changes at
//! discrete ticks and stays constant in between. Unit parameters (key,
//! glide time, volume, ...) and the generated pitch-offset curves are both
//! stored this way.

use std::collections::btree_map::{self, BTreeMap};
use std::ops::RangeBounds;

use crate::error::{Error, Result};
use crate::Tick;

/// A step function over ticks, stored as ordered breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<T> {
    points: BTreeMap<Tick, T>,
}

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimeSeries<T> {
    /// Create an empty series. Queries fail until a breakpoint covers them.
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Create a series with `initial` in effect from tick 0.
    pub fn seeded(initial: T) -> Self {
        let mut points = BTreeMap::new();
        points.insert(0, initial);
        Self { points }
    }

    /// Set (or overwrite) the value starting at `tick`.
    pub fn insert(&mut self, tick: Tick, value: T) -> Option<T> {
        self.points.insert(tick, value)
    }

    /// Value stored exactly at `tick`, if there is a breakpoint there.
    pub fn get(&self, tick: Tick) -> Option<&T> {
        self.points.get(&tick)
    }

    /// Entry for the breakpoint at `tick`.
    pub fn entry(&mut self, tick: Tick) -> btree_map::Entry<'_, Tick, T> {
        self.points.entry(tick)
    }

    /// The breakpoint in effect at `tick`: the greatest key `<= tick`.
    pub fn breakpoint_at(&self, tick: Tick) -> Option<(Tick, &T)> {
        self.points
            .range(..=tick)
            .next_back()
            .map(|(&t, v)| (t, v))
    }

    /// The first breakpoint strictly after `tick`.
    pub fn first_after(&self, tick: Tick) -> Option<(Tick, &T)> {
        self.points
            .range(tick.saturating_add(1)..)
            .next()
            .filter(|(&t, _)| t > tick)
            .map(|(&t, v)| (t, v))
    }

    /// Breakpoints with keys inside `range`, in tick order.
    pub fn range<R>(&self, range: R) -> impl DoubleEndedIterator<Item = (Tick, &T)>
    where
        R: RangeBounds<Tick>,
    {
        self.points.range(range).map(|(&t, v)| (t, v))
    }

    /// Mutable access to the values of breakpoints inside `range`.
    pub fn range_mut<R>(&mut self, range: R) -> impl DoubleEndedIterator<Item = (Tick, &mut T)>
    where
        R: RangeBounds<Tick>,
    {
        self.points.range_mut(range).map(|(&t, v)| (t, v))
    }

    /// All breakpoints in tick order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Tick, &T)> + ExactSizeIterator {
        self.points.iter().map(|(&t, v)| (t, v))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<(Tick, &T)> {
        self.points.last_key_value().map(|(&t, v)| (t, v))
    }
}

impl<T: Clone> TimeSeries<T> {
    /// Value in effect at `tick`.
    ///
    /// Fails with [`Error::NoValueDefined`] if no breakpoint is at or before
    /// `tick`, which cannot happen on a seeded series.
    pub fn at(&self, tick: Tick) -> Result<T> {
        self.breakpoint_at(tick)
            .map(|(_, v)| v.clone())
            .ok_or(Error::NoValueDefined { tick })
    }

    /// Value in effect at `tick`, or `default` before the first breakpoint.
    pub fn at_or(&self, tick: Tick, default: T) -> T {
        self.breakpoint_at(tick)
            .map(|(_, v)| v.clone())
            .unwrap_or(default)
    }
}

impl<T> FromIterator<(Tick, T)> for TimeSeries<T> {
    fn from_iter<I: IntoIterator<Item = (Tick, T)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<(Tick, T)> for TimeSeries<T> {
    fn extend<I: IntoIterator<Item = (Tick, T)>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<T> IntoIterator for TimeSeries<T> {
    type Item = (Tick, T);
    type IntoIter = btree_map::IntoIter<Tick, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
