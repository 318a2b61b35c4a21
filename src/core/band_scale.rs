use indexmap::IndexSet;

use crate::core::types::Value;

/// Categorical scale dividing a range into equal, padded bands.
///
/// Padding values are fractions of the step: inner padding is clamped to
/// `[0, 1]`, outer padding to `>= 0`. `align` positions the bands inside
/// any leftover outer space.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<Value>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    round: bool,
    step: f64,
    bandwidth: f64,
    starts: Vec<f64>,
}

impl BandScale {
    /// Creates a band scale; duplicate domain values are dropped.
    #[must_use]
    pub fn new(domain: impl IntoIterator<Item = Value>, range: (f64, f64)) -> Self {
        let mut scale = Self {
            domain: domain.into_iter().collect(),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
            step: 0.0,
            bandwidth: 0.0,
            starts: Vec::new(),
        };
        scale.rescale();
        scale
    }

    /// Sets inner and outer padding together.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = clamp_inner(padding);
        self.padding_outer = clamp_outer(padding);
        self.rescale();
        self
    }

    #[must_use]
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = clamp_inner(padding);
        self.rescale();
        self
    }

    #[must_use]
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = clamp_outer(padding);
        self.rescale();
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = if align.is_finite() { align.clamp(0.0, 1.0) } else { 0.5 };
        self.rescale();
        self
    }

    /// Snaps step, band starts and bandwidth to whole pixels.
    #[must_use]
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self.rescale();
        self
    }

    #[must_use]
    pub fn domain(&self) -> &IndexSet<Value> {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn padding_inner(&self) -> f64 {
        self.padding_inner
    }

    #[must_use]
    pub fn padding_outer(&self) -> f64 {
        self.padding_outer
    }

    /// Start of the band for `value`, or `None` for values outside the domain.
    #[must_use]
    pub fn map(&self, value: &Value) -> Option<f64> {
        let index = self.domain.get_index_of(value)?;
        self.starts.get(index).copied()
    }

    /// Domain value whose band contains `pixel`.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> Option<&Value> {
        self.starts
            .iter()
            .position(|&start| pixel >= start && pixel <= start + self.bandwidth)
            .and_then(|index| self.domain.get_index(index))
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let reverse = r1 < r0;
        let (mut start, stop) = if reverse { (r1, r0) } else { (r0, r1) };

        let mut step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        if self.round {
            step = step.floor();
        }
        start += (stop - start - step * (n - self.padding_inner)) * self.align;
        let mut bandwidth = step * (1.0 - self.padding_inner);
        if self.round {
            start = start.round();
            bandwidth = bandwidth.round();
        }

        let mut starts: Vec<f64> = (0..self.domain.len())
            .map(|i| start + step * i as f64)
            .collect();
        if reverse {
            starts.reverse();
        }

        self.step = step;
        self.bandwidth = bandwidth;
        self.starts = starts;
    }
}

fn clamp_inner(padding: f64) -> f64 {
    if padding.is_finite() { padding.clamp(0.0, 1.0) } else { 0.0 }
}

fn clamp_outer(padding: f64) -> f64 {
    if padding.is_finite() { padding.max(0.0) } else { 0.0 }
}
