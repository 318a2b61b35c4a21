use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.071_067_811_865_475; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Continuous linear mapping from a numeric domain to a pixel range.
///
/// A degenerate domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    #[serde(default)]
    round: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        Ok(Self {
            domain,
            range,
            round: false,
        })
    }

    /// Rounds mapped output to whole pixels.
    #[must_use]
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn is_round(self) -> bool {
        self.round
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let t = normalize(self.domain, value);
        let out = self.range.0 + t * (self.range.1 - self.range.0);
        if self.round { out.round() } else { out }
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let t = normalize(self.range, pixel);
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }

    /// Extends the domain outward to round tick boundaries.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        self.domain = nice_domain(self.domain, count);
        self
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

fn normalize((a, b): (f64, f64), value: f64) -> f64 {
    let span = b - a;
    if span == 0.0 { 0.5 } else { (value - a) / span }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10_f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        inc = 10_f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Signed tick increment: positive steps are multiples of a power of ten,
/// negative values encode the reciprocal of a sub-unit step.
pub(crate) fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Evenly spaced round values inside `[start, stop]`.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let at = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            let offset = i as f64;
            if reverse { at(i2 - offset) } else { at(i1 + offset) }
        })
        .collect()
}

pub(crate) fn nice_domain(domain: (f64, f64), count: usize) -> (f64, f64) {
    let (mut start, mut stop) = domain;
    let reversed = stop < start;
    if reversed {
        std::mem::swap(&mut start, &mut stop);
    }
    if start == stop || !start.is_finite() || !stop.is_finite() || count == 0 {
        return domain;
    }

    let mut prestep = None;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if prestep == Some(step) {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        prestep = Some(step);
    }

    if reversed { (stop, start) } else { (start, stop) }
}
