//! Volatility indicators: Bollinger Bands, ATR, Keltner and Donchian channels.

pub mod atr;
pub mod bollinger;
pub mod channels;

pub use atr::{true_range, Atr};
pub use bollinger::Bollinger;
pub use channels::{Donchian, Keltner};

use crate::series::Series;

/// Upper/middle/lower envelope shared by the band indicators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bands {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

impl Bands {
    pub(crate) fn undefined(len: usize) -> Self {
        Self {
            upper: crate::series::undefined(len),
            middle: crate::series::undefined(len),
            lower: crate::series::undefined(len),
        }
    }

    /// Latest close position inside the bands, 0 at the lower band and 1 at
    /// the upper band. `None` when the bands are undefined or have no width.
    pub fn position(&self, price: f64) -> Option<f64> {
        let upper = crate::series::latest(&self.upper)?;
        let lower = crate::series::latest(&self.lower)?;
        let width = upper - lower;
        (width > 0.0).then(|| (price - lower) / width)
    }
}
