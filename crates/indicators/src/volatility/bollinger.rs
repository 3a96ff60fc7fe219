use super::Bands;
use crate::moving_average::sma;
use crate::series::rolling;

/// Bollinger Bands: SMA middle band ± `std_dev` population standard deviations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bollinger {
    pub period: usize,
    pub std_dev: f64,
}

impl Default for Bollinger {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl Bollinger {
    pub fn new(period: usize, std_dev: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(std_dev > 0.0, "Bollinger std_dev multiplier must be positive");
        Self { period, std_dev }
    }

    pub fn compute(&self, closes: &[f64]) -> Bands {
        if closes.len() < self.period {
            return Bands::undefined(closes.len());
        }
        let middle = sma(closes, self.period);
        let std = rolling(closes, self.period, population_std);
        let upper = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| m + self.std_dev * s)
            .collect();
        let lower = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| m - self.std_dev * s)
            .collect();
        Bands {
            upper,
            middle,
            lower,
        }
    }
}

fn population_std(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
