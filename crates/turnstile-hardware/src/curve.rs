//! Share of a day's riders that enter during each hour.

use thiserror::Error;

/// Error type for hourly curves.
#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("Hourly weight for hour {hour} must be finite and non-negative, got {weight}")]
    InvalidWeight { hour: usize, weight: f64 },

    #[error("Hourly weights must not all be zero")]
    Empty,

    #[error("Hourly weights must sum to a finite value")]
    NonFiniteTotal,
}

/// Commuter pattern with morning and evening peaks and little overnight traffic.
const COMMUTER_WEIGHTS: [f64; 24] = [
    0.3, 0.2, 0.1, 0.1, 0.4, 1.5, // 00-05
    4.0, 8.0, 9.0, 5.5, 4.0, 4.0, // 06-11
    4.5, 4.5, 4.5, 5.5, 7.5, 9.0, // 12-17
    6.5, 4.0, 3.0, 2.0, 1.5, 0.9, // 18-23
];

/// Normalized hourly ridership curve. Shares sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyCurve {
    shares: [f64; 24],
}

impl HourlyCurve {
    /// Build a curve from relative weights, one per hour of day.
    pub fn new(weights: [f64; 24]) -> Result<Self, CurveError> {
        for (hour, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CurveError::InvalidWeight { hour, weight });
            }
        }
        let total: f64 = weights.iter().sum();
        if !total.is_finite() {
            return Err(CurveError::NonFiniteTotal);
        }
        if total <= 0.0 {
            return Err(CurveError::Empty);
        }

        Ok(Self {
            shares: weights.map(|w| w / total),
        })
    }

    /// Share of daily riders entering during `hour` (0-23).
    pub fn share(&self, hour: u32) -> f64 {
        self.shares[hour as usize % 24]
    }
}

impl Default for HourlyCurve {
    fn default() -> Self {
        let total: f64 = COMMUTER_WEIGHTS.iter().sum();
        Self {
            shares: COMMUTER_WEIGHTS.map(|w| w / total),
        }
    }
}
