// Turbine resource model - power curve, capacity factor and wind profile
use serde::{Deserialize, Serialize};
use crate::config::constants::*;
use crate::config::const_funcs::{calc_empirical_capacity_factor, sanitize_speed};

/// Curtailment applied to turbine output before averaging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DispatchDown {
    /// Same fraction for every hour
    Uniform(f64),
    /// One fraction per hour, aligned with the wind series
    Hourly(Vec<f64>),
}

impl DispatchDown {
    fn fraction_at(&self, hour: usize) -> f64 {
        let fraction = match self {
            DispatchDown::Uniform(fraction) => *fraction,
            DispatchDown::Hourly(fractions) => fractions.get(hour).copied().unwrap_or(0.0),
        };
        if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) }
    }
}

/// Fixed-class turbine power curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurbineSpec {
    pub cut_in_speed: f64,
    pub rated_speed: f64,
    pub cut_out_speed: f64,
    pub rated_power: f64,
}

impl Default for TurbineSpec {
    fn default() -> Self {
        Self {
            cut_in_speed: TURBINE_CUT_IN_SPEED,
            rated_speed: TURBINE_RATED_SPEED,
            cut_out_speed: TURBINE_CUT_OUT_SPEED,
            rated_power: TURBINE_RATED_POWER,
        }
    }
}

impl TurbineSpec {
    /// Instantaneous output (W): cubic ramp from cut-in to rated, flat to
    /// cut-out, feathered above.
    pub fn power_output(&self, wind_speed: f64) -> f64 {
        let v = sanitize_speed(wind_speed);
        if v < self.cut_in_speed || v >= self.cut_out_speed {
            0.0
        } else if v < self.rated_speed {
            let ramp = (v - self.cut_in_speed) / (self.rated_speed - self.cut_in_speed);
            self.rated_power * ramp.powi(3)
        } else {
            self.rated_power
        }
    }

    pub fn is_valid(&self) -> bool {
        self.rated_power > 0.0 &&
        self.cut_in_speed >= 0.0 &&
        self.cut_in_speed < self.rated_speed &&
        self.rated_speed <= self.cut_out_speed
    }
}

/// Power-curve and wind-profile model shared across a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceModel {
    pub turbine: TurbineSpec,
    pub roughness_length: f64,
    pub reference_height: f64,
    pub dispatch_down: Option<DispatchDown>,
}

impl Default for ResourceModel {
    fn default() -> Self {
        Self {
            turbine: TurbineSpec::default(),
            roughness_length: DEFAULT_ROUGHNESS_LENGTH,
            reference_height: DEFAULT_REFERENCE_HEIGHT,
            dispatch_down: None,
        }
    }
}

impl ResourceModel {
    /// Mean derated output over the hourly series divided by rated power,
    /// clamped to [0, 0.55]. An empty series yields 0.
    pub fn capacity_factor_from_series(&self, series: &[f64]) -> f64 {
        if series.is_empty() {
            return 0.0;
        }

        let total: f64 = series
            .iter()
            .enumerate()
            .map(|(hour, &speed)| {
                let power = self.turbine.power_output(speed);
                match &self.dispatch_down {
                    Some(dd) => power * (1.0 - dd.fraction_at(hour)),
                    None => power,
                }
            })
            .sum();

        let mean_power = total / series.len() as f64;
        (mean_power / self.turbine.rated_power).clamp(0.0, MAX_CAPACITY_FACTOR)
    }

    /// Empirical fallback CF ≈ 0.005 · v^2.5 at a representative speed
    pub fn empirical_capacity_factor(&self, representative_speed: f64) -> f64 {
        calc_empirical_capacity_factor(representative_speed).clamp(0.0, MAX_CAPACITY_FACTOR)
    }

    /// Capacity factor from the hourly series when one is available,
    /// otherwise from the empirical estimator.
    pub fn estimate_capacity_factor(&self, series: Option<&[f64]>, representative_speed: f64) -> f64 {
        match series {
            Some(series) if !series.is_empty() => self.capacity_factor_from_series(series),
            _ => self.empirical_capacity_factor(representative_speed),
        }
    }

    /// Log-law extrapolation from the reference height to `hub_height`,
    /// rounded to 2 decimals. Non-positive reference speeds become 0.
    pub fn extrapolate_to_hub_height(&self, reference_speed: f64, hub_height: f64) -> f64 {
        let speed = sanitize_speed(reference_speed);
        let z0 = self.roughness_length;
        let extrapolated = speed * (hub_height / z0).ln() / (self.reference_height / z0).ln();
        (extrapolated * 100.0).round() / 100.0
    }
}
