use crate::config::constants::*;

/// Converts a planar distance in degrees to kilometres (flat-earth scaling).
pub fn degrees_to_km(degrees: f64) -> f64 {
    degrees * KM_PER_DEGREE
}

/// Shifts longitudes given on a 0–360 axis into [-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Treats NaN and negative inputs as zero so every curve stays total.
pub fn sanitize_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        0.0
    } else {
        speed.max(0.0)
    }
}

/// Steps of `resolution` from `min` up to (excluding) `max`.
///
/// `None` when the count would exceed `MAX_GRID_POINTS`; an empty or
/// inverted span gives zero steps.
pub fn calc_grid_steps(min: f64, max: f64, resolution: f64) -> Option<usize> {
    let span = max - min;
    if !(span > 0.0) || !(resolution > 0.0) {
        return Some(0);
    }
    let steps = ((span / resolution) - GRID_STEP_EPSILON).ceil().max(0.0);
    if !steps.is_finite() || steps > MAX_GRID_POINTS as f64 {
        return None;
    }
    Some(steps as usize)
}

/// Candidate count for a lat/lon grid, `None` past `MAX_GRID_POINTS`.
pub fn calc_grid_point_count(lat_steps: usize, lon_steps: usize) -> Option<usize> {
    lat_steps
        .checked_mul(lon_steps)
        .filter(|count| *count <= MAX_GRID_POINTS)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

pub fn calc_empirical_capacity_factor(wind_speed: f64) -> f64 {
    EMPIRICAL_CF_COEFFICIENT * sanitize_speed(wind_speed).powf(EMPIRICAL_CF_EXPONENT)
}

pub fn calc_grid_connection_cost(substation_distance_km: f64) -> f64 {
    GRID_CONNECTION_BASE_COST + GRID_CONNECTION_COST_PER_KM * substation_distance_km.max(0.0)
}

/// Distance-decay curve for grid connectivity.
///
/// Flat at 1.0 up to the first threshold, linear to 0.7 at the second,
/// linear to 0.3 at the third, then exponential decay.
pub fn calc_grid_curve(distance_km: f64, thresholds: [f64; 3]) -> f64 {
    let [near, mid, far] = thresholds;
    let d = if distance_km.is_nan() { f64::INFINITY } else { distance_km.max(0.0) };

    let score = if d <= near {
        GRID_SCORE_NEAR
    } else if d <= mid {
        lerp(GRID_SCORE_NEAR, GRID_SCORE_MID, (d - near) / (mid - near))
    } else if d <= far {
        lerp(GRID_SCORE_MID, GRID_SCORE_FAR, (d - mid) / (far - mid))
    } else {
        GRID_SCORE_FAR * (-(d - far) / GRID_SCORE_DECAY_KM).exp()
    };

    score.clamp(0.0, 1.0)
}

/// Spacing curve against existing installations: too close scores 0.1,
/// rising linearly through 0.6 and 0.9 to 1.0 beyond the last threshold.
pub fn calc_spacing_curve(distance_km: f64, thresholds: [f64; 3]) -> f64 {
    let [too_close, close, moderate] = thresholds;
    let d = if distance_km.is_nan() { f64::INFINITY } else { distance_km.max(0.0) };

    let score = if d < too_close {
        SPACING_SCORE_TOO_CLOSE
    } else if d < close {
        lerp(SPACING_SCORE_TOO_CLOSE, SPACING_SCORE_CLOSE, (d - too_close) / (close - too_close))
    } else if d < moderate {
        lerp(SPACING_SCORE_CLOSE, SPACING_SCORE_MODERATE, (d - close) / (moderate - close))
    } else {
        SPACING_SCORE_CLEAR
    };

    score.clamp(0.0, 1.0)
}
