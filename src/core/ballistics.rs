use macroquad::math::{Vec2, vec2};

use crate::error::{Result, SimError};

pub const GRAVITY_MPS2: f32 = 9.81;

/// Landing closer than this to the target counts as a hit.
pub const HIT_RADIUS_M: f32 = 0.5;
pub const MAX_SCORE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchInputs {
    pub angle_deg: f32,
    pub speed_mps: f32,
}

pub fn velocity_components(inputs: LaunchInputs) -> Vec2 {
    let theta = inputs.angle_deg.to_radians();
    vec2(inputs.speed_mps * theta.cos(), inputs.speed_mps * theta.sin())
}

/// Closed-form position under constant gravity; never integrated.
pub fn position_at_time(start: Vec2, velocity: Vec2, time_s: f32) -> Vec2 {
    vec2(
        start.x + velocity.x * time_s,
        start.y + (velocity.y * time_s) - (0.5 * GRAVITY_MPS2 * time_s * time_s),
    )
}

/// Time until the shell returns to its launch height, and the horizontal
/// distance covered by then.
pub fn flight_time_and_range(inputs: LaunchInputs) -> Result<(f32, f32)> {
    if !inputs.angle_deg.is_finite() || !inputs.speed_mps.is_finite() {
        return Err(SimError::InvalidArgument(
            "inputs must be finite numbers".to_string(),
        ));
    }
    if inputs.speed_mps < 0.0 {
        return Err(SimError::InvalidArgument(
            "launch speed cannot be negative".to_string(),
        ));
    }

    let velocity = velocity_components(inputs);
    let t_land = (2.0 * velocity.y / GRAVITY_MPS2).max(0.0);
    Ok((t_land, velocity.x * t_land))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Score {
    pub hit: bool,
    pub points: f32,
}

/// Points are awarded on a miss too, as long as the shell lands within
/// `MAX_SCORE` metres of the target.
pub fn score(distance_from_target: f32) -> Score {
    Score {
        hit: distance_from_target < HIT_RADIUS_M,
        points: (MAX_SCORE - distance_from_target).max(0.0),
    }
}
