//! Geometric optics at a flat horizontal interface (`y = 0`).
//!
//! Angles are measured from the interface normal, in degrees. Rays travel
//! downward from medium 1 (above the interface) into medium 2.

use macroquad::math::{Vec2, vec2};

use crate::error::{Result, SimError};

/// Fraction of intensity carried by a refracted ray.
pub const REFRACTED_INTENSITY_FACTOR: f32 = 0.8;

/// Reported for whichever of refraction/reflection angle did not occur.
pub const ANGLE_NOT_APPLICABLE: f32 = -1.0;

/// Critical angle reported when `n1 <= n2`, where none exists.
pub const NO_CRITICAL_ANGLE_DEG: f32 = 90.0;

const PARALLEL_EPSILON: f32 = 1e-6;

const INTERFACE_NORMAL: Vec2 = Vec2::new(0.0, 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRay {
    pub origin: Vec2,
    pub direction: Vec2,
    pub intensity: f32,
}

impl LightRay {
    /// A full-intensity ray leaving `origin` at `incident_angle_deg` from the
    /// downward normal, leaning toward +x.
    pub fn incident(origin: Vec2, incident_angle_deg: f32) -> Self {
        let theta = incident_angle_deg.to_radians();
        Self {
            origin,
            direction: vec2(theta.sin(), -theta.cos()),
            intensity: 1.0,
        }
    }

    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    Refracted { angle_deg: f32 },
    TotalInternalReflection { reflection_angle_deg: f32 },
}

impl Interaction {
    pub fn refraction_angle_deg(&self) -> f32 {
        match self {
            Interaction::Refracted { angle_deg } => *angle_deg,
            Interaction::TotalInternalReflection { .. } => ANGLE_NOT_APPLICABLE,
        }
    }

    pub fn reflection_angle_deg(&self) -> f32 {
        match self {
            Interaction::Refracted { .. } => ANGLE_NOT_APPLICABLE,
            Interaction::TotalInternalReflection {
                reflection_angle_deg,
            } => *reflection_angle_deg,
        }
    }
}

/// Snell's law for the given incidence angle and refractive indices.
pub fn snell(incident_angle_deg: f32, n1: f32, n2: f32) -> Interaction {
    let sin_theta2 = (n1 / n2) * incident_angle_deg.to_radians().sin();
    if sin_theta2.abs() > 1.0 {
        Interaction::TotalInternalReflection {
            reflection_angle_deg: 180.0 - incident_angle_deg,
        }
    } else {
        Interaction::Refracted {
            angle_deg: sin_theta2.asin().to_degrees(),
        }
    }
}

pub fn critical_angle_deg(n1: f32, n2: f32) -> f32 {
    if n1 <= n2 {
        return NO_CRITICAL_ANGLE_DEG;
    }
    (n2 / n1).asin().to_degrees()
}

/// Where `ray` crosses the interface line, solving `origin.y + t * direction.y = 0`.
pub fn intersect_interface(ray: &LightRay) -> Result<Vec2> {
    if ray.direction.y.abs() < PARALLEL_EPSILON {
        return Err(SimError::RayParallelToInterface {
            direction: ray.direction,
        });
    }
    let t = -ray.origin.y / ray.direction.y;
    Ok(ray.point_at(t))
}

/// Mirror `direction` about the plane with unit `normal`.
pub fn reflect(direction: Vec2, normal: Vec2) -> Vec2 {
    direction - normal * (2.0 * direction.dot(normal))
}

/// The ray leaving the interface for `incident`, either transmitted into
/// medium 2 or reflected back into medium 1.
pub fn trace(
    incident: &LightRay,
    incident_angle_deg: f32,
    n1: f32,
    n2: f32,
) -> Result<(LightRay, Interaction)> {
    let hit = intersect_interface(incident)?;
    let interaction = snell(incident_angle_deg, n1, n2);
    let outgoing = match interaction {
        Interaction::TotalInternalReflection { .. } => LightRay {
            origin: hit,
            direction: reflect(incident.direction, INTERFACE_NORMAL),
            intensity: incident.intensity,
        },
        Interaction::Refracted { angle_deg } => {
            let theta2 = angle_deg.to_radians();
            LightRay {
                origin: hit,
                direction: vec2(theta2.sin(), -theta2.cos()),
                intensity: incident.intensity * REFRACTED_INTENSITY_FACTOR,
            }
        }
    };
    Ok((outgoing, interaction))
}
