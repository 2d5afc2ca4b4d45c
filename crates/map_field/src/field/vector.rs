//! The two-component vector value stored in a field.
use std::ops::{Add, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable (u, v) pair: eastward and northward components of a flow.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    /// Eastward component.
    pub u: f64,
    /// Northward component.
    pub v: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { u: 0.0, v: 0.0 };

    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Euclidean length of the vector.
    pub fn magnitude(&self) -> f64 {
        self.u.hypot(self.v)
    }

    /// Bearing the flow points towards, in degrees in [0, 360).
    ///
    /// 0 is north, 90 east: the meteorological convention for currents.
    pub fn direction_to(&self) -> f64 {
        self.u.atan2(self.v).to_degrees().rem_euclid(360.0)
    }

    /// Bearing the flow comes from: [`Vector::direction_to`] rotated 180
    /// degrees, normalized to [0, 360).
    pub fn direction_from(&self) -> f64 {
        (self.direction_to() + 180.0).rem_euclid(360.0)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.u + rhs.u, self.v + rhs.v)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.u * rhs, self.v * rhs)
    }
}
