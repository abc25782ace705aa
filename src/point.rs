use crate::error::Error;
use ordered_float::NotNan;
use std::ops::Sub;

/// Reject NaN and infinite values.
pub(crate) fn finite(value: f32) -> Result<f32, Error> {
    let value = NotNan::new(value)
        .map_err(|e| Error::ConstructNotNan(e, value))?
        .into_inner();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite(value))
    }
}

/// A position in image pixel space. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Construct a point from finite coordinates. Values outside the frame are kept as is.
    pub fn new(x: f32, y: f32) -> Result<Self, Error> {
        Ok(Self {
            x: finite(x)?,
            y: finite(y)?,
        })
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.y
    }
}

/// Displacement between two points, widened to `f64` so differences of large coordinates
/// stay finite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: f64::from(self.x) - f64::from(rhs.x),
            y: f64::from(self.y) - f64::from(rhs.y),
        }
    }
}
