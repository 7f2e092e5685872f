//! Validated geometric parameters for each cutter variant.
//!
//! Every struct here is an immutable value: private fields, a fallible
//! constructor that checks the variant's invariants, and read-only
//! accessors. Deserialization routes through the same constructors, so an
//! invalid parameter set can never produce a live value.

use serde::{Deserialize, Serialize};

use crate::error::{CutterError, Result};

pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CutterError::InvalidGeometry(format!(
            "{name} must be positive and finite, got {value}"
        )));
    }
    Ok(())
}

/// Parameters for a cylindrical (flat) end mill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCyl")]
pub struct CylParams {
    diameter: f64,
    length: f64,
}

impl CylParams {
    /// Validate and build flat end mill parameters.
    pub fn new(diameter: f64, length: f64) -> Result<Self> {
        check_positive("diameter", diameter)?;
        check_positive("length", length)?;
        Ok(Self { diameter, length })
    }

    /// Tool diameter in mm.
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Flute (cutting) length in mm.
    pub fn length(&self) -> f64 {
        self.length
    }
}

#[derive(Deserialize)]
struct RawCyl {
    diameter: f64,
    length: f64,
}

impl TryFrom<RawCyl> for CylParams {
    type Error = CutterError;

    fn try_from(raw: RawCyl) -> Result<Self> {
        Self::new(raw.diameter, raw.length)
    }
}

/// Parameters for a ball end mill (spherical tip).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBall")]
pub struct BallParams {
    diameter: f64,
    length: f64,
}

impl BallParams {
    /// Validate and build ball end mill parameters.
    pub fn new(diameter: f64, length: f64) -> Result<Self> {
        check_positive("diameter", diameter)?;
        check_positive("length", length)?;
        Ok(Self { diameter, length })
    }

    /// Tool diameter in mm.
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Flute (cutting) length in mm.
    pub fn length(&self) -> f64 {
        self.length
    }
}

#[derive(Deserialize)]
struct RawBall {
    diameter: f64,
    length: f64,
}

impl TryFrom<RawBall> for BallParams {
    type Error = CutterError;

    fn try_from(raw: RawBall) -> Result<Self> {
        Self::new(raw.diameter, raw.length)
    }
}

/// Parameters for a bull end mill (toroidal corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBull")]
pub struct BullParams {
    diameter: f64,
    corner_radius: f64,
    length: f64,
}

impl BullParams {
    /// Validate and build bull end mill parameters.
    ///
    /// The corner radius must not exceed the tool radius; at equality the
    /// silhouette degenerates to a ball end mill, which is accepted.
    pub fn new(diameter: f64, corner_radius: f64, length: f64) -> Result<Self> {
        check_positive("diameter", diameter)?;
        check_positive("corner radius", corner_radius)?;
        check_positive("length", length)?;
        if corner_radius > diameter / 2.0 {
            return Err(CutterError::InvalidGeometry(format!(
                "corner radius {corner_radius} exceeds tool radius {}",
                diameter / 2.0
            )));
        }
        Ok(Self {
            diameter,
            corner_radius,
            length,
        })
    }

    /// Tool diameter in mm.
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Corner (torus) radius in mm.
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Flute (cutting) length in mm.
    pub fn length(&self) -> f64 {
        self.length
    }
}

#[derive(Deserialize)]
struct RawBull {
    diameter: f64,
    corner_radius: f64,
    length: f64,
}

impl TryFrom<RawBull> for BullParams {
    type Error = CutterError;

    fn try_from(raw: RawBull) -> Result<Self> {
        Self::new(raw.diameter, raw.corner_radius, raw.length)
    }
}

/// Parameters for a tapered cutter (conical tip).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCone")]
pub struct ConeParams {
    diameter: f64,
    half_angle: f64,
    length: f64,
}

impl ConeParams {
    /// Validate and build cone cutter parameters.
    ///
    /// `half_angle` is the angle in degrees between the tool axis and the
    /// conical surface, strictly inside (0, 90).
    pub fn new(diameter: f64, half_angle: f64, length: f64) -> Result<Self> {
        check_positive("diameter", diameter)?;
        check_positive("length", length)?;
        if !half_angle.is_finite() || half_angle <= 0.0 || half_angle >= 90.0 {
            return Err(CutterError::InvalidGeometry(format!(
                "half-angle must be in (0, 90) degrees, got {half_angle}"
            )));
        }
        Ok(Self {
            diameter,
            half_angle,
            length,
        })
    }

    /// Tool diameter in mm.
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Half-angle between the tool axis and the conical surface, degrees.
    pub fn half_angle(&self) -> f64 {
        self.half_angle
    }

    /// Flute (cutting) length in mm.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub(crate) fn tan_half_angle(&self) -> f64 {
        self.half_angle.to_radians().tan()
    }
}

#[derive(Deserialize)]
struct RawCone {
    diameter: f64,
    half_angle: f64,
    length: f64,
}

impl TryFrom<RawCone> for ConeParams {
    type Error = CutterError;

    fn try_from(raw: RawCone) -> Result<Self> {
        Self::new(raw.diameter, raw.half_angle, raw.length)
    }
}
