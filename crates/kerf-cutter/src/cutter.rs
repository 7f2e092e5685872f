//! The closed set of cutter shapes and their shared silhouette contract.
//!
//! A [`Cutter`] describes a milling tool as a solid of revolution. The
//! geometry engine consumes it through the silhouette radius as a function
//! of height above the tip, the inverse height query, and a flat engine
//! handle carrying the same parameters. All queries are pure and reentrant,
//! so a parallel drop-cutter scan can share one cutter across worker
//! threads without locking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compound::{CompoundCutter, CutterSegment};
use crate::engine::{EngineCutterHandle, GeometryEngine};
use crate::error::{CutterError, Result};
use crate::params::{check_positive, BallParams, BullParams, ConeParams, CylParams};

/// A milling cutter shape.
///
/// Construction goes through the fallible factory functions
/// ([`Cutter::cylindrical`], [`Cutter::ball`], ...); parameters are
/// validated there and immutable afterwards, so a live cutter always
/// satisfies its geometric invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Cutter {
    /// Flat end mill.
    Cylindrical(CylParams),
    /// Ball end mill (spherical tip).
    Ball(BallParams),
    /// Bull end mill (toroidal corner).
    Bull(BullParams),
    /// Tapered cutter (conical tip).
    Cone(ConeParams),
    /// Stacked composition of the other shapes over height bands.
    Compound(CompoundCutter),
}

impl Cutter {
    /// Flat end mill with the given diameter and flute length.
    pub fn cylindrical(diameter: f64, length: f64) -> Result<Self> {
        Ok(Cutter::Cylindrical(CylParams::new(diameter, length)?))
    }

    /// Ball end mill with the given diameter and flute length.
    pub fn ball(diameter: f64, length: f64) -> Result<Self> {
        Ok(Cutter::Ball(BallParams::new(diameter, length)?))
    }

    /// Bull end mill with the given diameter, corner radius and flute
    /// length.
    pub fn bull(diameter: f64, corner_radius: f64, length: f64) -> Result<Self> {
        Ok(Cutter::Bull(BullParams::new(diameter, corner_radius, length)?))
    }

    /// Tapered cutter with the given diameter, half-angle (degrees between
    /// axis and surface) and flute length.
    pub fn cone(diameter: f64, half_angle: f64, length: f64) -> Result<Self> {
        Ok(Cutter::Cone(ConeParams::new(diameter, half_angle, length)?))
    }

    /// Compound cutter from ordered height-band segments.
    pub fn compound(segments: Vec<CutterSegment>) -> Result<Self> {
        Ok(Cutter::Compound(CompoundCutter::new(segments)?))
    }

    /// Flat tip of `shaft_diameter` blending into a conical flank that
    /// widens to `diameter`.
    ///
    /// The flank's virtual apex sits below the tip so the silhouette passes
    /// through the shaft radius at height zero.
    pub fn cyl_cone(
        shaft_diameter: f64,
        diameter: f64,
        half_angle: f64,
        length: f64,
    ) -> Result<Self> {
        check_positive("shaft diameter", shaft_diameter)?;
        if shaft_diameter >= diameter {
            return Err(CutterError::InvalidGeometry(format!(
                "shaft diameter {shaft_diameter} must be smaller than tool diameter {diameter}"
            )));
        }
        let flank = ConeParams::new(diameter, half_angle, length)?;
        let z_offset = -(shaft_diameter / 2.0) / flank.tan_half_angle();
        let segments = vec![CutterSegment::with_z_offset(
            Cutter::Cone(flank),
            z_offset,
            length,
        )];
        Ok(Cutter::Compound(CompoundCutter::new(segments)?))
    }

    /// Ball tip tangent to a conical flank that widens to `diameter`.
    ///
    /// The transition sits where the sphere's surface normal matches the
    /// flank direction, so the silhouette is smooth across the band
    /// boundary.
    pub fn ball_cone(
        ball_diameter: f64,
        diameter: f64,
        half_angle: f64,
        length: f64,
    ) -> Result<Self> {
        if ball_diameter >= diameter {
            return Err(CutterError::InvalidGeometry(format!(
                "ball diameter {ball_diameter} must be smaller than tool diameter {diameter}"
            )));
        }
        let tip = BallParams::new(ball_diameter, ball_diameter)?;
        let flank = ConeParams::new(diameter, half_angle, length)?;
        let rb = ball_diameter / 2.0;
        let sin_a = flank.half_angle().to_radians().sin();
        let tangent = rb * (1.0 - sin_a);
        let z_offset = rb - rb / sin_a;
        let segments = vec![
            CutterSegment::new(Cutter::Ball(tip), tangent),
            CutterSegment::with_z_offset(Cutter::Cone(flank), z_offset, length),
        ];
        Ok(Cutter::Compound(CompoundCutter::new(segments)?))
    }

    /// Nominal tool diameter. For a compound cutter this is the widest
    /// sub-cutter's diameter.
    pub fn diameter(&self) -> f64 {
        match self {
            Cutter::Cylindrical(p) => p.diameter(),
            Cutter::Ball(p) => p.diameter(),
            Cutter::Bull(p) => p.diameter(),
            Cutter::Cone(p) => p.diameter(),
            Cutter::Compound(c) => c.diameter(),
        }
    }

    /// Nominal tool radius.
    pub fn radius(&self) -> f64 {
        self.diameter() / 2.0
    }

    /// Flute (cutting) length: the upper bound of the defined silhouette.
    pub fn length(&self) -> f64 {
        match self {
            Cutter::Cylindrical(p) => p.length(),
            Cutter::Ball(p) => p.length(),
            Cutter::Bull(p) => p.length(),
            Cutter::Cone(p) => p.length(),
            Cutter::Compound(c) => c.length(),
        }
    }

    /// Silhouette radius at height `h` above the tool tip.
    ///
    /// Clamping policy, identical for every variant: heights below the tip
    /// return `0.0`, heights above
    /// [`effective_height`](Self::effective_height) return the nominal
    /// radius (the cylindrical shank), and the flute length is ignored.
    /// Use [`radius_at_height_checked`](Self::radius_at_height_checked) to
    /// treat the flute length as a hard limit instead.
    pub fn radius_at_height(&self, h: f64) -> f64 {
        if h < 0.0 {
            return 0.0;
        }
        match self {
            Cutter::Cylindrical(p) => p.diameter() / 2.0,
            Cutter::Ball(p) => {
                let r = p.diameter() / 2.0;
                if h < r {
                    (r * r - (r - h) * (r - h)).sqrt()
                } else {
                    r
                }
            }
            Cutter::Bull(p) => {
                let r = p.diameter() / 2.0;
                let rc = p.corner_radius();
                if h < rc {
                    // flat core plus the torus corner arc
                    (r - rc) + (rc * rc - (rc - h) * (rc - h)).sqrt()
                } else {
                    r
                }
            }
            Cutter::Cone(p) => (h * p.tan_half_angle()).min(p.diameter() / 2.0),
            Cutter::Compound(c) => c.radius_at_height(h),
        }
    }

    /// Silhouette radius at height `h`, treating the flute length as a hard
    /// domain limit.
    ///
    /// Returns [`CutterError::OutOfRange`] for `h < 0` or `h > length()`,
    /// so the engine's behavior at mesh boundaries is deterministic.
    pub fn radius_at_height_checked(&self, h: f64) -> Result<f64> {
        let limit = self.length();
        if h < 0.0 || h > limit {
            return Err(CutterError::OutOfRange { height: h, limit });
        }
        Ok(self.radius_at_height(h))
    }

    /// Height at which the silhouette first reaches the nominal radius.
    ///
    /// Above this height the tool is a plain cylinder. For a tapered cutter
    /// this can exceed the flute length; the defined silhouette is then
    /// conical over its whole domain.
    pub fn effective_height(&self) -> f64 {
        match self {
            Cutter::Cylindrical(_) => 0.0,
            Cutter::Ball(p) => p.diameter() / 2.0,
            Cutter::Bull(p) => p.corner_radius(),
            Cutter::Cone(p) => (p.diameter() / 2.0) / p.tan_half_angle(),
            Cutter::Compound(c) => c.effective_height(),
        }
    }

    /// Smallest height at which the silhouette reaches radius `r`: the
    /// inverse of [`radius_at_height`](Self::radius_at_height).
    ///
    /// Clamps to `0.0` for `r <= 0` and to the effective height for radii
    /// at or beyond the nominal radius.
    pub fn height_at_radius(&self, r: f64) -> f64 {
        if r <= 0.0 {
            return 0.0;
        }
        if r >= self.radius() {
            return self.effective_height();
        }
        match self {
            Cutter::Cylindrical(_) => 0.0,
            Cutter::Ball(p) => {
                let rr = p.diameter() / 2.0;
                rr - (rr * rr - r * r).sqrt()
            }
            Cutter::Bull(p) => {
                let rc = p.corner_radius();
                let flat = p.diameter() / 2.0 - rc;
                if r <= flat {
                    0.0
                } else {
                    let d = r - flat;
                    rc - (rc * rc - d * d).sqrt()
                }
            }
            Cutter::Cone(p) => r / p.tan_half_angle(),
            Cutter::Compound(c) => c.height_at_radius(r),
        }
    }

    /// The enlarged cutter that machines this cutter's surface offset
    /// outward by `distance`.
    ///
    /// Dropping the offset cutter against a model yields the tool position
    /// for a path offset by `distance`, which is how finishing allowances
    /// are left on semi-finished surfaces. The tip region gains a radius of
    /// `distance`: a flat end mill offsets to a bull, a ball stays a ball,
    /// and a cone gains a spherical tip tangent to the shifted flank.
    pub fn offset_cutter(&self, distance: f64) -> Result<Cutter> {
        check_positive("offset distance", distance)?;
        match self {
            Cutter::Cylindrical(p) => Cutter::bull(
                p.diameter() + 2.0 * distance,
                distance,
                p.length() + distance,
            ),
            Cutter::Ball(p) => Cutter::ball(p.diameter() + 2.0 * distance, p.length() + distance),
            Cutter::Bull(p) => Cutter::bull(
                p.diameter() + 2.0 * distance,
                p.corner_radius() + distance,
                p.length() + distance,
            ),
            Cutter::Cone(p) => Cutter::ball_cone(
                2.0 * distance,
                p.diameter() + 2.0 * distance,
                p.half_angle(),
                p.length() + distance,
            ),
            // TODO: offsetting a compound cutter needs per-band re-banding,
            // since every transition height shifts with the tip radius.
            Cutter::Compound(_) => Err(CutterError::InvalidGeometry(
                "offset of a compound cutter is not defined".into(),
            )),
        }
    }

    /// Translate this cutter into the geometry engine's representation.
    ///
    /// Pure translation: the handle carries the same validated parameters
    /// flattened into the engine's format. No computation happens here.
    pub fn to_engine_handle(&self) -> EngineCutterHandle {
        crate::engine::translate(self)
    }

    /// Drop this cutter at `(x, y)` against whatever surface `engine`
    /// holds.
    ///
    /// The engine owns the surface representation and the drop mathematics;
    /// this call translates the cutter and dispatches a single query.
    /// Returns the tip Z of first contact, or `None` when the cutter misses
    /// the surface entirely.
    pub fn drop_at<E: GeometryEngine + ?Sized>(&self, engine: &E, x: f64, y: f64) -> Option<f64> {
        engine.drop_cutter(&self.to_engine_handle(), x, y)
    }
}

impl fmt::Display for Cutter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cutter::Cylindrical(p) => {
                write!(f, "Cylindrical(d={}, l={})", p.diameter(), p.length())
            }
            Cutter::Ball(p) => write!(f, "Ball(d={}, l={})", p.diameter(), p.length()),
            Cutter::Bull(p) => write!(
                f,
                "Bull(d={}, rc={}, l={})",
                p.diameter(),
                p.corner_radius(),
                p.length()
            ),
            Cutter::Cone(p) => write!(
                f,
                "Cone(d={}, a={}, l={})",
                p.diameter(),
                p.half_angle(),
                p.length()
            ),
            Cutter::Compound(c) => write!(f, "Compound({} segments)", c.segments().len()),
        }
    }
}
