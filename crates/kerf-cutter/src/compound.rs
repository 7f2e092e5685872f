//! Compound cutters: stacked shapes over height bands.
//!
//! A compound cutter composes the primitive shapes over consecutive height
//! bands, the way a tapered ball-nose tool combines a spherical tip with a
//! conical flank. Each segment carries a z-offset so its shape can be
//! evaluated in shifted coordinates, e.g. a cone flank whose virtual apex
//! sits below the compound tip.

use serde::{Deserialize, Serialize};

use crate::cutter::Cutter;
use crate::error::{CutterError, Result};

/// One height band of a compound cutter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutterSegment {
    /// The shape evaluated over this band.
    pub cutter: Cutter,
    /// Shift applied to height queries before delegating: the band's shape
    /// sees `h - z_offset`.
    pub z_offset: f64,
    /// Upper height bound of the band. The band spans from the previous
    /// segment's top (or the tip) up to this value.
    pub top: f64,
}

impl CutterSegment {
    /// Band whose shape is evaluated in tip coordinates.
    pub fn new(cutter: Cutter, top: f64) -> Self {
        Self {
            cutter,
            z_offset: 0.0,
            top,
        }
    }

    /// Band with a shifted shape.
    pub fn with_z_offset(cutter: Cutter, z_offset: f64, top: f64) -> Self {
        Self {
            cutter,
            z_offset,
            top,
        }
    }
}

/// A cutter composed of other cutters over consecutive height bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCompound")]
pub struct CompoundCutter {
    segments: Vec<CutterSegment>,
}

impl CompoundCutter {
    /// Validate and build a compound cutter from ordered segments.
    ///
    /// At least one segment is required; band tops must be finite, positive
    /// and strictly increasing; z-offsets must be finite.
    pub fn new(segments: Vec<CutterSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(CutterError::InvalidGeometry(
                "compound cutter needs at least one segment".into(),
            ));
        }
        let mut prev = 0.0;
        for seg in &segments {
            if !seg.top.is_finite() || seg.top <= prev {
                return Err(CutterError::InvalidGeometry(format!(
                    "segment tops must be finite and strictly increasing, got {} after {prev}",
                    seg.top
                )));
            }
            if !seg.z_offset.is_finite() {
                return Err(CutterError::InvalidGeometry(format!(
                    "segment z-offset must be finite, got {}",
                    seg.z_offset
                )));
            }
            prev = seg.top;
        }
        Ok(Self { segments })
    }

    /// The ordered height bands, bottom first.
    pub fn segments(&self) -> &[CutterSegment] {
        &self.segments
    }

    /// Nominal diameter: the widest sub-cutter's diameter.
    pub fn diameter(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.cutter.diameter())
            .fold(0.0, f64::max)
    }

    /// Overall defined height: the top of the last band.
    pub fn length(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.top)
    }

    /// Silhouette radius at height `h`, delegating to the band containing
    /// `h`. Follows the shared clamping policy: `0.0` below the tip, the
    /// nominal radius above the last band.
    pub fn radius_at_height(&self, h: f64) -> f64 {
        if h < 0.0 {
            return 0.0;
        }
        for seg in &self.segments {
            if h <= seg.top {
                return seg.cutter.radius_at_height(h - seg.z_offset);
            }
        }
        // above the last band: the shank
        self.diameter() / 2.0
    }

    /// Height at which the compound silhouette first reaches the nominal
    /// radius.
    pub fn effective_height(&self) -> f64 {
        let nominal = self.diameter() / 2.0;
        let mut lo = 0.0;
        for seg in &self.segments {
            if seg.cutter.radius() >= nominal {
                let h = seg.z_offset + seg.cutter.effective_height();
                return h.clamp(lo, seg.top);
            }
            lo = seg.top;
        }
        self.length()
    }

    /// Smallest height at which the silhouette reaches radius `r`.
    ///
    /// A band is skipped when its shape only attains `r` above the band's
    /// top; the next band then owns that radius.
    pub fn height_at_radius(&self, r: f64) -> f64 {
        if r <= 0.0 {
            return 0.0;
        }
        let mut lo = 0.0;
        for seg in &self.segments {
            if seg.cutter.radius() >= r {
                let h = (seg.z_offset + seg.cutter.height_at_radius(r)).max(lo);
                if h <= seg.top {
                    return h;
                }
            }
            lo = seg.top;
        }
        self.effective_height()
    }
}

#[derive(Deserialize)]
struct RawCompound {
    segments: Vec<CutterSegment>,
}

impl TryFrom<RawCompound> for CompoundCutter {
    type Error = CutterError;

    fn try_from(raw: RawCompound) -> Result<Self> {
        Self::new(raw.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ball_then_shank() -> CompoundCutter {
        // spherical tip up to its equator, plain cylinder above
        let tip = Cutter::ball(6.0, 6.0).unwrap();
        let shank = Cutter::cylindrical(6.0, 20.0).unwrap();
        CompoundCutter::new(vec![
            CutterSegment::new(tip, 3.0),
            CutterSegment::new(shank, 20.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_validation_rejects_empty() {
        assert!(CompoundCutter::new(vec![]).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_tops() {
        let c = Cutter::ball(6.0, 6.0).unwrap();
        assert!(CompoundCutter::new(vec![CutterSegment::new(c.clone(), 0.0)]).is_err());
        assert!(CompoundCutter::new(vec![CutterSegment::new(c.clone(), -1.0)]).is_err());
        assert!(CompoundCutter::new(vec![CutterSegment::new(c.clone(), f64::NAN)]).is_err());
        assert!(CompoundCutter::new(vec![
            CutterSegment::new(c.clone(), 5.0),
            CutterSegment::new(c.clone(), 5.0),
        ])
        .is_err());
        assert!(CompoundCutter::new(vec![
            CutterSegment::new(c.clone(), 5.0),
            CutterSegment::new(c, 4.0),
        ])
        .is_err());
    }

    #[test]
    fn test_validation_rejects_nonfinite_offset() {
        let c = Cutter::ball(6.0, 6.0).unwrap();
        assert!(
            CompoundCutter::new(vec![CutterSegment::with_z_offset(c, f64::INFINITY, 5.0)])
                .is_err()
        );
    }

    #[test]
    fn test_band_dispatch() {
        let c = ball_then_shank();
        assert_eq!(c.radius_at_height(0.0), 0.0);
        // inside the ball band: sqrt(9 - 4) one unit above the tip
        assert_relative_eq!(c.radius_at_height(1.0), 5.0_f64.sqrt(), epsilon = 1e-12);
        // inside the shank band
        assert_eq!(c.radius_at_height(10.0), 3.0);
        // above the last band
        assert_eq!(c.radius_at_height(25.0), 3.0);
        // below the tip
        assert_eq!(c.radius_at_height(-1.0), 0.0);
    }

    #[test]
    fn test_nominal_dimensions() {
        let c = ball_then_shank();
        assert_eq!(c.diameter(), 6.0);
        assert_eq!(c.length(), 20.0);
        assert_eq!(c.segments().len(), 2);
    }

    #[test]
    fn test_effective_height() {
        let c = ball_then_shank();
        // the ball attains the nominal radius at its equator
        assert_relative_eq!(c.effective_height(), 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_height_at_radius_crosses_bands() {
        // ball r=2 tangent to a 30 degree flank at h = 1
        let c = match Cutter::ball_cone(4.0, 10.0, 30.0, 20.0).unwrap() {
            Cutter::Compound(c) => c,
            other => panic!("expected compound, got {other}"),
        };
        // within the ball band
        let h = c.height_at_radius(1.0);
        assert_relative_eq!(c.radius_at_height(h), 1.0, epsilon = 1e-9);
        assert!(h < 1.0);
        // a radius only the flank attains: the ball band is skipped even
        // though the ball itself could reach it
        let h = c.height_at_radius(1.9);
        assert!(h > 1.0);
        assert_relative_eq!(c.radius_at_height(h), 1.9, epsilon = 1e-9);
    }

    #[test]
    fn test_nested_compound() {
        let inner = Cutter::ball_cone(4.0, 10.0, 30.0, 10.0).unwrap();
        let shank = Cutter::cylindrical(10.0, 30.0).unwrap();
        let c = CompoundCutter::new(vec![
            CutterSegment::new(inner, 10.0),
            CutterSegment::new(shank, 30.0),
        ])
        .unwrap();
        assert_eq!(c.diameter(), 10.0);
        assert_relative_eq!(c.radius_at_height(20.0), 5.0);
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let c = ball_then_shank();
        let json = serde_json::to_string(&c).unwrap();
        let parsed: CompoundCutter = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);

        let bad = r#"{"segments":[]}"#;
        let parsed: std::result::Result<CompoundCutter, _> = serde_json::from_str(bad);
        assert!(parsed.is_err());
    }
}
