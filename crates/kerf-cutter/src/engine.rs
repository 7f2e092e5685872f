//! The boundary to the external geometry engine.
//!
//! The engine owns the triangulated surface, spatial indexing and the
//! numeric drop/offset algorithms. This module is the single point of
//! coupling: a flat [`EngineCutterHandle`] carrying the validated
//! parameters in the engine's format, and the [`GeometryEngine`] trait the
//! engine implements.

use serde::{Deserialize, Serialize};

use crate::cutter::Cutter;

/// The geometry engine's representation of a cutter.
///
/// Plain data, produced by [`Cutter::to_engine_handle`]. Extracting the
/// fields yields exactly the parameters the cutter was constructed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum EngineCutterHandle {
    /// Flat end mill.
    Cylinder {
        /// Tool diameter in mm.
        diameter: f64,
        /// Flute length in mm.
        length: f64,
    },
    /// Ball end mill.
    Sphere {
        /// Tool diameter in mm.
        diameter: f64,
        /// Flute length in mm.
        length: f64,
    },
    /// Bull end mill.
    Torus {
        /// Tool diameter in mm.
        diameter: f64,
        /// Corner radius in mm.
        corner_radius: f64,
        /// Flute length in mm.
        length: f64,
    },
    /// Tapered cutter.
    Cone {
        /// Tool diameter in mm.
        diameter: f64,
        /// Half-angle between axis and surface, degrees.
        half_angle: f64,
        /// Flute length in mm.
        length: f64,
    },
    /// Compound cutter.
    Composite {
        /// The stacked bands, bottom first.
        segments: Vec<EngineSegment>,
    },
}

/// One band of a composite engine handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSegment {
    /// The band's shape.
    pub handle: EngineCutterHandle,
    /// Height shift applied when evaluating the band's shape.
    pub z_offset: f64,
    /// Upper height bound of the band.
    pub top: f64,
}

impl EngineCutterHandle {
    /// Nominal tool diameter carried by the handle.
    pub fn diameter(&self) -> f64 {
        match self {
            EngineCutterHandle::Cylinder { diameter, .. }
            | EngineCutterHandle::Sphere { diameter, .. }
            | EngineCutterHandle::Torus { diameter, .. }
            | EngineCutterHandle::Cone { diameter, .. } => *diameter,
            EngineCutterHandle::Composite { segments } => segments
                .iter()
                .map(|s| s.handle.diameter())
                .fold(0.0, f64::max),
        }
    }
}

pub(crate) fn translate(cutter: &Cutter) -> EngineCutterHandle {
    match cutter {
        Cutter::Cylindrical(p) => EngineCutterHandle::Cylinder {
            diameter: p.diameter(),
            length: p.length(),
        },
        Cutter::Ball(p) => EngineCutterHandle::Sphere {
            diameter: p.diameter(),
            length: p.length(),
        },
        Cutter::Bull(p) => EngineCutterHandle::Torus {
            diameter: p.diameter(),
            corner_radius: p.corner_radius(),
            length: p.length(),
        },
        Cutter::Cone(p) => EngineCutterHandle::Cone {
            diameter: p.diameter(),
            half_angle: p.half_angle(),
            length: p.length(),
        },
        Cutter::Compound(c) => EngineCutterHandle::Composite {
            segments: c
                .segments()
                .iter()
                .map(|s| EngineSegment {
                    handle: translate(&s.cutter),
                    z_offset: s.z_offset,
                    top: s.top,
                })
                .collect(),
        },
    }
}

/// The external drop/offset engine.
///
/// Implemented outside this crate by whatever engine performs the numeric
/// scanning work. Handles are plain values; the engine holds one only for
/// the duration of a single query and may issue queries from many threads.
pub trait GeometryEngine {
    /// Drop the given cutter at `(x, y)` against the engine's surface.
    ///
    /// Returns the tip Z at first contact, or `None` when the cutter does
    /// not contact the surface at that position.
    fn drop_cutter(&self, tool: &EngineCutterHandle, x: f64, y: f64) -> Option<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_round_trip() {
        let c = Cutter::bull(10.0, 2.0, 25.0).unwrap();
        match c.to_engine_handle() {
            EngineCutterHandle::Torus {
                diameter,
                corner_radius,
                length,
            } => {
                assert!((diameter - 10.0).abs() < 1e-12);
                assert!((corner_radius - 2.0).abs() < 1e-12);
                assert!((length - 25.0).abs() < 1e-12);
            }
            other => panic!("expected torus handle, got {other:?}"),
        }

        let c = Cutter::cone(10.0, 45.0, 20.0).unwrap();
        match c.to_engine_handle() {
            EngineCutterHandle::Cone {
                diameter,
                half_angle,
                length,
            } => {
                assert!((diameter - 10.0).abs() < 1e-12);
                assert!((half_angle - 45.0).abs() < 1e-12);
                assert!((length - 20.0).abs() < 1e-12);
            }
            other => panic!("expected cone handle, got {other:?}"),
        }
    }

    #[test]
    fn test_composite_handle() {
        let c = Cutter::ball_cone(4.0, 10.0, 30.0, 20.0).unwrap();
        let handle = c.to_engine_handle();
        match &handle {
            EngineCutterHandle::Composite { segments } => {
                assert_eq!(segments.len(), 2);
                assert!(matches!(
                    segments[0].handle,
                    EngineCutterHandle::Sphere { .. }
                ));
                assert!(matches!(
                    segments[1].handle,
                    EngineCutterHandle::Cone { .. }
                ));
            }
            other => panic!("expected composite handle, got {other:?}"),
        }
        assert!((handle.diameter() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_handle_diameter_matches_cutter() {
        let cutters = [
            Cutter::cylindrical(6.0, 20.0).unwrap(),
            Cutter::ball(6.0, 20.0).unwrap(),
            Cutter::bull(10.0, 2.0, 20.0).unwrap(),
            Cutter::cone(10.0, 45.0, 20.0).unwrap(),
        ];
        for c in &cutters {
            assert!((c.to_engine_handle().diameter() - c.diameter()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_handle_serialization() {
        let c = Cutter::ball(6.0, 20.0).unwrap();
        let handle = c.to_engine_handle();
        let json = serde_json::to_string(&handle).unwrap();
        assert!(json.contains("Sphere"));
        let parsed: EngineCutterHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, handle);
    }

    /// Stub engine: an infinite horizontal plane.
    struct Plane {
        z: f64,
    }

    impl GeometryEngine for Plane {
        fn drop_cutter(&self, _tool: &EngineCutterHandle, _x: f64, _y: f64) -> Option<f64> {
            Some(self.z)
        }
    }

    #[test]
    fn test_drop_dispatch() {
        let engine = Plane { z: 1.5 };
        let c = Cutter::ball(6.0, 20.0).unwrap();
        let z = c.drop_at(&engine, 10.0, 10.0);
        assert_eq!(z, Some(1.5));

        // dispatch also works through a trait object
        let dyn_engine: &dyn GeometryEngine = &engine;
        assert_eq!(c.drop_at(dyn_engine, 0.0, 0.0), Some(1.5));
    }
}
