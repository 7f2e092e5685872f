#![warn(missing_docs)]

//! Milling cutter geometry for CAM toolpath generation.
//!
//! A [`Cutter`] is a parametric solid of revolution whose silhouette
//! determines how the tool contacts a surface when dropped vertically or
//! swept along a path. This crate is the cutter abstraction layer: a closed
//! set of shapes with validated parameters, consumed by an external
//! geometry engine through the silhouette contract and a flat engine
//! handle. The numeric drop/offset algorithms, surface representations and
//! spatial indexing all live in the engine.
//!
//! # Example
//!
//! ```
//! use kerf_cutter::Cutter;
//!
//! // 6 mm ball end mill, 20 mm flute length
//! let tool = Cutter::ball(6.0, 20.0).unwrap();
//!
//! // silhouette radius at the equator equals the nominal radius
//! assert!((tool.radius_at_height(3.0) - 3.0).abs() < 1e-12);
//! assert!((tool.effective_height() - 3.0).abs() < 1e-12);
//!
//! // invalid geometry never constructs
//! assert!(Cutter::ball(-6.0, 20.0).is_err());
//! ```

pub mod compound;
pub mod cutter;
pub mod engine;
pub mod error;
pub mod params;

pub use compound::{CompoundCutter, CutterSegment};
pub use cutter::Cutter;
pub use engine::{EngineCutterHandle, EngineSegment, GeometryEngine};
pub use error::{CutterError, Result};
pub use params::{BallParams, BullParams, ConeParams, CylParams};
