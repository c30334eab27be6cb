// area-geom: boolean operations on planar regions bounded by lines,
// quadratic and cubic Béziers
// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)

pub mod area;
pub mod area_op;
pub mod chain;
pub mod config;
pub mod crossings;
pub mod curve;
pub mod edge;
pub mod error;
pub mod geom;
pub mod path;
pub mod sweep;
pub mod transform;

pub use area::{Area, AreaPathIter, FlatteningIter};
pub use area_op::AreaOp;
pub use config::{AreaConfig, InvalidCoordPolicy};
pub use curve::{Curve, Direction};
pub use error::{Error, Result};
pub use geom::{Point, Real, Rect};
pub use path::{Path, PathEl, Shape, WindingRule};
pub use transform::{Transform, TransformKind};
