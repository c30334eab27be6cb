// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Options for building and iterating areas.

use crate::area::DEFAULT_FLATTEN_LIMIT;

/// What to do with path segments that carry NaN or infinite coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InvalidCoordPolicy {
    /// Skip the offending segment; the subpath is still closed normally.
    #[default]
    Drop,
    /// Fail with [`Error::InvalidCoordinate`](crate::Error::InvalidCoordinate).
    Reject,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AreaConfig {
    pub invalid_coords: InvalidCoordPolicy,
    /// Maximum recursive subdivision depth when flattening a curve.
    pub flatten_limit: usize,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            invalid_coords: InvalidCoordPolicy::Drop,
            flatten_limit: DEFAULT_FLATTEN_LIMIT,
        }
    }
}

impl AreaConfig {
    pub fn strict() -> Self {
        Self {
            invalid_coords: InvalidCoordPolicy::Reject,
            ..Self::default()
        }
    }
}
