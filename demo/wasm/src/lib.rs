// Copyright 2025 Lars Brubaker
// WASM bindings for area-geom

use area_geom::{Area, Path, PathEl, Rect, Transform, WindingRule};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

fn js_err(e: area_geom::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A mutable region that JS can combine with other regions.
#[wasm_bindgen]
pub struct AreaJs {
    inner: Area,
}

#[wasm_bindgen]
impl AreaJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> AreaJs {
        AreaJs { inner: Area::new() }
    }

    /// Region enclosed by a closed polygon given as [x0,y0, x1,y1, ...].
    /// winding: 0=EvenOdd 1=NonZero
    pub fn from_polygon(vertices: &[f64], winding: u32) -> Result<AreaJs, JsValue> {
        let pts: Vec<(f64, f64)> = vertices.chunks_exact(2).map(|c| (c[0], c[1])).collect();
        let mut p = Path::polygon(&pts);
        p.set_winding_rule(winding_rule(winding));
        Ok(AreaJs {
            inner: Area::from_shape(&p).map_err(js_err)?,
        })
    }

    pub fn from_rect(x: f64, y: f64, w: f64, h: f64) -> Result<AreaJs, JsValue> {
        Ok(AreaJs {
            inner: Area::from_shape(&Rect::from_xywh(x, y, w, h)).map_err(js_err)?,
        })
    }

    pub fn from_ellipse(x: f64, y: f64, w: f64, h: f64) -> Result<AreaJs, JsValue> {
        Ok(AreaJs {
            inner: Area::from_shape(&Path::ellipse(x, y, w, h)).map_err(js_err)?,
        })
    }

    /// Apply a boolean operation with `other`.
    /// op: 0=Add 1=Subtract 2=Intersect 3=Xor
    pub fn combine(&mut self, other: &AreaJs, op: u32) -> Result<(), JsValue> {
        let r = match op {
            0 => self.inner.add(&other.inner),
            1 => self.inner.subtract(&other.inner),
            2 => self.inner.intersect(&other.inner),
            3 => self.inner.exclusive_or(&other.inner),
            _ => return Err(JsValue::from_str("unknown operation")),
        };
        r.map_err(js_err)
    }

    /// Map through the affine matrix [m00, m10, m01, m11, m02, m12].
    pub fn transform(&mut self, m: &[f64]) -> Result<(), JsValue> {
        let [m00, m10, m01, m11, m02, m12] = <[f64; 6]>::try_from(m)
            .map_err(|_| JsValue::from_str("expected six matrix coefficients"))?;
        self.inner
            .transform(&Transform::new(m00, m10, m01, m11, m02, m12))
            .map_err(js_err)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.inner.contains(x, y)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Bounding box as [x0, y0, x1, y1].
    pub fn bounds(&self) -> Vec<f64> {
        let r = self.inner.bounds();
        vec![r.x0, r.y0, r.x1, r.y1]
    }

    /// Flattened boundary loops. Each loop is written as its vertex count
    /// followed by that many x,y pairs.
    pub fn get_contours(&self, flatness: f64) -> Result<Vec<f64>, JsValue> {
        let mut out = Vec::new();
        let mut head = 0;
        for el in self.inner.flattened_path_iter(None, flatness).map_err(js_err)? {
            match el {
                PathEl::MoveTo(p) => {
                    head = out.len();
                    out.extend_from_slice(&[1.0, p.x, p.y]);
                }
                PathEl::LineTo(p) => {
                    out.extend_from_slice(&[p.x, p.y]);
                    out[head] += 1.0;
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl Default for AreaJs {
    fn default() -> Self {
        Self::new()
    }
}

fn winding_rule(winding: u32) -> WindingRule {
    match winding {
        0 => WindingRule::EvenOdd,
        _ => WindingRule::NonZero,
    }
}

/// Convenience: combine two polygons and return the flattened result in
/// the same layout as `AreaJs::get_contours`.
#[wasm_bindgen]
pub fn combine_polygons(a: &[f64], b: &[f64], op: u32) -> Result<Vec<f64>, JsValue> {
    let mut left = AreaJs::from_polygon(a, 1)?;
    let right = AreaJs::from_polygon(b, 1)?;
    left.combine(&right, op)?;
    left.get_contours(0.25)
}
