//! Primitives handed from the pipeline to a rasterizing frontend.
//!
//! The core crate stops at screen space. Frontends consume [`DrawOp`] slices
//! and turn them into pixels or terminal cells.

use crate::color::Color;
use crate::math::Vec2;

/// A projected vertex ready for rasterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub pos: Vec2,
    pub color: Color,
}

impl ScreenVertex {
    pub const fn new(pos: Vec2, color: Color) -> Self {
        ScreenVertex { pos, color }
    }
}

/// One rasterization command, already in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Triangle([ScreenVertex; 3]),
    Line { a: Vec2, b: Vec2, color: Color },
    Point { pos: Vec2, color: Color },
}
