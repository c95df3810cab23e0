//! Drawing surface abstraction.
//!
//! The engine never talks to a windowing system or GPU. It draws through
//! [`DrawContext`], obtained from a host-provided [`Surface`]. Two backends
//! ship with the crate:
//! - [`DrawListSurface`]: records a retained [`DrawList`] the host replays
//! - [`RasterSurface`]: rasterizes into an RGBA8 pixel buffer

mod draw_list;
mod raster;

pub use draw_list::{DrawCommand, DrawList, DrawListSurface};
pub use raster::{RasterSurface, TextAnchor};

use crate::rect::Rect;
use crate::style::{StrokeStyle, TextStyle};
use glam::Vec2;
use tickscope_core::Color;

/// Immediate-mode drawing operations in surface pixels (origin top-left).
pub trait DrawContext {
    /// Fill the whole surface, ignoring the clip stack.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke connected segments through `points`.
    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle);

    /// Draw a text label anchored at `position` per `style.align`.
    fn fill_text(&mut self, text: &str, position: Vec2, style: &TextStyle);

    /// Restrict drawing to `rect` intersected with the current clip.
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    /// Stroke a single segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &StrokeStyle) {
        self.stroke_polyline(&[from, to], style);
    }
}

/// A pixel surface owned by the host.
pub trait Surface {
    /// Current size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Drawable context, `None` while the surface cannot be drawn to.
    fn context(&mut self) -> Option<&mut dyn DrawContext>;
}
