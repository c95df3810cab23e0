//! Retained draw list backend.
//!
//! Every drawing call becomes a [`DrawCommand`]. A frame starts with
//! [`DrawCommand::Clear`], so the list is reset whenever the surface is
//! cleared and always holds exactly the most recent frame.

use super::{DrawContext, Surface};
use crate::rect::Rect;
use crate::style::{StrokeStyle, TextStyle};
use glam::Vec2;
use tickscope_core::Color;

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
    },
    Polyline {
        points: Vec<Vec2>,
        style: StrokeStyle,
    },
    Text {
        text: String,
        position: Vec2,
        style: TextStyle,
    },
    PushClip(Rect),
    PopClip,
}

/// Retained list of drawing commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Replay the recorded frame into another context.
    pub fn replay(&self, target: &mut dyn DrawContext) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => target.clear(*color),
                DrawCommand::FillRect { rect, color } => target.fill_rect(*rect, *color),
                DrawCommand::Polyline { points, style } => target.stroke_polyline(points, style),
                DrawCommand::Text {
                    text,
                    position,
                    style,
                } => target.fill_text(text, *position, style),
                DrawCommand::PushClip(rect) => target.push_clip(*rect),
                DrawCommand::PopClip => target.pop_clip(),
            }
        }
    }

    /// Number of polyline commands.
    pub fn polyline_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline { .. }))
            .count()
    }

    /// Number of filled rectangles.
    pub fn fill_rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }

    /// All text labels in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawContext for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            style: style.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, position: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }
}

/// Surface of fixed size that records into a [`DrawList`].
#[derive(Debug, Clone)]
pub struct DrawListSurface {
    width: u32,
    height: u32,
    list: DrawList,
}

impl DrawListSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            list: DrawList::new(),
        }
    }

    /// Change the reported size. The host must call
    /// [`Chart::invalidate`](crate::Chart::invalidate) afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// The most recently drawn frame.
    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }
}

impl Surface for DrawListSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn context(&mut self) -> Option<&mut dyn DrawContext> {
        Some(&mut self.list)
    }
}
