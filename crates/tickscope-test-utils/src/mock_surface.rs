//! Recording surface for testing.
//!
//! Every drawing call is stored as a [`DrawCommand`]; each `clear` starts a
//! new frame. The recording lives behind an `Arc<Mutex<..>>`, so a clone of
//! the surface kept by the test sees everything the chart draws.

use parking_lot::Mutex;
use std::sync::Arc;
use tickscope::{
    Color, DrawCommand, DrawContext, Rect, StrokeStyle, Surface, TextStyle, Vec2,
};

/// Shared state of a [`MockSurface`].
#[derive(Debug, Default)]
pub struct Recording {
    pub width: u32,
    pub height: u32,
    /// Whether `context()` yields a context.
    pub available: bool,
    /// Completed and in-progress frames, oldest first.
    pub frames: Vec<Vec<DrawCommand>>,
    /// Total drawing calls across all frames.
    pub calls: usize,
    /// Current clip depth; negative means unbalanced pops.
    pub clip_depth: i32,
    /// Deepest clip nesting seen.
    pub max_clip_depth: i32,
}

impl Recording {
    fn record(&mut self, command: DrawCommand) {
        self.calls += 1;
        if matches!(command, DrawCommand::Clear(_)) || self.frames.is_empty() {
            self.frames.push(Vec::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.push(command);
        }
    }
}

/// Context handed to the chart; forwards into the shared recording.
#[derive(Debug, Clone)]
struct RecordingContext {
    recording: Arc<Mutex<Recording>>,
}

impl DrawContext for RecordingContext {
    fn clear(&mut self, color: Color) {
        self.recording.lock().record(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.recording
            .lock()
            .record(DrawCommand::FillRect { rect, color });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle) {
        self.recording.lock().record(DrawCommand::Polyline {
            points: points.to_vec(),
            style: style.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, position: Vec2, style: &TextStyle) {
        self.recording.lock().record(DrawCommand::Text {
            text: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        let mut recording = self.recording.lock();
        recording.clip_depth += 1;
        recording.max_clip_depth = recording.max_clip_depth.max(recording.clip_depth);
        recording.record(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        let mut recording = self.recording.lock();
        recording.clip_depth -= 1;
        recording.record(DrawCommand::PopClip);
    }
}

/// Mock drawing surface for testing.
///
/// # Example
///
/// ```rust
/// use tickscope::{DrawContext, Surface, Color};
/// use tickscope_test_utils::MockSurface;
///
/// let mut surface = MockSurface::new(320, 240);
/// let probe = surface.clone();
///
/// surface.context().unwrap().clear(Color::WHITE);
/// assert_eq!(probe.frame_count(), 1);
///
/// probe.set_available(false);
/// assert!(surface.context().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct MockSurface {
    context: RecordingContext,
}

impl MockSurface {
    /// Create an available surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let recording = Recording {
            width,
            height,
            available: true,
            ..Default::default()
        };
        Self {
            context: RecordingContext {
                recording: Arc::new(Mutex::new(recording)),
            },
        }
    }

    /// Create a surface whose context is unavailable.
    pub fn unavailable(width: u32, height: u32) -> Self {
        let surface = Self::new(width, height);
        surface.set_available(false);
        surface
    }

    fn recording(&self) -> parking_lot::MutexGuard<'_, Recording> {
        self.context.recording.lock()
    }

    /// Toggle whether `context()` yields a context.
    pub fn set_available(&self, available: bool) {
        self.recording().available = available;
    }

    /// Change the reported size.
    pub fn resize(&self, width: u32, height: u32) {
        let mut recording = self.recording();
        recording.width = width;
        recording.height = height;
    }

    /// Number of frames started with `clear`.
    pub fn frame_count(&self) -> usize {
        self.recording().frames.len()
    }

    /// Total drawing calls recorded.
    pub fn call_count(&self) -> usize {
        self.recording().calls
    }

    /// Copy of the most recent frame.
    pub fn last_frame(&self) -> Vec<DrawCommand> {
        self.recording().frames.last().cloned().unwrap_or_default()
    }

    /// Copy of every frame.
    pub fn frames(&self) -> Vec<Vec<DrawCommand>> {
        self.recording().frames.clone()
    }

    /// Polylines in the most recent frame.
    pub fn count_polylines(&self) -> usize {
        self.count_in_last_frame(|c| matches!(c, DrawCommand::Polyline { .. }))
    }

    /// Filled rectangles in the most recent frame.
    pub fn count_fill_rects(&self) -> usize {
        self.count_in_last_frame(|c| matches!(c, DrawCommand::FillRect { .. }))
    }

    /// Polylines in the most recent frame stroked with `color`.
    pub fn count_polylines_with_color(&self, color: Color) -> usize {
        self.count_in_last_frame(
            |c| matches!(c, DrawCommand::Polyline { style, .. } if style.color == color),
        )
    }

    /// Text labels of the most recent frame, in draw order.
    pub fn texts(&self) -> Vec<String> {
        self.last_frame()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Whether every pushed clip was popped.
    pub fn clips_balanced(&self) -> bool {
        self.recording().clip_depth == 0
    }

    /// Deepest clip nesting seen.
    pub fn max_clip_depth(&self) -> i32 {
        self.recording().max_clip_depth
    }

    /// Forget all recorded frames.
    pub fn reset(&self) {
        let mut recording = self.recording();
        recording.frames.clear();
        recording.calls = 0;
        recording.clip_depth = 0;
        recording.max_clip_depth = 0;
    }

    fn count_in_last_frame(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.recording()
            .frames
            .last()
            .map_or(0, |frame| frame.iter().filter(|c| predicate(c)).count())
    }
}

impl Surface for MockSurface {
    fn size(&self) -> (u32, u32) {
        let recording = self.recording();
        (recording.width, recording.height)
    }

    fn context(&mut self) -> Option<&mut dyn DrawContext> {
        if self.recording().available {
            Some(&mut self.context)
        } else {
            None
        }
    }
}
