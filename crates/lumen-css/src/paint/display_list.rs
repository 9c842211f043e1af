//! Display List - a sequence of drawing commands

use serde::Serialize;

use crate::layout::Rect;
use crate::style::FontDescriptor;

/// A single drawing command.
///
/// Colours are passed through as written in the stylesheet (`red`,
/// `#eeeeee`); interpreting them is the renderer's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid colour.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill colour.
        color: String,
    },

    /// Draw a run of text with its top-left corner at `(x, y)`.
    Text {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// The text to draw.
        text: String,
        /// Font to draw with.
        font: FontDescriptor,
        /// Text colour.
        color: String,
    },

    /// Draw a straight line.
    Line {
        /// Start x.
        x1: i32,
        /// Start y.
        y1: i32,
        /// End x.
        x2: i32,
        /// End y.
        y2: i32,
        /// Stroke colour.
        color: String,
        /// Stroke width in pixels.
        thickness: i32,
    },

    /// Stroke the border of a rectangle.
    Outline {
        /// Rectangle to outline.
        rect: Rect,
        /// Stroke colour.
        color: String,
        /// Stroke width in pixels.
        thickness: i32,
    },
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
