//! Normalized input events and the draw/pan gesture state machine.
//!
//! The platform layer (the egui glue in [`crate::app`]) translates raw
//! events into [`InputEvent`] values; nothing below that layer ever sees a
//! platform event object. [`Session`] consumes the events and drives the
//! tile store, viewport, and history - all owned by the caller and passed
//! in by reference.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use egui::{Pos2, Vec2};
use image::Rgba;

use crate::history::HistoryLog;
use crate::stroke::{self, Tool};
use crate::tiles::TileStore;
use crate::world::{Viewport, WorldPoint};

/// What produced a begin event. Informational: touch contacts arrive
/// pre-mapped to the primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Pointer,
    Touch,
}

/// Pointer button, already normalized by the platform layer. Buttons with
/// no role here (e.g. secondary) never reach the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
}

/// Platform-independent input event, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Press of a button, or a first touch contact.
    Begin {
        device: Device,
        button: Button,
        pos: Pos2,
    },
    /// Pointer or touch motion.
    Move { pos: Pos2 },
    /// Release of the given button (or of the touch contact).
    End { button: Button },
    /// The pointer left the surface, or the platform force-released the
    /// gesture. Unconditionally ends whatever gesture is active.
    Cancel,
    /// Wheel / trackpad scroll; positive deltas mean scrolling right/down.
    Wheel { delta: Vec2 },
}

/// Whether primary-button and touch input draws or pans. Middle-button
/// panning works in either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Draw,
    Pan,
}

/// The active gesture. Drawing and panning are mutually exclusive by
/// construction: there is exactly one gesture at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// `last` is the most recently routed world point. `tool` and `color`
    /// are captured at stroke start, so toolbar changes mid-stroke do not
    /// affect the stroke in flight.
    Drawing {
        last: WorldPoint,
        tool: Tool,
        color: Rgba<u8>,
    },
    /// `anchor` is `cursor - offset` at pan start; each move sets the
    /// offset to `cursor - anchor`. `trigger` is the button whose release
    /// ends the pan.
    Panning { anchor: Pos2, trigger: Button },
}

/// Mutable core state a session acts on, owned by the caller. The session
/// holds no hidden references to any of it between events.
pub struct SessionCtx<'a> {
    pub store: &'a mut TileStore,
    pub viewport: &'a mut Viewport,
    pub history: &'a mut HistoryLog,
    /// Current screen size, for tile preloading after viewport changes.
    pub screen: Vec2,
}

impl SessionCtx<'_> {
    fn reload_tiles(&mut self) {
        self.store
            .load_around(self.viewport, self.screen.x, self.screen.y);
    }
}

// ============================================================================
// SESSION - gesture state machine
// ============================================================================

/// Consumes normalized input events and turns them into surface mutations.
///
/// Every sample delivered by the platform layer is applied, in order;
/// nothing is coalesced or dropped, so slow frames cannot cut corners off
/// a stroke.
pub struct Session {
    gesture: Gesture,
    tool: Tool,
    mode: InteractionMode,
    color: Rgba<u8>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
            tool: Tool::default(),
            mode: InteractionMode::default(),
            color: Rgba([0, 0, 0, 255]),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.gesture, Gesture::Drawing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, Gesture::Panning { .. })
    }

    pub fn handle_event(&mut self, event: InputEvent, ctx: &mut SessionCtx<'_>) {
        match event {
            InputEvent::Begin { button, pos, .. } => self.begin(button, pos, ctx),
            InputEvent::Move { pos } => self.moved(pos, ctx),
            InputEvent::End { button } => self.end(Some(button), ctx),
            InputEvent::Cancel => self.end(None, ctx),
            InputEvent::Wheel { delta } => {
                // Scroll works in any gesture state. A stroke in flight is
                // unaffected: its last point lives in world space.
                ctx.viewport.scroll_by(delta);
                ctx.reload_tiles();
            }
        }
    }

    fn begin(&mut self, button: Button, pos: Pos2, ctx: &mut SessionCtx<'_>) {
        let pan_trigger = button == Button::Middle
            || (button == Button::Primary && self.mode == InteractionMode::Pan);
        if pan_trigger {
            // Pan takes precedence; a stroke in flight is finished first so
            // its pixels stay undoable as one unit.
            if self.is_drawing() {
                self.finish_stroke(ctx);
            }
            self.gesture = Gesture::Panning {
                anchor: pos - ctx.viewport.offset,
                trigger: button,
            };
        } else if button == Button::Primary && self.gesture == Gesture::Idle {
            self.gesture = Gesture::Drawing {
                last: ctx.viewport.screen_to_world(pos),
                tool: self.tool,
                color: self.color,
            };
        }
    }

    fn moved(&mut self, pos: Pos2, ctx: &mut SessionCtx<'_>) {
        match &mut self.gesture {
            Gesture::Panning { anchor, .. } => {
                let anchor = *anchor;
                ctx.viewport.pan_to(pos, anchor);
                ctx.reload_tiles();
            }
            Gesture::Drawing { last, tool, color } => {
                let curr = ctx.viewport.screen_to_world(pos);
                stroke::route_segment(ctx.store, *last, curr, *tool, *color);
                *last = curr;
            }
            Gesture::Idle => {}
        }
    }

    /// `button == None` is a forced end (pointer left the surface): it
    /// terminates any gesture. Otherwise only the release of the gesture's
    /// triggering button ends it.
    fn end(&mut self, button: Option<Button>, ctx: &mut SessionCtx<'_>) {
        match self.gesture {
            Gesture::Drawing { .. } => {
                if button.is_none() || button == Some(Button::Primary) {
                    self.finish_stroke(ctx);
                }
            }
            Gesture::Panning { trigger, .. } => {
                if button.is_none() || button == Some(trigger) {
                    self.gesture = Gesture::Idle;
                }
            }
            Gesture::Idle => {}
        }
    }

    fn finish_stroke(&mut self, ctx: &mut SessionCtx<'_>) {
        self.gesture = Gesture::Idle;
        ctx.history.checkpoint(ctx.store);
    }
}
