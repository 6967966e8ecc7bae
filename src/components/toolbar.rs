//! Floating toolbar: tool and mode selection plus history controls.

use eframe::egui;

use crate::input::InteractionMode;
use crate::stroke::Tool;

/// One-shot toolbar requests, executed by the app after the UI pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Clear,
    Undo,
    Redo,
}

pub struct Toolbar {
    pub tool: Tool,
    pub mode: InteractionMode,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            mode: InteractionMode::Draw,
        }
    }
}

impl Toolbar {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        can_undo: bool,
        can_redo: bool,
    ) -> Option<ToolbarAction> {
        let mut action = None;

        for tool in [Tool::Pencil, Tool::Eraser] {
            if ui.selectable_label(self.tool == tool, tool.label()).clicked() {
                self.tool = tool;
                // Picking a tool implies wanting to draw with it.
                self.mode = InteractionMode::Draw;
            }
        }

        ui.separator();

        if ui
            .selectable_label(self.mode == InteractionMode::Draw, "Draw")
            .on_hover_text("Primary button / touch draws")
            .clicked()
        {
            self.mode = InteractionMode::Draw;
        }
        if ui
            .selectable_label(self.mode == InteractionMode::Pan, "Pan")
            .on_hover_text("Primary button / touch pans (middle button always pans)")
            .clicked()
        {
            self.mode = InteractionMode::Pan;
        }

        ui.separator();

        if ui
            .add_enabled(can_undo, egui::Button::new("Undo"))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            action = Some(ToolbarAction::Undo);
        }
        if ui
            .add_enabled(can_redo, egui::Button::new("Redo"))
            .on_hover_text("Ctrl+Shift+Z")
            .clicked()
        {
            action = Some(ToolbarAction::Redo);
        }
        if ui
            .button("Clear")
            .on_hover_text("Repaint every tile to blank paper")
            .clicked()
        {
            action = Some(ToolbarAction::Clear);
        }

        action
    }
}
