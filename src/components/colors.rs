//! Color selection: fixed swatch palette plus a custom picker.

use eframe::egui;
use egui::{Color32, Sense, Stroke, Vec2};

/// The fixed swatch palette.
pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(0x00, 0x00, 0x00),
    Color32::from_rgb(0xff, 0x00, 0x00),
    Color32::from_rgb(0x00, 0xff, 0x00),
    Color32::from_rgb(0x00, 0x00, 0xff),
    Color32::from_rgb(0xff, 0xff, 0x00),
    Color32::from_rgb(0xff, 0x00, 0xff),
];

pub struct ColorsPanel {
    pub selected: Color32,
}

impl ColorsPanel {
    pub fn new(selected: Color32) -> Self {
        Self { selected }
    }

    /// Render the swatch row plus the custom picker button. Returns true
    /// when the selection changed this frame.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        for swatch in PALETTE {
            let (rect, response) = ui.allocate_exact_size(Vec2::splat(18.0), Sense::click());
            ui.painter().rect_filled(rect, 3.0, swatch);
            let outline = if self.selected == swatch {
                Stroke::new(2.0, ui.visuals().selection.stroke.color)
            } else {
                Stroke::new(1.0, Color32::from_gray(160))
            };
            ui.painter().rect_stroke(rect, 3.0, outline);
            if response.clicked() {
                self.selected = swatch;
                changed = true;
            }
        }

        if ui.color_edit_button_srgba(&mut self.selected).changed() {
            changed = true;
        }

        changed
    }
}
