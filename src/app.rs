//! Application shell: translates egui input into normalized events, hosts
//! the toolbar, and composites the allocated tiles through the viewport.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use eframe::egui;
use egui::{
    Color32, ColorImage, CursorIcon, Rect, TextureHandle, TextureOptions, Vec2, pos2, vec2,
};
use image::Rgba;
use rayon::prelude::*;

use crate::cli::LaunchOptions;
use crate::components::colors::ColorsPanel;
use crate::components::toolbar::{Toolbar, ToolbarAction};
use crate::history::HistoryLog;
use crate::input::{Button, Device, InputEvent, InteractionMode, Session, SessionCtx};
use crate::log_info;
use crate::stroke::Tool;
use crate::tiles::{TILE_SIZE, TileStore};
use crate::world::{TileCoord, Viewport};

/// Cached GPU texture for one tile, tagged with the surface revision it
/// was uploaded from.
struct TileTexture {
    revision: u64,
    handle: TextureHandle,
}

pub struct InkfieldApp {
    store: TileStore,
    viewport: Viewport,
    history: HistoryLog,
    session: Session,
    toolbar: Toolbar,
    colors: ColorsPanel,
    textures: HashMap<TileCoord, TileTexture>,
    /// Screen size as of the last frame; a change forces a preload pass.
    last_screen: Vec2,
    baseline_recorded: bool,
}

impl InkfieldApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, opts: &LaunchOptions) -> Self {
        let mut session = Session::new();
        session.set_tool(opts.start_tool());
        session.set_mode(opts.start_mode());
        session.set_color(rgba(opts.color));
        Self {
            store: TileStore::new(),
            viewport: Viewport::default(),
            history: HistoryLog::new(),
            session,
            toolbar: Toolbar {
                tool: opts.start_tool(),
                mode: opts.start_mode(),
            },
            colors: ColorsPanel::new(opts.color),
            textures: HashMap::new(),
            last_screen: Vec2::ZERO,
            baseline_recorded: false,
        }
    }

    // ---- toolbar-surface operations -----------------------------------------

    fn undo(&mut self) {
        if self.history.undo(&mut self.store) {
            self.store
                .load_around(&self.viewport, self.last_screen.x, self.last_screen.y);
            log_info!("undo ({} tiles live)", self.store.len());
        }
    }

    fn redo(&mut self) {
        if self.history.redo(&mut self.store) {
            self.store
                .load_around(&self.viewport, self.last_screen.x, self.last_screen.y);
            log_info!("redo ({} tiles live)", self.store.len());
        }
    }

    fn clear(&mut self) {
        self.store.clear_all();
        self.history.checkpoint(&self.store);
        log_info!("cleared {} tile(s)", self.store.len());
    }

    // ---- UI panes -----------------------------------------------------------

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        let mut action = None;
        egui::Window::new("toolbar")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::LEFT_TOP, vec2(12.0, 12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    action = self
                        .toolbar
                        .show(ui, self.history.can_undo(), self.history.can_redo());
                    ui.separator();
                    if self.colors.show(ui) {
                        // Picking a color always returns to the pencil.
                        self.toolbar.tool = Tool::Pencil;
                        self.toolbar.mode = InteractionMode::Draw;
                    }
                });
            });

        self.session.set_tool(self.toolbar.tool);
        self.session.set_mode(self.toolbar.mode);
        self.session.set_color(rgba(self.colors.selected));

        match action {
            Some(ToolbarAction::Clear) => self.clear(),
            Some(ToolbarAction::Undo) => self.undo(),
            Some(ToolbarAction::Redo) => self.redo(),
            None => {}
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input(|i| {
            let z = i.modifiers.command && i.key_pressed(egui::Key::Z);
            (z && !i.modifiers.shift, z && i.modifiers.shift)
        });
        if undo {
            self.undo();
        }
        if redo {
            self.redo();
        }
    }

    // ---- input glue ---------------------------------------------------------

    /// Translate this frame's egui events into normalized input events and
    /// feed them to the session, in arrival order. Presses and scrolls over
    /// toolbar widgets stay with the widgets; releases and motion always
    /// reach the session so gestures terminate reliably.
    fn dispatch_input(&mut self, ctx: &egui::Context, screen: Vec2) {
        let over_ui = ctx.is_pointer_over_area();
        let mut events = Vec::new();
        ctx.input(|i| {
            let device = if i.any_touches() {
                Device::Touch
            } else {
                Device::Pointer
            };
            for event in &i.events {
                match *event {
                    egui::Event::PointerButton {
                        pos,
                        button,
                        pressed: true,
                        ..
                    } if !over_ui => {
                        if let Some(button) = normalize_button(button) {
                            events.push(InputEvent::Begin {
                                device,
                                button,
                                pos,
                            });
                        }
                    }
                    egui::Event::PointerButton {
                        button,
                        pressed: false,
                        ..
                    } => {
                        if let Some(button) = normalize_button(button) {
                            events.push(InputEvent::End { button });
                        }
                    }
                    egui::Event::PointerMoved(pos) => events.push(InputEvent::Move { pos }),
                    egui::Event::PointerGone => events.push(InputEvent::Cancel),
                    _ => {}
                }
            }
            if !over_ui && i.scroll_delta != Vec2::ZERO {
                // egui reports scroll as "how far the content should move";
                // flip it back to the scroll direction itself.
                events.push(InputEvent::Wheel {
                    delta: -i.scroll_delta,
                });
            }
        });

        let mut core = SessionCtx {
            store: &mut self.store,
            viewport: &mut self.viewport,
            history: &mut self.history,
            screen,
        };
        for event in events {
            self.session.handle_event(event, &mut core);
        }
    }

    // ---- rendering ----------------------------------------------------------

    fn show_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_gray(245)))
            .show(ctx, |ui| {
                let clip = ui.max_rect();

                // Drop textures for tiles a history restore removed.
                let store = &self.store;
                self.textures.retain(|coord, _| store.contains(*coord));

                let textures = &mut self.textures;
                let viewport = self.viewport;
                let painter = ui.painter();
                for (coord, tile) in self.store.tiles() {
                    let rect = Rect::from_min_size(
                        viewport.world_to_screen(tile.origin),
                        Vec2::splat(TILE_SIZE as f32),
                    );
                    if !rect.intersects(clip) {
                        continue;
                    }
                    let texture = match textures.entry(coord) {
                        Entry::Occupied(mut slot) => {
                            if slot.get().revision != tile.revision() {
                                let entry = slot.get_mut();
                                entry
                                    .handle
                                    .set(tile_color_image(tile.surface()), TextureOptions::NEAREST);
                                entry.revision = tile.revision();
                            }
                            slot.into_mut()
                        }
                        Entry::Vacant(slot) => slot.insert(TileTexture {
                            revision: tile.revision(),
                            handle: ui.ctx().load_texture(
                                format!("tile:{},{}", coord.x, coord.y),
                                tile_color_image(tile.surface()),
                                TextureOptions::NEAREST,
                            ),
                        }),
                    };
                    painter.image(
                        texture.handle.id(),
                        rect,
                        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
            });

        if !ctx.is_pointer_over_area() {
            let icon = if self.session.is_panning() {
                CursorIcon::Grabbing
            } else if self.session.mode() == InteractionMode::Pan {
                CursorIcon::Grab
            } else {
                CursorIcon::Crosshair
            };
            ctx.output_mut(|o| o.cursor_icon = icon);
        }
    }
}

impl eframe::App for InkfieldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = ctx.screen_rect().size();
        if screen != self.last_screen {
            self.last_screen = screen;
            let created = self.store.load_around(&self.viewport, screen.x, screen.y);
            if created > 0 {
                log_info!("preloaded {created} tile(s) for a {screen:?} screen");
            }
        }
        if !self.baseline_recorded {
            // One baseline checkpoint so the very first stroke can be
            // undone back to blank paper.
            self.history.checkpoint(&self.store);
            self.baseline_recorded = true;
        }

        self.show_toolbar(ctx);
        self.handle_shortcuts(ctx);
        self.dispatch_input(ctx, screen);
        self.show_canvas(ctx);
    }
}

fn normalize_button(button: egui::PointerButton) -> Option<Button> {
    match button {
        egui::PointerButton::Primary => Some(Button::Primary),
        egui::PointerButton::Middle => Some(Button::Middle),
        _ => None,
    }
}

fn rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), color.a()])
}

/// Convert a tile surface to an egui image. Converting the full tile is
/// the hot part of a stroke frame, so it runs on the rayon pool.
fn tile_color_image(surface: &image::RgbaImage) -> ColorImage {
    let pixels: Vec<Color32> = surface
        .as_raw()
        .par_chunks_exact(4)
        .map(|px| Color32::from_rgba_unmultiplied(px[0], px[1], px[2], px[3]))
        .collect();
    ColorImage {
        size: [surface.width() as usize, surface.height() as usize],
        pixels,
    }
}
