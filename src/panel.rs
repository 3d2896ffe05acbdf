//! The galaxy control panel.
//!
//! Every [`ParamField`] gets a widget bound directly to the shared
//! [`GalaxyParams`]: sliders with the declared min/max/step for numbers,
//! text inputs for colors. Widgets report [`ParamChange`]s; a change is
//! provisional while a slider is being dragged or a color is being typed,
//! and settled once the gesture ends.

use std::collections::HashSet;

use crate::color::Color;
use crate::host::ParamChange;
use crate::params::{GalaxyParams, ParamField, ParamRange};

/// Turns widget interaction into provisional/settled change events.
///
/// A field enters a gesture when it changes while being dragged (or
/// edited); the gesture settles when the drag stops or focus is lost. A
/// gesture that never changed the value settles silently.
#[derive(Debug, Default)]
pub struct SettleTracker {
    in_gesture: HashSet<ParamField>,
}

impl SettleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one frame of interaction with the widget for `field`.
    ///
    /// * `changed`: the value changed this frame
    /// * `active`: a gesture is in progress (dragging, text has focus)
    /// * `ended`: the gesture ended this frame (drag released, focus lost)
    pub fn observe(
        &mut self,
        field: ParamField,
        changed: bool,
        active: bool,
        ended: bool,
    ) -> Option<ParamChange> {
        if ended {
            let had_changes = self.in_gesture.remove(&field);
            return (had_changes || changed).then(|| ParamChange::settled(field));
        }
        if !changed {
            return None;
        }
        if active {
            self.in_gesture.insert(field);
            Some(ParamChange::provisional(field))
        } else {
            // Click on the rail, keyboard step: no gesture to wait for
            Some(ParamChange::settled(field))
        }
    }

    /// Whether `field` has unsettled changes.
    pub fn is_pending(&self, field: ParamField) -> bool {
        self.in_gesture.contains(&field)
    }
}

/// Read-only figures shown under the parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelStats {
    pub points: usize,
    pub generation_ms: f64,
    pub fps: f32,
}

/// The egui window exposing every galaxy parameter.
#[derive(Debug)]
pub struct ControlPanel {
    tracker: SettleTracker,
    visible: bool,
    // Last drawn widget rectangles, so tests can aim the pointer
    #[cfg(test)]
    rects: std::collections::HashMap<ParamField, egui::Rect>,
}

impl ControlPanel {
    pub fn new(visible: bool) -> Self {
        Self {
            tracker: SettleTracker::new(),
            visible,
            #[cfg(test)]
            rects: Default::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Draw the panel, editing `params` in place. Returns this frame's
    /// change events in the order the widgets reported them.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        params: &mut GalaxyParams,
        stats: PanelStats,
    ) -> Vec<ParamChange> {
        let mut changes = Vec::new();
        if !self.visible {
            return changes;
        }

        egui::Window::new("Galaxy")
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .default_width(280.0)
            .resizable(false)
            .show(ctx, |ui| {
                for field in ParamField::ALL {
                    if let Some(change) = self.field_ui(ui, field, params) {
                        changes.push(change);
                    }
                }

                ui.separator();
                ui.label(format!("points: {}", stats.points));
                ui.label(format!("generated in {:.1} ms", stats.generation_ms));
                ui.label(format!("{:.0} fps", stats.fps));
                ui.small("drag to orbit · scroll to zoom · double-click for fullscreen · H hides");
            });

        changes
    }

    fn field_ui(
        &mut self,
        ui: &mut egui::Ui,
        field: ParamField,
        params: &mut GalaxyParams,
    ) -> Option<ParamChange> {
        let label = field.label();
        let response = match (field, field.range()) {
            (ParamField::Count, Some(range)) => slider(ui, &mut params.count, range, label),
            (ParamField::Size, Some(range)) => slider(ui, &mut params.size, range, label),
            (ParamField::Radius, Some(range)) => slider(ui, &mut params.radius, range, label),
            (ParamField::Branches, Some(range)) => slider(ui, &mut params.branches, range, label),
            (ParamField::Spin, Some(range)) => slider(ui, &mut params.spin, range, label),
            (ParamField::Randomness, Some(range)) => {
                slider(ui, &mut params.randomness, range, label)
            }
            (ParamField::RandomnessPower, Some(range)) => {
                slider(ui, &mut params.randomness_power, range, label)
            }
            (ParamField::InsideColor, _) => {
                return self.color_ui(ui, field, &mut params.inside_color);
            }
            (ParamField::OutsideColor, _) => {
                return self.color_ui(ui, field, &mut params.outside_color);
            }
            _ => return None,
        };
        #[cfg(test)]
        self.rects.insert(field, response.rect);

        // Sliders only sense drags, so a press on the rail starts a gesture
        // right away and a plain click settles on release
        self.tracker.observe(
            field,
            response.changed(),
            response.dragged(),
            response.drag_stopped(),
        )
    }

    fn color_ui(
        &mut self,
        ui: &mut egui::Ui,
        field: ParamField,
        value: &mut String,
    ) -> Option<ParamChange> {
        ui.horizontal(|ui| {
            swatch(ui, value.parse::<Color>().ok());
            let response = ui.add(egui::TextEdit::singleline(value).desired_width(110.0));
            ui.label(field.label());
            #[cfg(test)]
            self.rects.insert(field, response.rect);
            // Enter surrenders focus, so it settles like clicking away
            self.tracker.observe(
                field,
                response.changed(),
                response.has_focus(),
                response.lost_focus(),
            )
        })
        .inner
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(true)
    }
}

fn slider<N: egui::emath::Numeric>(
    ui: &mut egui::Ui,
    value: &mut N,
    range: ParamRange,
    label: &str,
) -> egui::Response {
    ui.add(
        egui::Slider::new(value, N::from_f64(range.min)..=N::from_f64(range.max))
            .step_by(range.step)
            .text(label),
    )
}

/// Small filled square showing the parsed color, or a red outline when the
/// text does not parse.
fn swatch(ui: &mut egui::Ui, color: Option<Color>) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
    match color {
        Some(color) => {
            let [r, g, b] = color.to_rgb_u8();
            ui.painter()
                .rect_filled(rect, 2.0, egui::Color32::from_rgb(r, g, b));
        }
        None => {
            ui.painter().rect_stroke(
                rect,
                2.0,
                egui::Stroke::new(1.5, egui::Color32::RED),
                egui::StrokeKind::Inside,
            );
        }
    }
}
