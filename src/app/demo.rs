//! Demo window: three numeric fields plus order and mode buttons, driven by
//! keyboard, gamepad or pointer through one navigation manager.

use std::sync::mpsc::{self, Receiver};

use eframe::egui::{self, Align2, Color32, FontId, Key, Sense, Stroke, Vec2};
use uinav::ui::focus::pure::Rect as NavRect;
use uinav::{
    Button, ControlId, ControlTree, EventFlow, FrameInput, NavConfig, NavError, NavEvent,
    NavEventKind, NavInput, NavServices, NavigationManager, Startup, TextEdit,
};

#[cfg(target_os = "linux")]
use uinav::config::StickConfig;
#[cfg(target_os = "linux")]
use uinav::input::{scan_gamepads, InputDevice};
#[cfg(target_os = "linux")]
use uinav::ui::focus::pure::map_button_to_nav;

use crate::app::highlight::{draw_focus_ring, FocusRingStyle};
use crate::app::keyboard::{key_to_nav, numeric_chars};

const AXES: [&str; 3] = ["X", "Y", "Z"];
const ORDERS: [&str; 4] = ["YXZ", "ZXY", "XYZ", "ZYX"];
const ANGLE_STEP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RotationMode {
    Matrix,
    Quaternion,
}

impl RotationMode {
    fn label(self) -> &'static str {
        match self {
            RotationMode::Matrix => "Matrix",
            RotationMode::Quaternion => "Quaternion",
        }
    }
}

struct Widgets {
    axes: [ControlId; 3],
    orders: [ControlId; 4],
    matrix: ControlId,
    quaternion: ControlId,
}

pub struct DemoApp {
    tree: ControlTree,
    services: NavServices,
    startup: Startup,
    frame_input: FrameInput,
    widgets: Widgets,
    events: Receiver<NavEvent>,
    #[cfg(target_os = "linux")]
    stick: StickConfig,
    order: &'static str,
    mode: RotationMode,
    angles: [f64; 3],
    #[cfg(target_os = "linux")]
    gamepads: Vec<InputDevice>,
}

impl DemoApp {
    pub fn new(config: &NavConfig) -> Result<Self, NavError> {
        let mut tree = ControlTree::new();
        let form = tree.add_element(None, "form")?;

        let angles = tree.add_element(Some(form), "angles")?;
        let mut axes = [form; 3];
        for (slot, name) in axes.iter_mut().zip(AXES) {
            let edit = TextEdit::new("0").with_numeric_step(ANGLE_STEP);
            *slot = tree.add_control(Some(angles), name, edit)?;
        }

        let order_row = tree.add_element(Some(form), "orders")?;
        let mut orders = [form; 4];
        for (slot, label) in orders.iter_mut().zip(ORDERS) {
            *slot = tree.add_control(Some(order_row), label, Button::new(label))?;
        }

        let mode_row = tree.add_element(Some(form), "modes")?;
        let matrix = tree.add_control(Some(mode_row), "matrix", Button::new("Use Matrix"))?;
        let quaternion = tree.add_control(Some(mode_row), "quaternion", Button::new("Use Quaternion"))?;

        // Everything bubbles up to the form
        let (tx, events) = mpsc::channel();
        tree.subscribe(form, move |event| {
            let _ = tx.send(*event);
            EventFlow::Handled
        })?;

        let mut services = NavServices::new();
        let startup = Startup::new(&mut services, &tree, NavigationManager::new(config))?;

        #[cfg(target_os = "linux")]
        let gamepads = scan_gamepads(&config.stick);
        #[cfg(target_os = "linux")]
        tracing::info!("{} gamepad(s) available", gamepads.len());

        Ok(Self {
            tree,
            services,
            startup,
            frame_input: FrameInput::new(),
            widgets: Widgets {
                axes,
                orders,
                matrix,
                quaternion,
            },
            events,
            #[cfg(target_os = "linux")]
            stick: config.stick.clone(),
            order: ORDERS[0],
            mode: RotationMode::Matrix,
            angles: [0.0; 3],
            #[cfg(target_os = "linux")]
            gamepads,
        })
    }

    fn focused(&self) -> Option<ControlId> {
        self.services
            .get(self.tree.root_id())
            .and_then(NavigationManager::focused)
    }

    /// Field receiving typed text: navigation focus or the last clicked field
    fn text_target(&self) -> Option<ControlId> {
        self.widgets
            .axes
            .into_iter()
            .find(|id| self.tree.is_selection_active(*id))
    }

    fn handle_keyboard(&mut self, raw_input: &mut egui::RawInput) {
        let target = self.text_target();
        let pointer_edit = target.filter(|id| Some(*id) != self.focused());

        for event in std::mem::take(&mut raw_input.events) {
            let consumed = match &event {
                egui::Event::Key {
                    key, pressed, modifiers, ..
                } => match key_to_nav(*key, *modifiers) {
                    // A clicked field finishes its edit without taking navigation focus
                    Some(NavInput::Commit) if pointer_edit.is_some() => {
                        if *pressed {
                            self.commit_pointer_edit(pointer_edit);
                        }
                        true
                    }
                    Some(input) => {
                        if *pressed {
                            self.frame_input.push(input);
                        }
                        true
                    }
                    None if *key == Key::Backspace && target.is_some() => {
                        if *pressed {
                            self.edit_text(target, TextEdit::backspace);
                        }
                        true
                    }
                    None => false,
                },
                egui::Event::Text(text) if target.is_some() => {
                    let typed = numeric_chars(text);
                    self.edit_text(target, |edit| edit.insert_str(&typed));
                    true
                }
                _ => false,
            };
            if !consumed {
                raw_input.events.push(event);
            }
        }
    }

    fn edit_text(&mut self, target: Option<ControlId>, edit: impl FnOnce(&mut TextEdit)) {
        if let Some(field) = target.and_then(|id| self.tree.control_mut::<TextEdit>(id)) {
            edit(field);
        }
    }

    fn commit_pointer_edit(&mut self, target: Option<ControlId>) {
        let Some(id) = target else {
            return;
        };
        if let Some(field) = self.tree.control_mut::<TextEdit>(id) {
            field.commit();
        }
        if let Err(err) = self.tree.raise_event(id, NavEventKind::Committed) {
            tracing::warn!("pointer edit commit failed: {err}");
        }
    }

    #[cfg(target_os = "linux")]
    fn poll_gamepads(&mut self) {
        for pad in self.gamepads.iter_mut() {
            if let Some(input) = pad.poll(&self.stick).and_then(map_button_to_nav) {
                self.frame_input.push(input);
            }
        }
        self.gamepads.retain(InputDevice::enabled);
    }

    fn process_navigation(&mut self) {
        if let Err(err) = self.startup.poll(true, &mut self.services, &mut self.tree) {
            tracing::error!("navigation startup failed: {err}");
            return;
        }
        let Some(manager) = self.services.get_mut(self.tree.root_id()) else {
            return;
        };
        match self.frame_input.process(manager, &mut self.tree) {
            Ok(outcomes) => {
                for outcome in outcomes.iter().filter(|outcome| outcome.focus_changed()) {
                    tracing::debug!(?outcome, "focus changed");
                }
            }
            Err(err) => tracing::error!("navigation input dropped: {err}"),
        }
    }

    /// Apply bubbled events to the demo state; true if any arrived
    fn apply_events(&mut self) -> bool {
        let mut any = false;
        while let Ok(event) = self.events.try_recv() {
            any = true;
            let source = event.source;

            if let Some(axis) = self.widgets.axes.iter().position(|id| *id == source) {
                if matches!(event.kind, NavEventKind::Committed | NavEventKind::NavigatedOut) {
                    let value = self
                        .tree
                        .control::<TextEdit>(source)
                        .and_then(TextEdit::numeric_value);
                    match value {
                        Some(value) => {
                            self.angles[axis] = value;
                            tracing::info!(axis = AXES[axis], value, "angle applied");
                        }
                        None => tracing::warn!(axis = AXES[axis], "ignoring non-numeric angle"),
                    }
                }
            } else if let Some(idx) = self.widgets.orders.iter().position(|id| *id == source) {
                self.order = ORDERS[idx];
                tracing::info!(order = self.order, "rotation order selected");
            } else if source == self.widgets.matrix {
                self.mode = RotationMode::Matrix;
            } else if source == self.widgets.quaternion {
                self.mode = RotationMode::Quaternion;
            }
        }
        any
    }

    fn status_line(&self) -> String {
        format!(
            "Current Order: {} ({}) | X={} Y={} Z={}",
            self.order,
            self.mode.label(),
            self.angles[0],
            self.angles[1],
            self.angles[2]
        )
    }

    fn report_rect(&mut self, id: ControlId, rect: egui::Rect) {
        let nav_rect = NavRect::new(rect.min.x, rect.min.y, rect.width(), rect.height());
        if let Err(err) = self.tree.set_rect(id, nav_rect) {
            tracing::warn!("{err}");
        }
    }

    fn draw_focus(&self, painter: &egui::Painter, id: ControlId, rect: egui::Rect) {
        if self.tree.is_selected(id) {
            draw_focus_ring(painter, rect, &FocusRingStyle::default());
        } else if self.tree.is_selection_active(id) {
            draw_focus_ring(painter, rect, &FocusRingStyle::pointer());
        }
    }

    fn pointer_focus(&mut self, id: ControlId) {
        // Clicking away finishes the field the pointer was editing
        let previous = self
            .text_target()
            .filter(|prev| *prev != id && Some(*prev) != self.focused());
        self.commit_pointer_edit(previous);

        if let Err(err) = self.tree.note_pointer_focus(id) {
            tracing::debug!("pointer focus ignored: {err}");
            return;
        }
        if self.tree.control::<Button>(id).is_some() {
            if let Err(err) = self.tree.raise_event(id, NavEventKind::Clicked) {
                tracing::warn!("{err}");
            }
        }
    }

    fn show_axis(&mut self, ui: &mut egui::Ui, axis: usize) {
        let id = self.widgets.axes[axis];
        ui.horizontal(|ui| {
            ui.label(AXES[axis]);
            let (rect, response) = ui.allocate_exact_size(Vec2::new(160.0, 28.0), Sense::click());
            self.report_rect(id, rect);

            let painter = ui.painter();
            painter.rect_filled(rect, 4.0, Color32::from_gray(32));
            if let Some(edit) = self.tree.control::<TextEdit>(id) {
                let font = FontId::monospace(16.0);
                let text_pos = rect.left_center() + Vec2::new(6.0, 0.0);
                painter.text(text_pos, Align2::LEFT_CENTER, edit.text(), font.clone(), Color32::WHITE);

                if self.tree.is_selection_active(id) {
                    let before: String = edit.text().chars().take(edit.caret()).collect();
                    let x = text_pos.x + painter.layout_no_wrap(before, font, Color32::WHITE).size().x;
                    painter.line_segment(
                        [egui::pos2(x, rect.top() + 5.0), egui::pos2(x, rect.bottom() - 5.0)],
                        Stroke::new(1.0, Color32::WHITE),
                    );
                }
            }
            self.draw_focus(painter, id, rect);

            if response.clicked() {
                self.pointer_focus(id);
            }
        });
    }

    fn show_button(&mut self, ui: &mut egui::Ui, id: ControlId) {
        let Some(label) = self.tree.control::<Button>(id).map(|button| button.label().to_string()) else {
            return;
        };
        let (rect, response) = ui.allocate_exact_size(Vec2::new(120.0, 28.0), Sense::click());
        self.report_rect(id, rect);

        let painter = ui.painter();
        let fill = if response.hovered() {
            Color32::from_gray(64)
        } else {
            Color32::from_gray(48)
        };
        painter.rect_filled(rect, 4.0, fill);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(14.0),
            Color32::WHITE,
        );
        self.draw_focus(painter, id, rect);

        if response.clicked() {
            self.pointer_focus(id);
        }
    }
}

impl eframe::App for DemoApp {
    fn raw_input_hook(&mut self, _ctx: &egui::Context, raw_input: &mut egui::RawInput) {
        if !raw_input.focused {
            return;
        }
        self.handle_keyboard(raw_input);
        #[cfg(target_os = "linux")]
        self.poll_gamepads();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_navigation();
        self.apply_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Rotation");
            ui.add_space(8.0);
            for axis in 0..AXES.len() {
                self.show_axis(ui, axis);
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                for id in self.widgets.orders {
                    self.show_button(ui, id);
                }
            });
            ui.horizontal(|ui| {
                self.show_button(ui, self.widgets.matrix);
                self.show_button(ui, self.widgets.quaternion);
            });

            ui.add_space(12.0);
            ui.label(self.status_line());
            ui.small("Arrows move, Tab leaves a field, Enter applies, Esc reverts or leaves");
        });

        #[cfg(target_os = "linux")]
        if !self.gamepads.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        }

        // Pointer clicks raise events after this frame's navigation pass
        if self.apply_events() {
            ctx.request_repaint();
        }
    }
}
