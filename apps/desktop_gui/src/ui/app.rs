use eframe::egui;
use shared::{ChangeHint, ListUpdate, Row, RowListModel, RowListView, Settings};

use crate::{
    controller::{events::UiEvent, orchestration::dispatch_ui_event},
    ui::motion::RowMotion,
};

const SCREEN_BG: egui::Color32 = egui::Color32::from_rgb(242, 242, 247);
const TABLE_BG: egui::Color32 = egui::Color32::WHITE;
const SEPARATOR: egui::Color32 = egui::Color32::from_rgb(216, 216, 222);
const CHECKMARK: egui::Color32 = egui::Color32::from_rgb(0, 122, 255);
const ROW_HEIGHT: f32 = 44.0;
const ROW_TEXT_INSET: f32 = 16.0;

pub struct MixerTableApp {
    title: String,
    model: RowListModel,
    rows: Vec<Row>,
    motion: RowMotion,
    clock: f64,
    pending: Vec<UiEvent>,
    status: String,
}

impl MixerTableApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        startup_status: Option<String>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut app = Self {
            title: settings.window_title.clone(),
            model: RowListModel::from_settings(&settings),
            rows: Vec::new(),
            motion: RowMotion::new(settings.move_animation_ms as f64 / 1000.0),
            clock: cc.egui_ctx.input(|i| i.time),
            pending: Vec::new(),
            status: startup_status.unwrap_or_default(),
        };
        let initial = app.model.snapshot(ChangeHint::FullReload);
        app.apply(&initial);
        app
    }

    fn process_ui_events(&mut self) {
        for event in std::mem::take(&mut self.pending) {
            if let Some(update) = dispatch_ui_event(&mut self.model, event, &mut self.status) {
                self.apply(&update);
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::new()
                    .fill(SCREEN_BG)
                    .inner_margin(egui::Margin::symmetric(20, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(&self.title);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Shuffle").clicked() {
                            self.pending.push(UiEvent::ShuffleRequested);
                        }
                    });
                });
                ui.label(
                    egui::RichText::new(self.status_line())
                        .small()
                        .weak(),
                );
            });
    }

    fn status_line(&self) -> String {
        let summary = format!("{} of {} checked", self.model.checked_count(), self.model.len());
        if self.status.is_empty() {
            summary
        } else {
            format!("{summary} · {}", self.status)
        }
    }

    fn show_table(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(SCREEN_BG).inner_margin(egui::Margin {
                left: 20,
                right: 20,
                top: 30,
                bottom: 0,
            }))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(TABLE_BG)
                    .corner_radius(10)
                    .show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .auto_shrink([false, false])
                            .show(ui, |ui| self.show_rows(ui));
                    });
            });
    }

    fn show_rows(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width();
        let (area, _) = ui.allocate_exact_size(
            egui::vec2(width, ROW_HEIGHT * self.rows.len() as f32),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(area);
        let text_color = ui.visuals().text_color();
        let now = self.clock;

        for (position, row) in self.rows.iter().enumerate() {
            let slot = position as f32 + self.motion.offset(row.title, position, now);
            let rect = egui::Rect::from_min_size(
                area.min + egui::vec2(0.0, slot * ROW_HEIGHT),
                egui::vec2(width, ROW_HEIGHT),
            );
            let response = ui.interact(rect, ui.id().with(("row", row.title)), egui::Sense::click());
            let alpha = self.motion.opacity(row.title, now);

            let fill = if response.hovered() {
                ui.visuals().faint_bg_color
            } else {
                TABLE_BG
            };
            painter.rect_filled(rect, egui::CornerRadius::ZERO, fill);
            painter.text(
                rect.left_center() + egui::vec2(ROW_TEXT_INSET, 0.0),
                egui::Align2::LEFT_CENTER,
                row.title.to_string(),
                egui::FontId::proportional(17.0),
                text_color.gamma_multiply(alpha),
            );
            if row.checked {
                painter.text(
                    rect.right_center() - egui::vec2(ROW_TEXT_INSET, 0.0),
                    egui::Align2::RIGHT_CENTER,
                    "✔",
                    egui::FontId::proportional(17.0),
                    CHECKMARK.gamma_multiply(alpha),
                );
            }
            if position + 1 < self.rows.len() {
                painter.hline(
                    (rect.left() + ROW_TEXT_INSET)..=rect.right(),
                    rect.bottom(),
                    egui::Stroke::new(0.5, SEPARATOR),
                );
            }

            if response.clicked() {
                self.pending.push(UiEvent::RowSelected { position });
            }
        }
    }
}

impl RowListView for MixerTableApp {
    fn apply(&mut self, update: &ListUpdate) {
        self.motion.begin(update, self.clock);
        self.rows.clone_from(&update.rows);
    }
}

impl eframe::App for MixerTableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clock = ctx.input(|i| i.time);

        self.process_ui_events();

        self.show_top_bar(ctx);
        self.show_table(ctx);

        if !self.pending.is_empty() || self.motion.is_animating(self.clock) {
            ctx.request_repaint();
        }
    }
}
