use std::time::Duration;

use eframe::egui;
use egui::{RichText, Stroke};
use tracing::info;

use crate::api::CountryFetcher;
use crate::config::PickerConfig;
use crate::picker::{Phase, Picker, StatusLine};
use crate::theme::{self, Palette};
use crate::worker::{FetchTask, TaskPoll};

pub struct App {
    picker: Picker,
    fetch_task: FetchTask,
    palette: Palette,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: PickerConfig,
        palette: Palette,
        initial_country: Option<String>,
    ) -> Self {
        theme::apply_theme(&cc.egui_ctx, &palette);

        let ctx = cc.egui_ctx.clone();
        let fetch_task = FetchTask::spawn(
            move || {
                let fetcher = CountryFetcher::new(&config)?;
                fetcher.fetch_countries()
            },
            move || ctx.request_repaint(),
        );
        info!("Started loading countries");

        Self {
            picker: Picker::new(initial_country),
            fetch_task,
            palette,
        }
    }

    fn poll_loading(&mut self, ctx: &egui::Context) {
        match self.fetch_task.poll() {
            TaskPoll::Ready(outcome) => self.picker.apply_outcome(outcome),
            TaskPoll::Pending if !self.fetch_task.is_finished() => {
                // also catches a worker that died before waking us
                ctx.request_repaint_after(Duration::from_millis(200));
            }
            TaskPoll::Pending => {}
        }
    }

    fn show_country_combo(&mut self, ui: &mut egui::Ui) {
        let mut choice: Option<String> = None;
        let has_countries = self.picker.phase() == Phase::Populated;
        let selected_text = self.picker.selected().unwrap_or("Select a country").to_string();

        ui.add_enabled_ui(has_countries, |ui| {
            egui::ComboBox::from_id_salt("country_combo")
                .width(ui.available_width())
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for country in self.picker.countries() {
                        let is_selected = self.picker.selected() == Some(country.as_str());
                        if ui.selectable_label(is_selected, country).clicked() {
                            choice = Some(country.clone());
                        }
                    }
                });
        });

        if let Some(country) = choice {
            self.picker.select(&country);
        }
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        match self.picker.status() {
            StatusLine::Loading => {
                ui.label(RichText::new("Loading countries...").color(self.palette.label));
            }
            StatusLine::Selected(country) => {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Selected:").color(self.palette.label));
                    ui.label(
                        RichText::new(country)
                            .color(self.palette.country)
                            .strong(),
                    );
                });
            }
            StatusLine::Error(message) => {
                ui.label(RichText::new(format!("Error: {}", message)).color(self.palette.error));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loading(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(self.palette.background)
                    .inner_margin(egui::Margin::same(20)),
            )
            .show(ctx, |ui| {
                egui::Frame::group(ui.style())
                    .stroke(Stroke::new(1.0, self.palette.label))
                    .inner_margin(egui::Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new("Country Picker").strong());
                        ui.add_space(6.0);
                        self.show_country_combo(ui);
                        ui.add_space(6.0);
                        self.show_status(ui);
                    });
            });
    }
}
