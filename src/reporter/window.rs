// Interactive eframe window drawing the bar chart
use crate::config::ChartConfig;
use crate::model::RenderError;
use crate::reporter::chart::{format_count, y_ticks, ChartRenderer, ChartSpec};

use eframe::egui::{
    self, epaint::TextShape, Align2, Color32, FontData, FontDefinitions, FontFamily, FontId, Pos2,
    Rect, Sense, Stroke, Vec2, ViewportBuilder,
};
use std::f32::consts::FRAC_PI_4;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

const LABEL_FONT: &str = "chart-label-font";
const TICK_TARGET: u64 = 6;
const MARGIN_LEFT: f32 = 90.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 130.0;
const BAR_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
const BAR_HOVER_COLOR: Color32 = Color32::from_rgb(255, 127, 14);

pub struct WindowRenderer {
    config: ChartConfig,
}

impl WindowRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }
}

impl ChartRenderer for WindowRenderer {
    /// Blocks until the window is closed.
    fn render(&self, chart: &ChartSpec) -> Result<(), RenderError> {
        let options = eframe::NativeOptions {
            viewport: ViewportBuilder::default()
                .with_title(chart.title.clone())
                .with_inner_size([self.config.width, self.config.height]),
            ..Default::default()
        };

        let title = chart.title.clone();
        let chart = chart.clone();
        let font_path = self.config.font_path.clone();

        info!("Opening chart window with {} bars", chart.bars.len());
        eframe::run_native(
            &title,
            options,
            Box::new(move |cc| {
                if let Some(path) = font_path.as_deref() {
                    install_font(&cc.egui_ctx, path);
                }
                Ok(Box::new(ChartApp { chart }))
            }),
        )
        .map_err(|e| RenderError::WindowError(e.to_string()))
    }
}

/// Puts the font first in both families so CJK glyphs resolve; built-ins stay as fallback.
fn install_font(ctx: &egui::Context, path: &Path) {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!("Failed to load chart font {}: {}", path.display(), e);
            return;
        }
    };

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(LABEL_FONT.to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, LABEL_FONT.to_owned());
    }
    ctx.set_fonts(fonts);
    info!("Loaded chart font {}", path.display());
}

struct ChartApp {
    chart: ChartSpec,
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.vertical_centered(|ui| ui.heading(&self.chart.title));
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
            self.draw(&painter, response.rect, response.hover_pos());
        });
    }
}

impl ChartApp {
    fn draw(&self, painter: &egui::Painter, rect: Rect, hover: Option<Pos2>) {
        let text_color = Color32::from_gray(200);
        let axis_stroke = Stroke::new(1.0, Color32::from_gray(160));
        let grid_stroke = Stroke::new(0.5, Color32::from_gray(70));
        let tick_font = FontId::proportional(12.0);

        let plot = Rect::from_min_max(
            Pos2::new(rect.left() + MARGIN_LEFT, rect.top() + MARGIN_TOP),
            Pos2::new(rect.right() - MARGIN_RIGHT, rect.bottom() - MARGIN_BOTTOM),
        );
        if plot.width() <= 0.0 || plot.height() <= 0.0 {
            return;
        }

        let ticks = y_ticks(self.chart.max_value(), TICK_TARGET);
        let top = ticks.last().copied().unwrap_or(1).max(1) as f32;
        let y_of = |v: u64| plot.bottom() - plot.height() * (v as f32 / top);

        for &tick in &ticks {
            let y = y_of(tick);
            painter.line_segment([Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)], grid_stroke);
            painter.text(
                Pos2::new(plot.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                format_count(tick),
                tick_font.clone(),
                text_color,
            );
        }

        painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis_stroke);
        painter.line_segment([plot.left_bottom(), plot.left_top()], axis_stroke);

        if !self.chart.bars.is_empty() {
            let slot = plot.width() / self.chart.bars.len() as f32;
            let bar_width = slot * 0.8;

            for (i, bar) in self.chart.bars.iter().enumerate() {
                let center = plot.left() + slot * (i as f32 + 0.5);
                let bar_rect = Rect::from_min_max(
                    Pos2::new(center - bar_width / 2.0, y_of(bar.value)),
                    Pos2::new(center + bar_width / 2.0, plot.bottom()),
                );
                let hovered = hover.is_some_and(|p| {
                    p.x >= bar_rect.left() && p.x <= bar_rect.right() && plot.contains(p)
                });

                painter.rect_filled(
                    bar_rect,
                    0.0,
                    if hovered { BAR_HOVER_COLOR } else { BAR_COLOR },
                );
                if hovered {
                    painter.text(
                        bar_rect.center_top() - Vec2::new(0.0, 4.0),
                        Align2::CENTER_BOTTOM,
                        format_count(bar.value),
                        tick_font.clone(),
                        Color32::WHITE,
                    );
                }

                // Rotated 45°, right end anchored under the bar.
                let galley = painter.layout_no_wrap(bar.label.clone(), tick_font.clone(), text_color);
                let width = galley.size().x;
                let anchor = Pos2::new(center, plot.bottom() + 6.0);
                let start = anchor + Vec2::new(-width * FRAC_PI_4.cos(), width * FRAC_PI_4.sin());
                painter.add(TextShape::new(start, galley, text_color).with_angle(-FRAC_PI_4));
            }
        }

        painter.text(
            Pos2::new(plot.center().x, rect.bottom() - 4.0),
            Align2::CENTER_BOTTOM,
            &self.chart.x_label,
            FontId::proportional(14.0),
            text_color,
        );

        let y_galley = painter.layout_no_wrap(
            self.chart.y_label.clone(),
            FontId::proportional(14.0),
            text_color,
        );
        let y_start = Pos2::new(rect.left() + 4.0, plot.center().y + y_galley.size().x / 2.0);
        painter.add(TextShape::new(y_start, y_galley, text_color).with_angle(-std::f32::consts::FRAC_PI_2));
    }
}
