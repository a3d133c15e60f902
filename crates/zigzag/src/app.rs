use eframe::egui;
use std::time::Instant;

use crate::config::Config;
use crate::progress::Progress;
use crate::tracker::PathTracker;
use crate::tracker::geometry::{BoardRect, GridPos};
use crate::tracker::types::{Outcome, Phase, Point};

/// Share of the smaller window dimension taken by the board.
const BOARD_FRACTION: f32 = 0.8;
/// Pointer moves shorter than this (in screen points) are not forwarded.
const MOVE_THRESHOLD: f32 = 1.0;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(24, 26, 33);
const BOARD: egui::Color32 = egui::Color32::from_rgb(34, 37, 47);
const DOT: egui::Color32 = egui::Color32::from_rgb(120, 130, 160);
const DOT_CONNECTED: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);
const DOT_CURRENT: egui::Color32 = egui::Color32::from_rgb(240, 190, 70);
const DOT_NEAR: egui::Color32 = egui::Color32::from_rgb(240, 130, 50);
const DOT_ERROR: egui::Color32 = egui::Color32::from_rgb(230, 70, 70);
const LINE: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);
const LIVE_LINE: egui::Color32 = egui::Color32::from_rgba_premultiplied(80, 200, 120, 140);
const TEXT: egui::Color32 = egui::Color32::from_rgb(230, 230, 235);
const TEXT_DIM: egui::Color32 = egui::Color32::from_rgb(140, 145, 160);

struct ZigZagApp {
    tracker: PathTracker,
    board: BoardRect,
    /// Last screen position handed to the tracker during a drag.
    last_forwarded: Option<egui::Pos2>,
}

impl ZigZagApp {
    fn new(tracker: PathTracker) -> Self {
        Self {
            tracker,
            board: BoardRect::new(0.0, 0.0, 0.0, 0.0),
            last_forwarded: None,
        }
    }

    fn to_grid(&self, pos: egui::Pos2) -> Option<GridPos> {
        self.board.to_grid(pos.x as f64, pos.y as f64)
    }

    fn to_screen(&self, pos: GridPos) -> egui::Pos2 {
        let (x, y) = self.board.to_screen(pos);
        egui::pos2(x as f32, y as f32)
    }

    fn handle_pointer(&mut self, ctx: &egui::Context) {
        let (pressed, down, released, pointer_pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        let now = Instant::now();

        let target = pointer_pos.and_then(|screen| Some((screen, self.to_grid(screen)?)));
        if let Some((screen, pos)) = target {
            if pressed {
                self.last_forwarded = Some(screen);
                let outcome = self.tracker.pointer_down(pos, now);
                self.record(outcome);
            } else if down && self.tracker.is_dragging() {
                let moved = self
                    .last_forwarded
                    .is_none_or(|last| last.distance(screen) >= MOVE_THRESHOLD);
                if moved {
                    self.last_forwarded = Some(screen);
                    let outcome = self.tracker.pointer_move(pos, now);
                    self.record(outcome);
                }
            }
        }

        // A tap presses and releases in the same frame; the release comes second.
        if released {
            self.last_forwarded = None;
            let outcome = self.tracker.pointer_up(now);
            self.record(outcome);
        }
    }

    /// Persist level changes. A failed write is logged; play goes on.
    fn record(&self, outcome: Outcome) {
        if !outcome.changes_level() {
            return;
        }
        if let Err(e) = self.tracker.progress().save() {
            tracing::warn!("could not save progress: {e:#}");
        }
    }

    fn layout_board(&mut self, rect: egui::Rect) -> egui::Rect {
        let side = rect.width().min(rect.height()) * BOARD_FRACTION;
        let board = egui::Rect::from_center_size(
            rect.center() + egui::vec2(0.0, rect.height() * 0.04),
            egui::vec2(side, side),
        );
        self.board = BoardRect::new(
            board.left() as f64,
            board.top() as f64,
            board.width() as f64,
            board.height() as f64,
        );
        board
    }

    fn dot_color(&self, point: &Point) -> egui::Color32 {
        if point.is_error {
            DOT_ERROR
        } else if point.number <= self.tracker.path().len() as u32 {
            DOT_CONNECTED
        } else if self.tracker.is_near(point.number) {
            DOT_NEAR
        } else if point.number == self.tracker.current_point() {
            DOT_CURRENT
        } else {
            DOT
        }
    }

    fn draw_board(&self, ui: &egui::Ui, board: egui::Rect) {
        let painter = ui.painter();
        let cell = self.board.cell_width() as f32;
        painter.rect_filled(board, cell * 0.2, BOARD);

        let stroke = egui::Stroke::new(cell * 0.08, LINE);
        for pair in self.tracker.path().windows(2) {
            painter.line_segment(
                [
                    self.to_screen(pair[0].center()),
                    self.to_screen(pair[1].center()),
                ],
                stroke,
            );
        }

        if self.tracker.is_dragging() {
            if let (Some(from), Some(to)) = (self.tracker.last_accepted(), self.tracker.pointer()) {
                painter.line_segment(
                    [self.to_screen(from.center()), self.to_screen(to)],
                    egui::Stroke::new(cell * 0.06, LIVE_LINE),
                );
            }
        }

        let radius = cell * 0.22;
        for point in self.tracker.points() {
            let center = self.to_screen(point.center());
            let color = self.dot_color(point);
            painter.circle_filled(center, radius, color);
            if point.number == self.tracker.current_point() && !point.is_error {
                painter.circle_stroke(center, radius * 1.35, egui::Stroke::new(2.0, color));
            }
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                point.number,
                egui::FontId::proportional(radius * 1.1),
                BACKGROUND,
            );
        }
    }

    fn draw_header(&self, ui: &egui::Ui, rect: egui::Rect, board: egui::Rect) {
        let painter = ui.painter();
        let top = (board.top() - rect.top()) / 2.0 + rect.top();
        let size = (board.width() / 18.0).clamp(14.0, 36.0);

        painter.text(
            egui::pos2(board.left(), top),
            egui::Align2::LEFT_CENTER,
            format!("Level {}", self.tracker.level()),
            egui::FontId::proportional(size),
            TEXT,
        );
        painter.text(
            egui::pos2(board.right(), top),
            egui::Align2::RIGHT_CENTER,
            format!("Best {}", self.tracker.best_level()),
            egui::FontId::proportional(size * 0.75),
            TEXT_DIM,
        );

        let status = match self.tracker.phase() {
            Phase::Failed => Some(("Back to level 1", DOT_ERROR)),
            Phase::Completed => Some(("Nice!", DOT_CONNECTED)),
            Phase::Idle if self.tracker.path().is_empty() => Some(("Start at 1", TEXT_DIM)),
            _ => None,
        };
        if let Some((text, color)) = status {
            painter.text(
                egui::pos2(board.center().x, top),
                egui::Align2::CENTER_CENTER,
                text,
                egui::FontId::proportional(size * 0.7),
                color,
            );
        }
    }
}

impl eframe::App for ZigZagApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if let Some(kind) = self.tracker.tick(now) {
            tracing::debug!(?kind, "transition fired");
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        self.handle_pointer(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(BACKGROUND).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let board = self.layout_board(rect);
                self.draw_board(ui, board);
                self.draw_header(ui, rect, board);
            });

        if self.tracker.is_dragging() {
            ctx.request_repaint();
        } else if let Some(pending) = self.tracker.pending() {
            ctx.request_repaint_after(pending.due.saturating_duration_since(now));
        }
    }
}

pub fn run(windowed: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let progress = Progress::load_or_default();
    let tracker = PathTracker::new(config.tracker_config(), progress);

    tracing::info!(
        level = progress.current_level,
        best_level = progress.best_level,
        "starting zigzag v{}",
        env!("CARGO_PKG_VERSION")
    );

    let title = "ZigZag";
    let viewport = if windowed || config.windowed() {
        egui::ViewportBuilder::default()
            .with_inner_size([720.0, 800.0])
            .with_title(title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(ZigZagApp::new(tracker)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
