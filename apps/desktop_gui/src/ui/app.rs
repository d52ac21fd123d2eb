use std::time::Duration;

use chrono::Local;
use client_core::{presentation::ProductCard, Transition};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ProductId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::intake::{apply_ui_event, CatalogView, Intake};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{reduce, ModalState, ScreenAction};

const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(0x80, 0xD9, 0xE1);
const SCREEN_FILL: egui::Color32 = egui::Color32::from_rgb(0xF8, 0xF8, 0xF8);
const CARD_BORDER: egui::Color32 = egui::Color32::from_rgb(0x52, 0x56, 0x59);
const TITLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x33, 0x33, 0x33);
const MUTED_COLOR: egui::Color32 = egui::Color32::from_rgb(0x77, 0x77, 0x77);
const STAR_COLOR: egui::Color32 = egui::Color32::from_rgb(0xF8, 0xA5, 0x0B);
const CART_BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(0xFD, 0x00, 0x02);
const CLOSE_BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(0xD1, 0xD1, 0xD1);
const PLACEHOLDER_FILL: egui::Color32 = egui::Color32::from_gray(230);

const CARD_IMAGE_SIZE: egui::Vec2 = egui::vec2(120.0, 150.0);
const MODAL_IMAGE_SIZE: egui::Vec2 = egui::vec2(120.0, 120.0);

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub title_max_len: usize,
}

pub struct CatalogApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    view: CatalogView,
    modal: ModalState,
    title_max_len: usize,
}

impl CatalogApp {
    /// Builds the screen and queues the one catalog fetch it performs.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let app = Self {
            cmd_tx,
            ui_rx,
            view: CatalogView::default(),
            modal: ModalState::Closed,
            title_max_len: startup.title_max_len,
        };
        dispatch_backend_command(&app.cmd_tx, BackendCommand::FetchCatalog);
        app
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match apply_ui_event(&mut self.view, event) {
                Intake::Idle => {}
                Intake::Dispatch(commands) => {
                    for cmd in commands {
                        dispatch_backend_command(&self.cmd_tx, cmd);
                    }
                }
                Intake::UploadTexture { product_id, image } => {
                    self.view.images.store(ctx, product_id, image);
                }
            }
        }
    }

    fn apply(&mut self, action: ScreenAction) {
        match reduce(&mut self.modal, &mut self.view.store, action) {
            Some(Transition::Applied { id, quantity }) => {
                tracing::debug!(product_id = id.0, quantity, ?action, "store updated");
            }
            Some(Transition::Ignored(diagnostic)) => {
                tracing::debug!(?action, "store transition ignored: {diagnostic}");
            }
            Some(Transition::Replaced { .. }) | None => {}
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .resizable(false)
            .exact_height(50.0)
            .frame(egui::Frame::new().fill(HEADER_FILL))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Shopping")
                            .size(18.0)
                            .strong()
                            .color(egui::Color32::BLACK),
                    );
                });
            });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let cart_items: u64 = self
                        .view
                        .store
                        .cart_lines()
                        .map(|p| u64::from(p.quantity()))
                        .sum();
                    ui.label(format!(
                        "Cart: {cart_items} item(s) · Rs. {:.2}",
                        self.view.store.cart_total()
                    ));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(fetched_at) = self.view.fetched_at {
                            ui.weak(format!(
                                "{} products · updated {}",
                                self.view.store.len(),
                                fetched_at.with_timezone(&Local).format("%H:%M:%S")
                            ));
                        } else if !self.view.status.is_empty() {
                            ui.weak(&self.view.status);
                        }
                    });
                });
            });
    }

    fn show_catalog(&self, ctx: &egui::Context) -> Option<ScreenAction> {
        let cards: Vec<ProductCard> = self
            .view
            .store
            .products()
            .iter()
            .map(|p| ProductCard::from_product(p, self.title_max_len))
            .collect();

        let mut action = None;
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(SCREEN_FILL)
                    .inner_margin(egui::Margin::symmetric(10, 8)),
            )
            .show(ctx, |ui| {
                if cards.is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.weak("No products");
                    });
                    return;
                }
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for card in &cards {
                            if self.show_card(ui, card).clicked() {
                                action = Some(ScreenAction::OpenProduct(card.id));
                            }
                            ui.add_space(8.0);
                        }
                    });
            });
        action
    }

    fn show_card(&self, ui: &mut egui::Ui, card: &ProductCard) -> egui::Response {
        let frame = egui::Frame::new()
            .fill(egui::Color32::WHITE)
            .stroke(egui::Stroke::new(1.0, CARD_BORDER))
            .corner_radius(egui::CornerRadius::same(10))
            .inner_margin(egui::Margin::same(10));
        let inner = frame.show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                self.show_thumbnail(ui, card.id, CARD_IMAGE_SIZE);
                ui.add_space(35.0);
                ui.vertical(|ui| {
                    ui.spacing_mut().item_spacing.y = 8.0;
                    ui.label(
                        egui::RichText::new(&card.title)
                            .size(16.0)
                            .strong()
                            .color(TITLE_COLOR),
                    );
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(card.stars.to_string())
                                .size(22.0)
                                .color(STAR_COLOR),
                        );
                        ui.label(
                            egui::RichText::new(card.rating_count.to_string())
                                .size(15.0)
                                .color(MUTED_COLOR),
                        );
                    });
                    ui.label(egui::RichText::new(&card.price).size(18.0).strong());
                    ui.label(
                        egui::RichText::new(&card.category)
                            .size(12.0)
                            .color(MUTED_COLOR),
                    );
                });
            });
        });
        inner
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
    }

    fn show_thumbnail(&self, ui: &mut egui::Ui, id: ProductId, size: egui::Vec2) {
        match self.view.images.texture(id) {
            Some(texture) => {
                ui.add(egui::Image::new(texture).fit_to_exact_size(size));
            }
            None => {
                let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                ui.painter().rect_filled(rect, 5.0, PLACEHOLDER_FILL);
            }
        }
    }

    fn show_modal(&self, ctx: &egui::Context) -> Option<ScreenAction> {
        let id = self.modal.selected()?;
        // Catalog was replaced underneath the open modal.
        let Some(product) = self.view.store.get(id) else {
            return Some(ScreenAction::Close);
        };

        let mut action = None;
        let response = egui::Modal::new(egui::Id::new("product_modal"))
            .frame(
                egui::Frame::popup(&ctx.style())
                    .fill(egui::Color32::WHITE)
                    .corner_radius(egui::CornerRadius::same(20))
                    .inner_margin(egui::Margin::same(20)),
            )
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                ui.vertical_centered(|ui| {
                    self.show_thumbnail(ui, product.id, MODAL_IMAGE_SIZE);
                    ui.add_space(15.0);
                    ui.label(
                        egui::RichText::new(&product.description)
                            .size(15.0)
                            .strong()
                            .color(egui::Color32::BLACK),
                    );
                    ui.add_space(20.0);

                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 15.0;
                        if ui.button("+").clicked() {
                            action = Some(ScreenAction::Increment);
                        }
                        ui.label(
                            egui::RichText::new(product.quantity().to_string())
                                .size(16.0)
                                .strong(),
                        );
                        if ui.button("-").clicked() {
                            action = Some(ScreenAction::Decrement);
                        }
                    });
                    ui.add_space(20.0);

                    ui.horizontal(|ui| {
                        let add = egui::Button::new(
                            egui::RichText::new("Add To Cart")
                                .size(16.0)
                                .color(egui::Color32::WHITE),
                        )
                        .fill(CART_BUTTON_FILL)
                        .min_size(egui::vec2(0.0, 50.0));
                        if ui.add(add).clicked() {
                            action = Some(ScreenAction::AddToCart);
                        }

                        let close = egui::Button::new(
                            egui::RichText::new("Close")
                                .size(16.0)
                                .strong()
                                .color(egui::Color32::BLACK),
                        )
                        .fill(CLOSE_BUTTON_FILL)
                        .min_size(egui::vec2(0.0, 50.0));
                        if ui.add(close).clicked() {
                            action = Some(ScreenAction::Close);
                        }
                    });
                });
            });
        // Escape closes; backdrop clicks are ignored.
        if response.should_close() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            action = Some(ScreenAction::Close);
        }
        action
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);

        self.show_header(ctx);
        self.show_status_bar(ctx);
        let list_action = self.show_catalog(ctx);
        let modal_action = self.show_modal(ctx);

        for action in [list_action, modal_action].into_iter().flatten() {
            self.apply(action);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
