//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::CatalogSource;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::images::decode_preview_image;

/// Spawns the backend worker thread. It owns a tokio runtime and serves
/// commands until the UI side drops its sender.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn CatalogSource>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        forward_event(&ui_tx, UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let error = UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                );
                tracing::error!("failed to build backend runtime: {err}");
                forward_event(&ui_tx, UiEvent::CatalogFetchFailed(error));
                return;
            }
        };

        runtime.block_on(serve_commands(cmd_rx, ui_tx, source));
    })
}

/// Hands `event` to the UI queue without blocking the worker. Returns false
/// when the event was dropped.
fn forward_event(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    let event_name = event.name();
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(event = event_name, "ui event queue is full; dropping event");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(event = event_name, "ui event queue disconnected; dropping event");
            false
        }
    }
}

async fn serve_commands(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn CatalogSource>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::FetchCatalog => {
                tracing::info!("backend: fetch_catalog");
                let event = match source.fetch_catalog().await {
                    Ok(snapshot) => UiEvent::CatalogLoaded(snapshot),
                    Err(err) => {
                        let error =
                            UiError::from_catalog_error(UiErrorContext::FetchCatalog, &err);
                        tracing::error!(
                            category = ?error.category(),
                            "backend: fetch_catalog failed: {err}"
                        );
                        UiEvent::CatalogFetchFailed(error)
                    }
                };
                forward_event(&ui_tx, event);
            }
            BackendCommand::FetchImage { product_id, url } => {
                let source = Arc::clone(&source);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let decoded = match source.fetch_image(&url).await {
                        Ok(bytes) => decode_preview_image(&bytes)
                            .map_err(|err| UiError::from_message(UiErrorContext::FetchImage, err)),
                        Err(err) => Err(UiError::from_catalog_error(
                            UiErrorContext::FetchImage,
                            &err,
                        )),
                    };
                    let event = match decoded {
                        Ok(image) => UiEvent::ImageLoaded { product_id, image },
                        Err(error) => {
                            tracing::warn!(
                                product_id = product_id.0,
                                url = %url,
                                "backend: fetch_image failed: {}",
                                error.message()
                            );
                            UiEvent::ImageFailed { product_id, error }
                        }
                    };
                    forward_event(&ui_tx, event);
                });
            }
        }
    }
    tracing::info!("backend: command queue closed, worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crossbeam_channel::bounded;
    use shared::{
        domain::{Product, ProductId, Rating},
        error::CatalogError,
        protocol::CatalogSnapshot,
    };
    use std::time::Duration;

    struct FixedSource {
        fail: bool,
    }

    #[async_trait]
    impl CatalogSource for FixedSource {
        async fn fetch_catalog(&self) -> Result<CatalogSnapshot, CatalogError> {
            if self.fail {
                return Err(CatalogError::Transport("connection refused".to_string()));
            }
            Ok(CatalogSnapshot {
                products: vec![Product {
                    id: ProductId(1),
                    title: "Shirt".to_string(),
                    price: 10.0,
                    description: String::new(),
                    category: "men".to_string(),
                    image: "u".to_string(),
                    rating: Rating {
                        rate: 4.1,
                        count: 20,
                    },
                    quantity: None,
                }],
                rejected: Vec::new(),
                fetched_at: chrono::Utc::now(),
            })
        }

        async fn fetch_image(&self, _url: &str) -> Result<Vec<u8>, CatalogError> {
            Ok(b"not an image".to_vec())
        }
    }

    fn next_non_info(ui_rx: &Receiver<UiEvent>) -> UiEvent {
        loop {
            match ui_rx.recv_timeout(Duration::from_secs(5)).expect("ui event") {
                UiEvent::Info(_) => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn forward_event_reports_full_queue() {
        let (ui_tx, ui_rx) = bounded(1);
        assert!(forward_event(&ui_tx, UiEvent::Info("first".to_string())));
        assert!(!forward_event(&ui_tx, UiEvent::Info("second".to_string())));

        match ui_rx.try_recv().expect("queued event") {
            UiEvent::Info(message) => assert_eq!(message, "first"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(ui_rx.try_recv().is_err());
    }

    #[test]
    fn forward_event_reports_closed_queue() {
        let (ui_tx, ui_rx) = bounded::<UiEvent>(4);
        drop(ui_rx);
        assert!(!forward_event(&ui_tx, UiEvent::Info("lost".to_string())));
    }

    #[test]
    fn fetch_command_produces_catalog_event() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let worker = launch(cmd_rx, ui_tx, Arc::new(FixedSource { fail: false }));

        cmd_tx.send(BackendCommand::FetchCatalog).expect("send");
        match next_non_info(&ui_rx) {
            UiEvent::CatalogLoaded(snapshot) => assert_eq!(snapshot.products.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }

        drop(cmd_tx);
        worker.join().expect("worker exits");
    }

    #[test]
    fn failed_fetch_produces_failure_event() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let worker = launch(cmd_rx, ui_tx, Arc::new(FixedSource { fail: true }));

        cmd_tx.send(BackendCommand::FetchCatalog).expect("send");
        match next_non_info(&ui_rx) {
            UiEvent::CatalogFetchFailed(error) => {
                assert_eq!(error.context(), UiErrorContext::FetchCatalog);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        drop(cmd_tx);
        worker.join().expect("worker exits");
    }

    #[test]
    fn undecodable_image_produces_failure_event() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let _worker = launch(cmd_rx, ui_tx, Arc::new(FixedSource { fail: false }));

        cmd_tx
            .send(BackendCommand::FetchImage {
                product_id: ProductId(1),
                url: "u".to_string(),
            })
            .expect("send");
        match next_non_info(&ui_rx) {
            UiEvent::ImageFailed { product_id, error } => {
                assert_eq!(product_id, ProductId(1));
                assert_eq!(error.context(), UiErrorContext::FetchImage);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
