//! Runtime bridge between UI command queue and backend event intake.

use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use client_core::{
    execute, ClientConfig, CountdownTicker, FormEvent, HttpRecruitApi, RecruitApi, COUNTDOWN_TICK,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    config: &ClientConfig,
) -> io::Result<JoinHandle<()>> {
    tracing::info!(base_url = config.base_url(), "starting backend worker");
    let api: Arc<dyn RecruitApi> = Arc::new(HttpRecruitApi::new(config));
    launch_with_api(api, COUNTDOWN_TICK, cmd_rx, ui_tx)
}

pub fn launch_with_api(
    api: Arc<dyn RecruitApi>,
    tick: Duration,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("recruit-backend".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    tracing::error!("failed to build backend runtime: {err}");
                    let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                        "failed to build backend runtime: {err}"
                    )));
                    return;
                }
            };

            runtime.block_on(async move {
                let _ = ui_tx.try_send(UiEvent::BackendReady);
                let mut ticker = CountdownTicker::new(tick);

                while let Ok(cmd) = cmd_rx.recv() {
                    match cmd {
                        BackendCommand::Execute(request) => {
                            let api = Arc::clone(&api);
                            let ui_tx = ui_tx.clone();
                            tokio::spawn(async move {
                                let event = execute(api.as_ref(), request).await;
                                if let Err(err) = ui_tx.try_send(UiEvent::Form(event)) {
                                    tracing::warn!("dropping backend result: {err}");
                                }
                            });
                        }
                        BackendCommand::StartCountdown => {
                            let tick_tx = ui_tx.clone();
                            let started = ticker.start(move || {
                                !matches!(
                                    tick_tx.try_send(UiEvent::Form(FormEvent::CountdownTick)),
                                    Err(TrySendError::Disconnected(_))
                                )
                            });
                            if let Err(err) = started {
                                tracing::warn!("countdown start refused: {err}");
                            }
                        }
                        BackendCommand::StopCountdown => {
                            ticker.stop();
                        }
                    }
                }

                ticker.stop();
                tracing::info!("backend command queue closed; worker exiting");
            });
        })
}
