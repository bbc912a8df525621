//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{FormCommand, RecruitForm, Severity, NETWORK_ERROR_MESSAGE};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{BackendStatus, UiEvent};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    form: &mut RecruitForm,
    command: FormCommand,
) {
    let cmd = BackendCommand::from(command);
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(cmd)) => {
            form.command_failed(&cmd.into_form_command(), "UI command queue is full");
        }
        Err(TrySendError::Disconnected(cmd)) => {
            form.command_failed(
                &cmd.into_form_command(),
                "backend command processor disconnected",
            );
        }
    }
}

/// Drains pending backend events into the form and queues any follow-up
/// commands. Returns how many events were applied.
pub fn pump_ui_events(
    ui_rx: &Receiver<UiEvent>,
    cmd_tx: &Sender<BackendCommand>,
    form: &mut RecruitForm,
    backend: &mut BackendStatus,
) -> usize {
    let mut applied = 0;
    while let Ok(event) = ui_rx.try_recv() {
        applied += 1;
        match event {
            UiEvent::Form(event) => {
                if let Some(follow_up) = form.apply(event) {
                    dispatch_backend_command(cmd_tx, form, follow_up);
                }
            }
            UiEvent::BackendReady => {
                tracing::info!("backend worker ready");
                *backend = BackendStatus::Ready;
            }
            UiEvent::BackendFailed(reason) => {
                tracing::error!(%reason, "backend worker failed to start");
                form.notify(Severity::Error, NETWORK_ERROR_MESSAGE);
                *backend = BackendStatus::Failed(reason);
            }
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use client_core::{FormEvent, TextInput};
    use crossbeam_channel::bounded;
    use shared::protocol::ActionOutcome;

    use super::*;

    fn form_ready_to_send() -> RecruitForm {
        let mut form = RecruitForm::default();
        form.edit_text(TextInput::Name, "张三");
        form.edit_text(TextInput::Email, "zhangsan@example.com");
        form
    }

    #[test]
    fn queued_command_reaches_the_backend() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut form = form_ready_to_send();
        let command = form.request_verification_code().expect("send command");

        dispatch_backend_command(&cmd_tx, &mut form, command.clone());
        assert_eq!(
            cmd_rx.try_recv().map(BackendCommand::into_form_command),
            Ok(command)
        );
        assert!(!form.send_code_enabled());
    }

    #[test]
    fn full_queue_releases_the_send_button() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        cmd_tx
            .try_send(BackendCommand::StopCountdown)
            .expect("fill queue");
        let mut form = form_ready_to_send();
        let command = form.request_verification_code().expect("send command");

        dispatch_backend_command(&cmd_tx, &mut form, command);
        assert!(form.send_code_enabled());
        let notification = form.notification().visible().expect("error shown");
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn disconnected_backend_is_reported() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(4);
        drop(cmd_rx);
        let mut form = RecruitForm::default();
        let command = form.select_college("计算机学院").expect("lookup");

        dispatch_backend_command(&cmd_tx, &mut form, command);
        assert!(form.notification().visible().is_some());
    }

    #[test]
    fn successful_send_event_queues_countdown_start() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let mut form = form_ready_to_send();
        let mut backend = BackendStatus::default();
        form.request_verification_code().expect("send command");

        ui_tx.send(UiEvent::BackendReady).expect("ready");
        ui_tx
            .send(UiEvent::Form(FormEvent::VerificationMailSent(Ok(
                ActionOutcome::Success("已发送".to_string()),
            ))))
            .expect("result");

        assert_eq!(pump_ui_events(&ui_rx, &cmd_tx, &mut form, &mut backend), 2);
        assert_eq!(backend, BackendStatus::Ready);
        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::StartCountdown));
        assert_eq!(form.send_code_label(), "60");
    }

    #[test]
    fn backend_startup_failure_is_surfaced() {
        let (cmd_tx, _cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let mut form = RecruitForm::default();
        let mut backend = BackendStatus::default();

        ui_tx
            .send(UiEvent::BackendFailed("no runtime".to_string()))
            .expect("failure");
        pump_ui_events(&ui_rx, &cmd_tx, &mut form, &mut backend);
        assert_eq!(backend, BackendStatus::Failed("no runtime".to_string()));
        assert_eq!(backend.label(), Some("后台服务启动失败"));
        assert!(form.notification().visible().is_some());
    }
}
