use std::time::{Duration, Instant};

/// How long a notification stays up unless dismissed earlier.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorOrigin {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
}

impl Default for AnchorOrigin {
    fn default() -> Self {
        Self {
            vertical: VerticalAnchor::Bottom,
            horizontal: HorizontalAnchor::Center,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub anchor: AnchorOrigin,
    pub visible: bool,
    pub shown_at: Instant,
}

/// Holds at most one notification; showing a new one overwrites the old.
#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn show(&mut self, severity: Severity, message: impl Into<String>) {
        self.show_at(severity, message, AnchorOrigin::default(), Instant::now());
    }

    pub fn show_at(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        anchor: AnchorOrigin,
        now: Instant,
    ) {
        self.current = Some(Notification {
            severity,
            message: message.into(),
            anchor,
            visible: true,
            shown_at: now,
        });
    }

    /// The notification currently on screen, if any.
    pub fn visible(&self) -> Option<&Notification> {
        self.current.as_ref().filter(|notification| notification.visible)
    }

    /// Last notification shown, visible or not.
    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        if let Some(notification) = self.current.as_mut() {
            notification.visible = false;
        }
    }

    /// Hides the notification once it has been up for [`NOTIFICATION_DURATION`].
    pub fn expire(&mut self, now: Instant) {
        if let Some(notification) = self.current.as_mut() {
            if notification.visible
                && now.saturating_duration_since(notification.shown_at) >= NOTIFICATION_DURATION
            {
                notification.visible = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_notification_replaces_older() {
        let mut slot = NotificationSlot::default();
        slot.show(Severity::Info, "first");
        slot.show(Severity::Error, "second");

        let visible = slot.visible().expect("visible");
        assert_eq!(visible.severity, Severity::Error);
        assert_eq!(visible.message, "second");
        assert_eq!(visible.anchor, AnchorOrigin::default());
    }

    #[test]
    fn dismiss_hides_but_keeps_last_message() {
        let mut slot = NotificationSlot::default();
        slot.show(Severity::Success, "已发送");
        slot.dismiss();
        assert!(slot.visible().is_none());
        assert_eq!(slot.last().map(|n| n.message.as_str()), Some("已发送"));
    }

    #[test]
    fn notification_expires_after_eight_seconds() {
        let mut slot = NotificationSlot::default();
        let shown_at = Instant::now();
        slot.show_at(
            Severity::Warning,
            "slow down",
            AnchorOrigin {
                vertical: VerticalAnchor::Top,
                horizontal: HorizontalAnchor::Right,
            },
            shown_at,
        );

        slot.expire(shown_at + Duration::from_secs(7));
        assert!(slot.visible().is_some());

        slot.expire(shown_at + NOTIFICATION_DURATION);
        assert!(slot.visible().is_none());
    }
}
