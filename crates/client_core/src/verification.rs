use thiserror::Error;

pub const COUNTDOWN_SECONDS: u32 = 60;
pub const SEND_CODE_LABEL: &str = "发送验证码";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("name and email are required before requesting a code")]
    MissingPrerequisites,
    #[error("a verification request or countdown is already active")]
    AlreadyActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationPhase {
    Idle,
    Requesting,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Counting(u32),
    Expired,
    /// Tick arrived while not locked; the ticker should be stopped.
    Stray,
}

/// Send-code button state: request in flight, then a one-second countdown.
#[derive(Debug, Clone)]
pub struct VerificationLock {
    phase: VerificationPhase,
    remaining_seconds: u32,
}

impl Default for VerificationLock {
    fn default() -> Self {
        Self {
            phase: VerificationPhase::Idle,
            remaining_seconds: COUNTDOWN_SECONDS,
        }
    }
}

impl VerificationLock {
    pub fn phase(&self) -> VerificationPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_locked(&self) -> bool {
        self.phase == VerificationPhase::Locked
    }

    pub fn is_busy(&self) -> bool {
        self.phase != VerificationPhase::Idle
    }

    pub fn begin_request(&mut self) -> Result<(), VerificationError> {
        if self.is_busy() {
            return Err(VerificationError::AlreadyActive);
        }
        self.phase = VerificationPhase::Requesting;
        Ok(())
    }

    /// Request finished with a success status: start counting down.
    pub fn lock(&mut self) {
        self.phase = VerificationPhase::Locked;
        self.remaining_seconds = COUNTDOWN_SECONDS;
    }

    /// Request finished without success: back to idle, no countdown.
    pub fn release(&mut self) {
        self.phase = VerificationPhase::Idle;
        self.remaining_seconds = COUNTDOWN_SECONDS;
    }

    /// One elapsed second. The tick that finds zero unlocks.
    pub fn tick(&mut self) -> TickResult {
        if !self.is_locked() {
            return TickResult::Stray;
        }
        if self.remaining_seconds == 0 {
            self.release();
            return TickResult::Expired;
        }
        self.remaining_seconds -= 1;
        TickResult::Counting(self.remaining_seconds)
    }

    pub fn button_label(&self, prerequisites_met: bool) -> String {
        if prerequisites_met && self.is_locked() {
            self.remaining_seconds.to_string()
        } else {
            SEND_CODE_LABEL.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_request_is_refused_while_busy() {
        let mut lock = VerificationLock::default();
        lock.begin_request().expect("idle");
        assert_eq!(lock.begin_request(), Err(VerificationError::AlreadyActive));

        lock.lock();
        assert_eq!(lock.begin_request(), Err(VerificationError::AlreadyActive));
    }

    #[test]
    fn countdown_runs_to_zero_then_unlocks() {
        let mut lock = VerificationLock::default();
        lock.begin_request().expect("idle");
        lock.lock();
        assert_eq!(lock.button_label(true), "60");

        for expected in (0..COUNTDOWN_SECONDS).rev() {
            assert_eq!(lock.tick(), TickResult::Counting(expected));
        }
        assert_eq!(lock.button_label(true), "0");
        assert_eq!(lock.tick(), TickResult::Expired);
        assert_eq!(lock.phase(), VerificationPhase::Idle);
        assert_eq!(lock.remaining_seconds(), COUNTDOWN_SECONDS);
        assert_eq!(lock.button_label(true), SEND_CODE_LABEL);
    }

    #[test]
    fn ticks_outside_countdown_are_stray() {
        let mut lock = VerificationLock::default();
        assert_eq!(lock.tick(), TickResult::Stray);
        lock.begin_request().expect("idle");
        assert_eq!(lock.tick(), TickResult::Stray);
    }

    #[test]
    fn label_ignores_countdown_when_prerequisites_missing() {
        let mut lock = VerificationLock::default();
        lock.begin_request().expect("idle");
        lock.lock();
        assert_eq!(lock.button_label(false), SEND_CODE_LABEL);
    }
}
