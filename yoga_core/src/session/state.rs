use yoga_data::result::EndReason;

use crate::config::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Pre-roll before judging starts.
    CountingDown { remaining: u32 },
    /// Camera frames are being judged.
    Detecting { remaining: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Toggle,
    PreRollTick,
    HoldTick,
}

/// Side effect the owner must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartPreRoll,
    StartDetecting,
    AbortPreRoll,
    EndSession(EndReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(state: SessionState, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }

    fn stay(state: SessionState) -> Self {
        Self { state, effect: None }
    }
}

impl SessionState {
    /// Computes the next state. Events that mean nothing in the current state
    /// leave it unchanged.
    pub fn on_event(self, event: SessionEvent, models_ready: bool, config: &SessionConfig) -> Transition {
        use SessionState::*;

        match (self, event) {
            (Idle, SessionEvent::Toggle) if models_ready => Transition::to(
                CountingDown {
                    remaining: config.pre_roll_ticks.max(1),
                },
                Effect::StartPreRoll,
            ),
            (CountingDown { .. }, SessionEvent::Toggle) => Transition::to(Idle, Effect::AbortPreRoll),
            (Detecting { .. }, SessionEvent::Toggle) => {
                Transition::to(Idle, Effect::EndSession(EndReason::Stopped))
            }
            (CountingDown { remaining }, SessionEvent::PreRollTick) => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    Transition::to(
                        Detecting {
                            remaining: config.hold_ticks.max(1),
                        },
                        Effect::StartDetecting,
                    )
                } else {
                    Transition::stay(CountingDown { remaining })
                }
            }
            (Detecting { remaining }, SessionEvent::HoldTick) => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    Transition::to(Idle, Effect::EndSession(EndReason::Expired))
                } else {
                    Transition::stay(Detecting { remaining })
                }
            }
            (state, _) => Transition::stay(state),
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        match self {
            SessionState::Idle => None,
            SessionState::CountingDown { remaining } | SessionState::Detecting { remaining } => Some(*remaining),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn is_detecting(&self) -> bool {
        matches!(self, SessionState::Detecting { .. })
    }

    /// Start/stop button caption.
    pub fn button_label(&self) -> &'static str {
        if self.is_idle() {
            "Let's Begin"
        } else {
            "Stop"
        }
    }
}
