use crate::core::config::RecordingConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordingState {
    Idle,
    Recording { collected: usize },
    Completed { collected: usize },
    TimedOut { collected: usize },
}

impl RecordingState {
    pub fn transition(
        &self,
        event: RecordingEvent,
        config: &RecordingConfig,
    ) -> (RecordingState, RecordingAction) {
        match (self, event) {
            (_, RecordingEvent::Reset) => (RecordingState::Idle, RecordingAction::Ignore),

            (RecordingState::Idle, RecordingEvent::Start) => (
                RecordingState::Recording { collected: 0 },
                RecordingAction::Begin,
            ),

            (RecordingState::Recording { collected }, RecordingEvent::Frame) => {
                let new_count = collected + 1;
                if new_count >= config.target_frames {
                    (
                        RecordingState::Completed {
                            collected: new_count,
                        },
                        RecordingAction::Complete,
                    )
                } else {
                    (
                        RecordingState::Recording {
                            collected: new_count,
                        },
                        RecordingAction::Accept,
                    )
                }
            }

            (RecordingState::Recording { collected }, RecordingEvent::Deadline) => (
                RecordingState::TimedOut {
                    collected: *collected,
                },
                RecordingAction::Expire,
            ),

            // Idle drops stray frames; Completed/TimedOut stay put until Reset.
            (state, _) => (state.clone(), RecordingAction::Ignore),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RecordingState::Completed { .. } | RecordingState::TimedOut { .. }
        )
    }

    pub fn collected(&self) -> usize {
        match self {
            RecordingState::Idle => 0,
            RecordingState::Recording { collected }
            | RecordingState::Completed { collected }
            | RecordingState::TimedOut { collected } => *collected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordingEvent {
    Start,
    Frame,
    Deadline,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordingAction {
    Begin,
    Accept,
    /// The frame is accepted and the sequence is full.
    Complete,
    Expire,
    Ignore,
}

pub struct RecordingStateMachine {
    state: RecordingState,
    config: RecordingConfig,
}

impl RecordingStateMachine {
    pub fn new() -> Self {
        Self::with_config(RecordingConfig::default())
    }

    pub fn with_config(config: RecordingConfig) -> Self {
        Self {
            state: RecordingState::Idle,
            config,
        }
    }

    pub fn process(&mut self, event: RecordingEvent) -> RecordingAction {
        let (new_state, action) = self.state.transition(event, &self.config);
        self.state = new_state;
        action
    }

    pub fn current_state(&self) -> &RecordingState {
        &self.state
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecordingState::Recording { .. })
    }

    pub fn reset(&mut self) {
        self.process(RecordingEvent::Reset);
    }
}

impl Default for RecordingStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
