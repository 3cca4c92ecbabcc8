use super::{ComponentBase, PoseContribution};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum AnimState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Skeletal animation track. While running or paused it contributes its
/// pose to the active skeleton every update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimComponent {
    pub state: AnimState,
    pub time_ms: u64,
}

impl AnimComponent {
    pub(super) fn set_key(&mut self, value: i32) {
        match value {
            0 => {
                self.state = AnimState::Stopped;
                self.time_ms = 0;
            }
            2 => {
                if self.state == AnimState::Running {
                    self.state = AnimState::Paused;
                }
            }
            3 => {
                if self.state == AnimState::Paused {
                    self.state = AnimState::Running;
                }
            }
            _ => {
                self.state = AnimState::Running;
                self.time_ms = 0;
            }
        }
    }

    pub(super) fn update(&mut self, base: &ComponentBase, dt_ms: u32) -> Option<PoseContribution> {
        match self.state {
            AnimState::Stopped => None,
            AnimState::Running | AnimState::Paused => {
                if self.state == AnimState::Running {
                    self.time_ms += u64::from(dt_ms);
                }
                Some(PoseContribution {
                    animation: base.name.clone(),
                    time_ms: self.time_ms,
                })
            }
        }
    }
}
