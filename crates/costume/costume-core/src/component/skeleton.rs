use serde::{Deserialize, Serialize};

/// One animation's request to pose the skeleton this frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseContribution {
    pub animation: String,
    pub time_ms: u64,
}

/// Pose accumulator for the costume's active skeleton.
///
/// Each frame: `reset`, then animations `accumulate`, then `commit`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkeletonComponent {
    pending: Vec<PoseContribution>,
    committed: Vec<PoseContribution>,
    resets: u32,
    commits: u32,
}

impl SkeletonComponent {
    /// Drop everything accumulated since the last reset.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.resets = self.resets.wrapping_add(1);
    }

    pub fn accumulate(&mut self, contribution: PoseContribution) {
        self.pending.push(contribution);
    }

    /// Finalize the accumulated pose.
    pub fn commit(&mut self) {
        self.committed.clone_from(&self.pending);
        self.commits = self.commits.wrapping_add(1);
    }

    pub fn pending(&self) -> &[PoseContribution] {
        &self.pending
    }

    pub fn committed_pose(&self) -> &[PoseContribution] {
        &self.committed
    }

    pub fn reset_count(&self) -> u32 {
        self.resets
    }

    pub fn commit_count(&self) -> u32 {
        self.commits
    }
}
