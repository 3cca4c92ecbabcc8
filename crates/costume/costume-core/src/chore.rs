//! Chores: named, timed sequences of keyframed tracks.
//!
//! Time is integer milliseconds. A chore that was just started fires its
//! `t = 0` keys on the next update without advancing; after that every
//! update fires the keys in the window `(previous, now]`.

use serde::{Deserialize, Serialize};

use crate::ids::{ChoreId, ComponentId};
use crate::tag::Tag;

/// One (time, value) pair on a track.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time_ms: i32,
    pub value: i32,
}

/// How a track reaches its component.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TrackComponent {
    /// The descriptor produced nothing.
    None,
    /// The component this track's own record instantiated.
    Owned(ComponentId),
    /// A component instantiated by some other track, looked up by slot.
    ById(ComponentId),
}

impl TrackComponent {
    #[inline]
    pub fn resolve(self) -> Option<ComponentId> {
        match self {
            TrackComponent::None => None,
            TrackComponent::Owned(id) | TrackComponent::ById(id) => Some(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub component: TrackComponent,
    pub keys: Vec<Keyframe>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Looping,
}

impl PlayState {
    pub fn as_raw(self) -> i32 {
        match self {
            PlayState::Stopped => 0,
            PlayState::Playing => 1,
            PlayState::Looping => 2,
        }
    }

    pub fn from_raw(v: i32) -> Option<Self> {
        match v {
            0 => Some(PlayState::Stopped),
            1 => Some(PlayState::Playing),
            2 => Some(PlayState::Looping),
            _ => None,
        }
    }
}

/// A key a track reached during [`Chore::advance`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyEvent {
    pub track: usize,
    pub component: ComponentId,
    pub value: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chore {
    pub id: ChoreId,
    pub name: String,
    pub length_ms: u32,
    pub tracks: Vec<Track>,
    state: PlayState,
    /// Current time; `None` until the first update after starting.
    time_ms: Option<i64>,
    mesh: Option<ComponentId>,
    skeleton: Option<ComponentId>,
}

impl Chore {
    pub fn new(id: ChoreId, name: impl Into<String>, length_ms: u32) -> Self {
        Self {
            id,
            name: name.into(),
            length_ms,
            tracks: Vec::new(),
            state: PlayState::Stopped,
            time_ms: None,
            mesh: None,
            skeleton: None,
        }
    }

    /// Record a component instantiated for one of this chore's tracks.
    pub fn add_component(&mut self, id: ComponentId, tag: Tag) {
        if tag == Tag::MESH {
            self.mesh = Some(id);
        } else if tag == Tag::SKEL {
            self.skeleton = Some(id);
        }
    }

    pub fn mesh(&self) -> Option<ComponentId> {
        self.mesh
    }

    pub fn skeleton(&self) -> Option<ComponentId> {
        self.skeleton
    }

    /// A chore that carries both a mesh and a skeleton dresses the costume when played.
    pub fn is_wear_chore(&self) -> bool {
        self.mesh.is_some() && self.skeleton.is_some()
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state != PlayState::Stopped
    }

    /// Current time in ms, or `-1` before the first update.
    pub fn time_ms(&self) -> i64 {
        self.time_ms.unwrap_or(-1)
    }

    pub fn play(&mut self) {
        self.state = PlayState::Playing;
        self.time_ms = None;
    }

    pub fn play_looping(&mut self) {
        self.state = PlayState::Looping;
        self.time_ms = None;
    }

    pub fn stop(&mut self) {
        self.state = PlayState::Stopped;
    }

    /// Restore saved playback state verbatim.
    pub fn restore(&mut self, state: PlayState, time_ms: i64) {
        self.state = state;
        self.time_ms = if time_ms < 0 { None } else { Some(time_ms) };
    }

    /// Advance by `dt_ms`, returning the keys crossed in track order.
    pub fn advance(&mut self, dt_ms: u32) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        if !self.is_playing() {
            return events;
        }

        let prev = self.time_ms.unwrap_or(-1);
        let mut now = match self.time_ms {
            None => 0,
            Some(t) => t + i64::from(dt_ms),
        };
        self.collect_keys(prev, now, &mut events);

        let length = i64::from(self.length_ms);
        if now > length {
            if self.state == PlayState::Looping && length > 0 {
                loop {
                    now -= length;
                    self.collect_keys(-1, now, &mut events);
                    if now <= length {
                        break;
                    }
                }
            } else {
                self.state = PlayState::Stopped;
            }
        }
        self.time_ms = Some(now);
        events
    }

    fn collect_keys(&self, start: i64, stop: i64, out: &mut Vec<KeyEvent>) {
        for (idx, track) in self.tracks.iter().enumerate() {
            let Some(component) = track.component.resolve() else {
                continue;
            };
            for key in &track.keys {
                let t = i64::from(key.time_ms);
                if t > stop {
                    break;
                }
                if t > start {
                    out.push(KeyEvent {
                        track: idx,
                        component,
                        value: key.value,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chore_with_keys(length_ms: u32, keys: &[(i32, i32)]) -> Chore {
        let mut c = Chore::new(ChoreId(0), "test", length_ms);
        c.tracks.push(Track {
            component: TrackComponent::Owned(ComponentId(0)),
            keys: keys
                .iter()
                .map(|&(time_ms, value)| Keyframe { time_ms, value })
                .collect(),
        });
        c
    }

    fn values(events: &[KeyEvent]) -> Vec<i32> {
        events.iter().map(|e| e.value).collect()
    }

    #[test]
    fn first_update_fires_zero_keys_without_advancing() {
        let mut c = chore_with_keys(100, &[(0, 1), (50, 2)]);
        c.play();
        assert_eq!(values(&c.advance(30)), vec![1]);
        assert_eq!(c.time_ms(), 0);
        assert_eq!(values(&c.advance(30)), Vec::<i32>::new());
        assert_eq!(values(&c.advance(30)), vec![2]);
        assert_eq!(c.time_ms(), 60);
    }

    #[test]
    fn playing_chore_stops_past_its_length() {
        let mut c = chore_with_keys(100, &[(0, 1), (100, 0)]);
        c.play();
        c.advance(0);
        assert_eq!(values(&c.advance(100)), vec![0]);
        assert!(c.is_playing());
        c.advance(1);
        assert!(!c.is_playing());
        assert_eq!(c.advance(10), Vec::new());
    }

    #[test]
    fn looping_chore_wraps_and_refires_head_keys() {
        let mut c = chore_with_keys(100, &[(0, 1), (90, 2)]);
        c.play_looping();
        c.advance(0);
        // 120 wraps to 20: the tail key fires, then keys in (-1, 20] again.
        let ev = c.advance(120);
        assert_eq!(values(&ev), vec![2, 1]);
        assert_eq!(c.time_ms(), 20);
        c.advance(0);
        let ev = c.advance(100);
        assert_eq!(values(&ev), vec![2, 1]);
        assert!(c.is_playing());
    }

    #[test]
    fn zero_length_loop_does_not_spin() {
        let mut c = chore_with_keys(0, &[(0, 5)]);
        c.play_looping();
        assert_eq!(values(&c.advance(10)), vec![5]);
        c.advance(10);
        assert!(!c.is_playing());
    }

    #[test]
    fn tracks_without_components_fire_nothing() {
        let mut c = chore_with_keys(100, &[(0, 1)]);
        c.tracks[0].component = TrackComponent::None;
        c.play();
        assert!(c.advance(0).is_empty());
    }

    #[test]
    fn lookup_tracks_report_the_referenced_slot() {
        let mut c = chore_with_keys(100, &[(0, 4)]);
        c.tracks[0].component = TrackComponent::ById(ComponentId(7));
        c.play();
        let ev = c.advance(0);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].component, ComponentId(7));
        assert_eq!(ev[0].track, 0);
    }

    #[test]
    fn wear_chore_needs_mesh_and_skeleton() {
        let mut c = Chore::new(ChoreId(0), "wear", 0);
        c.add_component(ComponentId(0), Tag::MESH);
        assert!(!c.is_wear_chore());
        c.add_component(ComponentId(1), Tag::SKEL);
        assert!(c.is_wear_chore());
        assert_eq!(c.mesh(), Some(ComponentId(0)));
        assert_eq!(c.skeleton(), Some(ComponentId(1)));
    }
}
