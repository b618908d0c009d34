//! Volume and mute control.
//!
//! The controller is the only component that writes hardware volume. On
//! platforms that gate audio output behind a user gesture it runs a
//! zero-gain playback probe before applying the requested volume; the probe
//! never errors out and never blocks the caller.

use tracing::{debug, warn};

use crate::media::MediaResource;

/// Owns the volume/mute state for the playback engine.
#[derive(Debug, Clone)]
pub struct VolumeController {
    volume: f32,
    previous: f32,
}

impl VolumeController {
    pub fn new(initial: f32) -> Self {
        let volume = initial.clamp(0.0, 1.0);
        Self {
            volume,
            previous: volume,
        }
    }

    /// The stored volume, always in [0, 1].
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    /// Push the stored volume onto a freshly bound resource.
    pub fn apply_to<R: MediaResource>(&self, resource: &mut R) {
        resource.set_volume(self.volume);
    }

    /// Set the volume, clamped to [0, 1], and mirror it onto the resource
    /// if one is bound. `resume_playing` is the caller's desired-playing
    /// state, restored after an unlock probe.
    pub fn set<R: MediaResource>(
        &mut self,
        volume: f32,
        resource: Option<&mut R>,
        resume_playing: bool,
    ) -> f32 {
        let volume = volume.clamp(0.0, 1.0);

        if let Some(resource) = resource {
            if resource.requires_unlock() {
                Self::unlock_and_set(resource, volume, resume_playing);
            } else {
                resource.set_volume(volume);
            }
        }

        self.volume = volume;
        volume
    }

    /// Mute, or restore the volume from before the last mute.
    pub fn toggle_mute<R: MediaResource>(
        &mut self,
        resource: Option<&mut R>,
        resume_playing: bool,
    ) -> f32 {
        if self.volume > 0.0 {
            self.previous = self.volume;
            self.set(0.0, resource, resume_playing)
        } else {
            self.set(self.previous, resource, resume_playing)
        }
    }

    /// Zero-gain playback probe that unlocks gesture-gated audio output.
    /// On probe failure the volume is still assigned directly.
    fn unlock_and_set<R: MediaResource>(
        resource: &mut R,
        volume: f32,
        resume_playing: bool,
    ) {
        resource.set_volume(0.0);
        match resource.play() {
            Ok(()) => {
                if !resume_playing {
                    resource.pause();
                }
                resource.set_volume(volume);
                debug!("audio output unlocked, volume set to {volume}");
            }
            Err(e) => {
                warn!("audio unlock probe failed, setting volume directly: {e}");
                resource.set_volume(volume);
            }
        }
    }
}

impl Default for VolumeController {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeResource, FakeState};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fake_resource(requires_unlock: bool) -> (FakeResource, Rc<RefCell<FakeState>>) {
        let state = Rc::new(RefCell::new(FakeState {
            requires_unlock,
            ..FakeState::default()
        }));
        (FakeResource::new(state.clone()), state)
    }

    #[test]
    fn test_set_without_resource_updates_stored_volume() {
        let mut ctl = VolumeController::new(0.8);
        assert_eq!(ctl.set::<FakeResource>(0.3, None, false), 0.3);
        assert_eq!(ctl.volume(), 0.3);
    }

    #[test]
    fn test_set_mirrors_onto_resource() {
        let (mut res, state) = fake_resource(false);
        let mut ctl = VolumeController::new(0.8);

        ctl.set(0.5, Some(&mut res), true);

        assert_eq!(state.borrow().volume, 0.5);
        // No probe on unlocked platforms.
        assert_eq!(state.borrow().play_calls, 0);
    }

    #[test]
    fn test_toggle_mute_restores_exact_volume() {
        let mut ctl = VolumeController::new(0.8);
        ctl.set::<FakeResource>(0.37, None, false);

        ctl.toggle_mute::<FakeResource>(None, false);
        assert_eq!(ctl.volume(), 0.0);

        ctl.toggle_mute::<FakeResource>(None, false);
        assert_eq!(ctl.volume(), 0.37);
    }

    #[test]
    fn test_unlock_probe_sets_zero_then_true_volume() {
        let (mut res, state) = fake_resource(true);
        let mut ctl = VolumeController::new(0.8);

        ctl.set(0.5, Some(&mut res), false);

        let state = state.borrow();
        assert_eq!(state.volume_history, vec![0.0, 0.5]);
        assert_eq!(state.play_calls, 1);
        // Paused again because the caller was not playing.
        assert!(!state.playing);
    }

    #[test]
    fn test_unlock_probe_resumes_playing_caller() {
        let (mut res, state) = fake_resource(true);
        let mut ctl = VolumeController::new(0.8);

        ctl.set(0.5, Some(&mut res), true);

        let state = state.borrow();
        assert_eq!(state.volume, 0.5);
        assert!(state.playing);
    }

    #[test]
    fn test_unlock_probe_failure_falls_back_to_direct_set() {
        let (mut res, state) = fake_resource(true);
        state.borrow_mut().fail_play = true;
        let mut ctl = VolumeController::new(0.8);

        let applied = ctl.set(0.6, Some(&mut res), true);

        assert_eq!(applied, 0.6);
        assert_eq!(state.borrow().volume, 0.6);
        assert_eq!(ctl.volume(), 0.6);
    }

    proptest! {
        /// Stored volume is always the clamp of the requested value.
        #[test]
        fn prop_set_clamps(v in -10.0f32..10.0) {
            let mut ctl = VolumeController::new(0.8);
            let applied = ctl.set::<FakeResource>(v, None, false);
            prop_assert_eq!(applied, v.clamp(0.0, 1.0));
            prop_assert_eq!(ctl.volume(), v.clamp(0.0, 1.0));
        }
    }
}
