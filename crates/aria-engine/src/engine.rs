//! The playback engine and its transport state machine.

use aria_core::{
    Catalog, PlaybackSnapshot, Queue, RepeatMode, Song, TransportStatus,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::media::{
    BindingId, MediaBackend, MediaResource, ResourceEvent, ResourceEventKind,
};
use crate::navigation::{self, PrevAction};
use crate::volume::VolumeController;

/// Initial volume at engine construction.
const DEFAULT_VOLUME: f32 = 0.8;

/// Events published by the engine for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The loaded song changed. `None` when the engine went idle.
    TrackChanged(Option<Song>),
    /// Transport phase changed.
    StateChanged(TransportStatus),
    /// Progress fraction updated, in [0, 1].
    PositionUpdate(f64),
    /// A resource failure surfaced to subscribers.
    Error(String),
}

/// Decide the transport phase once a resource is bound.
///
/// Readiness and the user's desired-playing intent are independent; their
/// combination is the only thing that moves the transport between loading,
/// playing, and paused.
const fn transport_for(ready: bool, desired_playing: bool) -> TransportStatus {
    match (ready, desired_playing) {
        (false, _) => TransportStatus::Loading,
        (true, true) => TransportStatus::Playing,
        (true, false) => TransportStatus::Paused,
    }
}

/// Owns the single hardware audio resource and all playback state.
///
/// Commands are non-blocking and return immediately; their effect on the
/// hardware transport is observed through resource events, which the host
/// pumps through [`PlaybackEngine::process_events`] strictly in emission
/// order.
pub struct PlaybackEngine<B: MediaBackend> {
    backend: B,
    catalog: Catalog,
    queue: Queue,
    /// The one bound resource. Exclusively owned; dropped on song switch.
    resource: Option<B::Resource>,
    current: Option<Song>,
    /// Identity of the live binding; events from older bindings are stale.
    binding: BindingId,
    transport: TransportStatus,
    /// User intent, independent of whether the resource is ready yet.
    desired_playing: bool,
    resource_ready: bool,
    progress: f64,
    volume: VolumeController,
    repeat: RepeatMode,
    shuffled: bool,
    resource_tx: Sender<ResourceEvent>,
    resource_rx: Receiver<ResourceEvent>,
    event_tx: Sender<EngineEvent>,
    event_rx: Receiver<EngineEvent>,
}

impl<B: MediaBackend> PlaybackEngine<B> {
    pub fn new(backend: B, catalog: Catalog) -> Self {
        let (resource_tx, resource_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        info!("playback engine created, {} songs in catalog", catalog.len());

        Self {
            backend,
            catalog,
            queue: Queue::new(),
            resource: None,
            current: None,
            binding: 0,
            transport: TransportStatus::Idle,
            desired_playing: false,
            resource_ready: false,
            progress: 0.0,
            volume: VolumeController::new(DEFAULT_VOLUME),
            repeat: RepeatMode::Off,
            shuffled: false,
            resource_tx,
            resource_rx,
            event_tx,
            event_rx,
        }
    }

    // ---- commands ------------------------------------------------------

    /// Load and play a song. Playing the song that is already loaded is
    /// equivalent to [`resume`](Self::resume), except after a resource
    /// failure, where a fresh bind clears the error.
    pub fn play(&mut self, song: Song) {
        let same_song = self.current.as_ref().is_some_and(|c| c.id == song.id);
        if same_song && self.transport != TransportStatus::Error {
            self.resume();
            return;
        }

        // Bumping the binding supersedes every pending callback of the
        // previous resource; dropping the handle releases the hardware.
        self.binding += 1;
        self.resource = None;
        self.resource_ready = false;
        self.progress = 0.0;
        self.desired_playing = true;

        match self.backend.bind(
            &song.media_path,
            self.binding,
            self.resource_tx.clone(),
        ) {
            Ok(mut resource) => {
                self.volume.apply_to(&mut resource);
                resource.set_looping(self.repeat.loops_resource());
                self.resource = Some(resource);
                self.current = Some(song.clone());
                self.publish(EngineEvent::TrackChanged(Some(song)));
                self.set_transport(TransportStatus::Loading);
            }
            Err(e) => {
                warn!("failed to bind resource for {}: {e}", song.id);
                self.current = Some(song.clone());
                self.desired_playing = false;
                self.publish(EngineEvent::TrackChanged(Some(song)));
                self.publish(EngineEvent::Error(e.to_string()));
                self.set_transport(TransportStatus::Error);
            }
        }
    }

    /// Clear the desired-playing intent. Takes effect immediately when the
    /// resource is ready, otherwise once it becomes ready.
    pub fn pause(&mut self) {
        if self.transport == TransportStatus::Error {
            return;
        }
        self.desired_playing = false;
        self.apply_desired();
    }

    /// Set the desired-playing intent. Takes effect immediately when the
    /// resource is ready, otherwise once it becomes ready.
    pub fn resume(&mut self) {
        if self.current.is_none() || self.transport == TransportStatus::Error {
            return;
        }
        self.desired_playing = true;
        self.apply_desired();
    }

    /// Seek to a fraction of the song duration, clamped to [0, 1].
    /// Ignored while the resource is not ready.
    pub fn seek(&mut self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        if !self.resource_ready {
            debug!("seek ignored, resource not ready");
            return;
        }
        let Some(duration) = self.current.as_ref().map(|s| s.duration_secs)
        else {
            return;
        };
        if let Some(resource) = self.resource.as_mut() {
            resource.set_position(fraction * duration);
            self.progress = fraction;
            self.publish(EngineEvent::PositionUpdate(fraction));
        }
    }

    /// Advance to the next song: queue head first, then catalog order.
    pub fn next(&mut self) {
        if let Some(song) = navigation::next_song(
            &mut self.queue,
            &self.catalog,
            self.current.as_ref(),
            self.repeat,
        ) {
            self.play(song);
        }
    }

    /// Go back: restart the current song when more than three seconds in,
    /// otherwise navigate backwards through the catalog.
    pub fn previous(&mut self) {
        let position = self
            .resource
            .as_ref()
            .map_or(0.0, MediaResource::position);
        match navigation::previous_action(
            position,
            &self.catalog,
            self.current.as_ref(),
            self.repeat,
        ) {
            Some(PrevAction::Restart) => self.restart_current(),
            Some(PrevAction::Play(song)) => self.play(song),
            None => {}
        }
    }

    /// Set the output volume, clamped to [0, 1].
    pub fn set_volume(&mut self, volume: f32) {
        self.volume
            .set(volume, self.resource.as_mut(), self.desired_playing);
    }

    /// Mute, or restore the pre-mute volume.
    pub fn toggle_mute(&mut self) {
        self.volume
            .toggle_mute(self.resource.as_mut(), self.desired_playing);
    }

    /// Set the repeat mode and sync the hardware loop flag.
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        if let Some(resource) = self.resource.as_mut() {
            resource.set_looping(mode.loops_resource());
        }
    }

    /// Cycle Off -> All -> One -> Off.
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.set_repeat(self.repeat.cycled());
        self.repeat
    }

    /// Toggle shuffle. Enabling replaces the queue with a uniformly random
    /// permutation of the catalog minus the current song; disabling clears
    /// the queue entirely.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffled = !self.shuffled;
        if self.shuffled {
            let current_id = self.current.as_ref().map(|s| s.id.clone());
            let mut rng = rand::rng();
            self.queue
                .refill_shuffled(&self.catalog, current_id.as_deref(), &mut rng);
        } else {
            self.queue.clear();
        }
        self.shuffled
    }

    /// Append a song to the play-next queue.
    pub fn add_to_queue(&mut self, song: Song) {
        self.queue.push(song);
    }

    /// Remove every queue entry for a song. Returns how many were removed.
    pub fn remove_from_queue(&mut self, song_id: &str) -> usize {
        self.queue.remove_song(song_id)
    }

    // ---- events --------------------------------------------------------

    /// Drain pending resource events, strictly in emission order.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.resource_rx.try_recv() {
            self.handle_resource_event(event);
        }
    }

    fn handle_resource_event(&mut self, event: ResourceEvent) {
        // A callback bound to a superseded song must not touch state.
        if event.binding != self.binding {
            debug!(
                stale = event.binding,
                live = self.binding,
                "discarding event from superseded resource"
            );
            return;
        }

        match event.kind {
            ResourceEventKind::Ready => {
                self.resource_ready = true;
                self.apply_desired();
            }
            ResourceEventKind::Position(secs) => self.handle_position(secs),
            ResourceEventKind::Ended => self.handle_ended(),
            ResourceEventKind::Error(message) => self.fail_resource(&message),
        }
    }

    fn handle_position(&mut self, secs: f64) {
        let Some(duration) = self.current.as_ref().map(|s| s.duration_secs)
        else {
            return;
        };
        self.progress = if duration > 0.0 {
            (secs / duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.publish(EngineEvent::PositionUpdate(self.progress));
    }

    fn handle_ended(&mut self) {
        if self.repeat == RepeatMode::One {
            // The loop flag keeps the hardware looping on its own; restart
            // explicitly in case an ended event slips through anyway.
            let restarted = self.resource.as_mut().map(|resource| {
                resource.set_position(0.0);
                resource.play()
            });
            if let Some(Err(e)) = restarted {
                self.fail_resource(&e.to_string());
                return;
            }
            self.progress = 0.0;
            self.publish(EngineEvent::PositionUpdate(0.0));
            return;
        }

        if let Some(song) = navigation::next_song(
            &mut self.queue,
            &self.catalog,
            self.current.as_ref(),
            self.repeat,
        ) {
            self.play(song);
        } else {
            self.set_transport(TransportStatus::Ended);
            self.go_idle();
        }
    }

    // ---- state transitions ---------------------------------------------

    /// Reconcile the transport with readiness and desired-playing.
    fn apply_desired(&mut self) {
        if !self.transport.has_resource() || !self.resource_ready {
            return;
        }

        let target = transport_for(true, self.desired_playing);
        if target == TransportStatus::Playing {
            let started = self.resource.as_mut().map(MediaResource::play);
            if let Some(Err(e)) = started {
                self.fail_resource(&e.to_string());
                return;
            }
        } else if let Some(resource) = self.resource.as_mut() {
            resource.pause();
        }
        self.set_transport(target);
    }

    fn restart_current(&mut self) {
        if let Some(resource) = self.resource.as_mut() {
            resource.set_position(0.0);
            self.progress = 0.0;
            self.publish(EngineEvent::PositionUpdate(0.0));
        }
    }

    fn fail_resource(&mut self, message: &str) {
        warn!("media resource failed: {message}");
        self.resource = None;
        self.resource_ready = false;
        self.desired_playing = false;
        self.publish(EngineEvent::Error(message.to_string()));
        self.set_transport(TransportStatus::Error);
    }

    fn go_idle(&mut self) {
        // Supersede anything still in flight for the released resource.
        self.binding += 1;
        self.resource = None;
        self.resource_ready = false;
        self.desired_playing = false;
        self.current = None;
        self.progress = 0.0;
        self.publish(EngineEvent::TrackChanged(None));
        self.set_transport(TransportStatus::Idle);
    }

    fn set_transport(&mut self, new: TransportStatus) {
        if self.transport != new {
            debug!("transport changed: {:?} -> {:?}", self.transport, new);
            self.transport = new;
            self.publish(EngineEvent::StateChanged(new));
        }
    }

    fn publish(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }

    // ---- accessors -----------------------------------------------------

    /// Snapshot of the published playback state.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_song: self.current.clone(),
            transport: self.transport,
            progress: self.progress,
            volume: self.volume.volume(),
            repeat_mode: self.repeat,
            shuffled: self.shuffled,
        }
    }

    pub const fn transport(&self) -> TransportStatus {
        self.transport
    }

    pub const fn current_song(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Try to receive a published event without blocking.
    pub fn try_recv_event(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}
