//! Media resource binding contract.
//!
//! A backend turns a song's media path into a bound resource handle. Every
//! bind is tagged with a [`BindingId`]; events emitted by the resource carry
//! that id so the engine can discard events from a superseded binding.

use aria_core::Result;
use crossbeam_channel::Sender;

/// Monotonically increasing identity of a resource binding.
///
/// The engine bumps this on every new bind; an event whose binding does not
/// match the engine's current binding belongs to an abandoned song.
pub type BindingId = u64;

/// Event kinds a bound resource can emit.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEventKind {
    /// The resource finished loading and can honor transport commands.
    Ready,
    /// Playback position in seconds.
    Position(f64),
    /// Playback reached the end of the media.
    Ended,
    /// The resource failed to load or decode.
    Error(String),
}

/// An event emitted by a bound resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEvent {
    /// The binding this event was issued for.
    pub binding: BindingId,
    pub kind: ResourceEventKind,
}

impl ResourceEvent {
    pub const fn new(binding: BindingId, kind: ResourceEventKind) -> Self {
        Self { binding, kind }
    }
}

/// A bound hardware audio handle for one song.
///
/// Exactly one resource is alive at a time, exclusively owned by the
/// playback engine. Dropping the handle releases the hardware.
pub trait MediaResource {
    /// Start or resume output.
    fn play(&mut self) -> Result<()>;

    /// Halt output, keeping the position.
    fn pause(&mut self);

    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Set the absolute playback position in seconds.
    fn set_position(&mut self, secs: f64);

    /// Set the output gain in [0, 1].
    fn set_volume(&mut self, volume: f32);

    /// Set whether the resource restarts itself on reaching the end.
    fn set_looping(&mut self, looping: bool);

    /// Whether this platform requires a user-gesture unlock probe before
    /// audio output is audible.
    fn requires_unlock(&self) -> bool {
        false
    }
}

/// Factory for bound media resources.
pub trait MediaBackend {
    type Resource: MediaResource;

    /// Bind a resource for the given media path. Events for this binding
    /// are delivered through `events`, tagged with `binding`.
    fn bind(
        &mut self,
        media_path: &str,
        binding: BindingId,
        events: Sender<ResourceEvent>,
    ) -> Result<Self::Resource>;
}
