use crate::audio::{AudioClip, AudioDevice, MusicStream, PlaybackState, SourceId, SourceParam};
use crate::components::Component;
use crate::glm::Vec3;
use std::sync::Arc;
use log::warn;

/// Acts like a speaker placed at the entity's [Transform](crate::scene::Transform).
///
/// The backend source is created with the component and destroyed when it is dropped,
/// so detaching the component or destroying its entity releases it. If the backend
/// cannot provide a source the component stays silent.
#[derive(Component)]
pub struct SoundSource {
	device: AudioDevice,
	source: Option<SourceId>,
	stream: Option<MusicStream>,
	clip: Option<Arc<AudioClip>>,
	pitch: f32,
	gain: f32,
	rolloff: f32,
	reference_distance: f32,
	looping: bool,
}

impl SoundSource {
	/// A source playing whole clips from memory.
	pub fn new(device: &AudioDevice) -> Self {
		Self::create(device, false)
	}

	/// A source fed chunk by chunk by a [MusicStream].
	pub fn streamed(device: &AudioDevice) -> Self {
		Self::create(device, true)
	}

	fn create(device: &AudioDevice, streamed: bool) -> Self {
		let source = device.create_source();
		let stream = match (streamed, source) {
			(true, Some(source)) => Some(MusicStream::new(device.clone(), source)),
			_ => None,
		};

		Self {
			device: device.clone(),
			source,
			stream,
			clip: None,
			pitch: 1.0,
			gain: 1.0,
			rolloff: 1.0,
			reference_distance: 1.0,
			looping: false,
		}
	}

	pub fn source(&self) -> Option<SourceId> {
		self.source
	}

	pub fn is_streamed(&self) -> bool {
		self.stream.is_some()
	}

	pub fn set_clip(&mut self, clip: Arc<AudioClip>) {
		match (&mut self.stream, self.source) {
			(Some(stream), _) => stream.set_clip(clip.clone()),
			(None, Some(source)) => self.device.set_clip(source, &clip),
			(None, None) => warn!("ignoring audio clip for a sound source without backend source"),
		}
		self.clip = Some(clip);
	}

	pub fn clip(&self) -> Option<&Arc<AudioClip>> {
		self.clip.as_ref()
	}

	pub fn play(&mut self) {
		match (&mut self.stream, self.source) {
			(Some(stream), _) => stream.play(),
			(None, Some(source)) => self.device.play(source),
			(None, None) => {},
		}
	}

	pub fn pause(&mut self) {
		match (&mut self.stream, self.source) {
			(Some(stream), _) => stream.pause(),
			(None, Some(source)) => self.device.pause(source),
			(None, None) => {},
		}
	}

	pub fn stop(&mut self) {
		match (&mut self.stream, self.source) {
			(Some(stream), _) => stream.stop(),
			(None, Some(source)) => self.device.stop(source),
			(None, None) => {},
		}
	}

	pub fn status(&self) -> PlaybackState {
		match (&self.stream, self.source) {
			(Some(stream), _) => stream.status(),
			(None, Some(source)) => self.device.state(source),
			(None, None) => PlaybackState::Stopped,
		}
	}

	pub fn pitch(&self) -> f32 {
		self.pitch
	}

	pub fn set_pitch(&mut self, pitch: f32) {
		self.pitch = pitch;
		self.push(SourceParam::Pitch(pitch));
	}

	pub fn gain(&self) -> f32 {
		self.gain
	}

	pub fn set_gain(&mut self, gain: f32) {
		self.gain = gain;
		self.push(SourceParam::Gain(gain));
	}

	pub fn rolloff(&self) -> f32 {
		self.rolloff
	}

	pub fn set_rolloff(&mut self, rolloff: f32) {
		self.rolloff = rolloff;
		self.push(SourceParam::Rolloff(rolloff));
	}

	pub fn reference_distance(&self) -> f32 {
		self.reference_distance
	}

	pub fn set_reference_distance(&mut self, distance: f32) {
		self.reference_distance = distance;
		self.push(SourceParam::ReferenceDistance(distance));
	}

	pub fn is_looping(&self) -> bool {
		self.looping
	}

	/// Streamed sources loop by re-queueing the clip; static sources loop in the backend.
	pub fn set_looping(&mut self, looping: bool) {
		self.looping = looping;
		if let Some(stream) = self.stream.as_mut() {
			stream.set_looping(looping);
		} else {
			self.push(SourceParam::Looping(looping));
		}
	}

	pub(crate) fn set_pose(&self, position: Vec3, direction: Vec3) {
		self.push(SourceParam::Position(position));
		self.push(SourceParam::Direction(direction));
	}

	fn push(&self, param: SourceParam) {
		if let Some(source) = self.source {
			self.device.set_param(source, param);
		}
	}
}

impl Drop for SoundSource {
	fn drop(&mut self) {
		// The worker must be gone before the source it feeds
		drop(self.stream.take());
		if let Some(source) = self.source.take() {
			self.device.destroy_source(source);
		}
	}
}
