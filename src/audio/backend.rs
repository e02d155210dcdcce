use std::collections::HashMap;
use crate::audio::AudioClip;
use parking_lot::Mutex;
use crate::glm::Vec3;
use std::sync::Arc;
use log::warn;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AudioError {
	#[error("audio source {0:?} does not exist")]
	UnknownSource(SourceId),

	#[error("audio source pool exhausted")]
	PoolExhausted,

	#[error("audio backend error: {0}")]
	Backend(String),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u32);

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PlaybackState {
	#[default]
	Stopped,
	Paused,
	Playing,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SourceParam {
	Pitch(f32),
	Gain(f32),
	Rolloff(f32),
	ReferenceDistance(f32),
	Looping(bool),
	Position(Vec3),
	Direction(Vec3),
}

/// A pool of audio sources plus the single listener.
///
/// Static sources play a whole [AudioClip]; streamed sources play a queue of sample buffers.
pub trait AudioBackend: Send {
	fn create_source(&mut self) -> Result<SourceId, AudioError>;

	fn destroy_source(&mut self, source: SourceId);

	fn set_param(&mut self, source: SourceId, param: SourceParam) -> Result<(), AudioError>;

	fn set_clip(&mut self, source: SourceId, clip: &AudioClip) -> Result<(), AudioError>;

	fn queue_buffer(&mut self, source: SourceId, samples: &[i16], channels: u16, sample_rate: u32)
		-> Result<(), AudioError>;

	/// Number of queued buffers that finished playing.
	fn processed_buffers(&mut self, source: SourceId) -> usize;

	/// Drop the `count` oldest processed buffers from the queue.
	fn unqueue_buffers(&mut self, source: SourceId, count: usize);

	fn clear_queue(&mut self, source: SourceId);

	fn play(&mut self, source: SourceId) -> Result<(), AudioError>;

	fn pause(&mut self, source: SourceId) -> Result<(), AudioError>;

	fn stop(&mut self, source: SourceId) -> Result<(), AudioError>;

	fn state(&self, source: SourceId) -> PlaybackState;

	fn set_listener_position(&mut self, position: Vec3);

	fn set_listener_orientation(&mut self, forward: Vec3, up: Vec3);

	fn set_listener_gain(&mut self, gain: f32);
}

/// What a [NullAudioBackend] knows about one source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NullSource {
	pub state: PlaybackState,
	pub params: Vec<SourceParam>,
	pub clip_len: Option<usize>,
	pub queued: usize,
	pub processed: usize,
	pub buffers_pushed: usize,
}

#[derive(Debug)]
pub struct NullListener {
	pub position: Vec3,
	pub forward: Vec3,
	pub up: Vec3,
	pub gain: f32,
}

impl Default for NullListener {
	fn default() -> Self {
		Self {
			position: Vec3::zeros(),
			forward: Vec3::new(0.0, 0.0, -1.0),
			up: Vec3::new(0.0, 1.0, 0.0),
			gain: 1.0,
		}
	}
}

#[derive(Debug, Default)]
struct NullState {
	max_sources: Option<usize>,
	next_source: u32,
	sources: HashMap<SourceId, NullSource>,
	listener: NullListener,
}

/// An [AudioBackend] that plays nothing.
///
/// Clones share their state, so a copy kept aside can inspect what the engine did
/// and pretend that queued buffers finished playing.
#[derive(Clone, Debug, Default)]
pub struct NullAudioBackend {
	state: Arc<Mutex<NullState>>,
}

impl NullAudioBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fail source creation once `max_sources` sources are alive.
	pub fn with_max_sources(self, max_sources: usize) -> Self {
		self.state.lock().max_sources = Some(max_sources);
		self
	}

	pub fn source(&self, source: SourceId) -> Option<NullSource> {
		self.state.lock().sources.get(&source).cloned()
	}

	pub fn source_count(&self) -> usize {
		self.state.lock().sources.len()
	}

	pub fn listener_position(&self) -> Vec3 {
		self.state.lock().listener.position
	}

	pub fn listener_gain(&self) -> f32 {
		self.state.lock().listener.gain
	}

	/// Mark every buffer queued on `source` as played.
	pub fn finish_queued(&self, source: SourceId) {
		if let Some(source) = self.state.lock().sources.get_mut(&source) {
			source.processed = source.queued;
		}
	}

	fn with_source<R>(&self, source: SourceId, f: impl FnOnce(&mut NullSource) -> R) -> Result<R, AudioError> {
		match self.state.lock().sources.get_mut(&source) {
			Some(state) => Ok(f(state)),
			None => Err(AudioError::UnknownSource(source)),
		}
	}
}

impl AudioBackend for NullAudioBackend {
	fn create_source(&mut self) -> Result<SourceId, AudioError> {
		let mut state = self.state.lock();
		if state.max_sources.map_or(false, |max| state.sources.len() >= max) {
			return Err(AudioError::PoolExhausted);
		}

		let id = SourceId(state.next_source);
		state.next_source += 1;
		state.sources.insert(id, NullSource::default());
		Ok(id)
	}

	fn destroy_source(&mut self, source: SourceId) {
		self.state.lock().sources.remove(&source);
	}

	fn set_param(&mut self, source: SourceId, param: SourceParam) -> Result<(), AudioError> {
		self.with_source(source, |s| s.params.push(param))
	}

	fn set_clip(&mut self, source: SourceId, clip: &AudioClip) -> Result<(), AudioError> {
		self.with_source(source, |s| s.clip_len = Some(clip.len()))
	}

	fn queue_buffer(&mut self, source: SourceId, _samples: &[i16], _channels: u16, _sample_rate: u32)
		-> Result<(), AudioError> {
		self.with_source(source, |s| {
			s.queued += 1;
			s.buffers_pushed += 1;
		})
	}

	fn processed_buffers(&mut self, source: SourceId) -> usize {
		self.with_source(source, |s| s.processed).unwrap_or(0)
	}

	fn unqueue_buffers(&mut self, source: SourceId, count: usize) {
		let result = self.with_source(source, |s| {
			let count = count.min(s.processed);
			s.processed -= count;
			s.queued -= count;
		});
		if let Err(err) = result {
			warn!("cannot unqueue buffers: {err}");
		}
	}

	fn clear_queue(&mut self, source: SourceId) {
		if let Err(err) = self.with_source(source, |s| {
			s.queued = 0;
			s.processed = 0;
		}) {
			warn!("cannot clear queue: {err}");
		}
	}

	fn play(&mut self, source: SourceId) -> Result<(), AudioError> {
		self.with_source(source, |s| s.state = PlaybackState::Playing)
	}

	fn pause(&mut self, source: SourceId) -> Result<(), AudioError> {
		self.with_source(source, |s| s.state = PlaybackState::Paused)
	}

	fn stop(&mut self, source: SourceId) -> Result<(), AudioError> {
		self.with_source(source, |s| s.state = PlaybackState::Stopped)
	}

	fn state(&self, source: SourceId) -> PlaybackState {
		self.state.lock().sources.get(&source).map(|s| s.state).unwrap_or_default()
	}

	fn set_listener_position(&mut self, position: Vec3) {
		self.state.lock().listener.position = position;
	}

	fn set_listener_orientation(&mut self, forward: Vec3, up: Vec3) {
		let mut state = self.state.lock();
		state.listener.forward = forward;
		state.listener.up = up;
	}

	fn set_listener_gain(&mut self, gain: f32) {
		self.state.lock().listener.gain = gain;
	}
}
