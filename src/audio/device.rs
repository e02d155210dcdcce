use crate::audio::{AudioBackend, AudioClip, AudioError, PlaybackState, SourceId, SourceParam};
use parking_lot::{Mutex, MutexGuard};
use crate::glm::Vec3;
use std::sync::Arc;
use log::error;

/// Shared handle to an [AudioBackend].
///
/// Components and streaming workers each hold a clone. Backend failures are logged
/// here and never reach the caller.
#[derive(Clone)]
pub struct AudioDevice {
	backend: Arc<Mutex<Box<dyn AudioBackend>>>,
}

impl AudioDevice {
	pub fn new(backend: impl AudioBackend + 'static) -> Self {
		Self {
			backend: Arc::new(Mutex::new(Box::new(backend))),
		}
	}

	pub(crate) fn lock(&self) -> MutexGuard<'_, Box<dyn AudioBackend>> {
		self.backend.lock()
	}

	pub fn create_source(&self) -> Option<SourceId> {
		match self.lock().create_source() {
			Ok(source) => Some(source),
			Err(err) => {
				error!("failed to create audio source: {err}");
				None
			},
		}
	}

	pub fn destroy_source(&self, source: SourceId) {
		self.lock().destroy_source(source);
	}

	pub fn set_param(&self, source: SourceId, param: SourceParam) {
		let result = self.lock().set_param(source, param);
		log_failure("set parameter of", source, result);
	}

	pub fn set_clip(&self, source: SourceId, clip: &AudioClip) {
		let result = self.lock().set_clip(source, clip);
		log_failure("attach clip to", source, result);
	}

	pub fn play(&self, source: SourceId) {
		let result = self.lock().play(source);
		log_failure("play", source, result);
	}

	pub fn pause(&self, source: SourceId) {
		let result = self.lock().pause(source);
		log_failure("pause", source, result);
	}

	pub fn stop(&self, source: SourceId) {
		let result = self.lock().stop(source);
		log_failure("stop", source, result);
	}

	pub fn state(&self, source: SourceId) -> PlaybackState {
		self.lock().state(source)
	}

	pub fn set_listener_pose(&self, position: Vec3, forward: Vec3, up: Vec3) {
		let mut backend = self.lock();
		backend.set_listener_position(position);
		backend.set_listener_orientation(forward, up);
	}

	pub fn set_listener_gain(&self, gain: f32) {
		self.lock().set_listener_gain(gain);
	}
}

pub(crate) fn log_failure(action: &str, source: SourceId, result: Result<(), AudioError>) {
	if let Err(err) = result {
		error!("failed to {action} audio source {source:?}: {err}");
	}
}
