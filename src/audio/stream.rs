use crate::audio::{AudioBackend, AudioClip, AudioDevice, PlaybackState, SourceId};
use crate::audio::device::log_failure;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use parking_lot::Mutex;
use log::{debug, warn};
use std::sync::Arc;

/// Number of buffers kept queued on a streamed source.
pub const BUFFER_COUNT: usize = 4;

/// Samples per streamed buffer.
pub const BUFFER_SIZE: usize = 32768;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Default)]
struct StreamShared {
	clip: Option<Arc<AudioClip>>,
	looping: bool,
	state: PlaybackState,
	position: usize,
	queued: usize,
}

impl StreamShared {
	/// Queue the next chunk of the clip. Returns `false` once the clip is exhausted.
	fn push_next(&mut self, backend: &mut dyn AudioBackend, source: SourceId) -> bool {
		let clip = match &self.clip {
			Some(clip) if !clip.is_empty() => clip.clone(),
			_ => return false,
		};

		if self.position >= clip.len() {
			if !self.looping {
				return false;
			}
			self.position = 0;
		}

		let end = (self.position + BUFFER_SIZE).min(clip.len());
		let result = backend.queue_buffer(source, &clip.samples()[self.position..end], clip.channels(), clip.sample_rate());
		self.position = end;

		match result {
			Ok(()) => {
				self.queued += 1;
				true
			},
			Err(err) => {
				warn!("dropping audio chunk for source {source:?}: {err}");
				false
			},
		}
	}

	fn fill(&mut self, backend: &mut dyn AudioBackend, source: SourceId) {
		while self.queued < BUFFER_COUNT && self.push_next(backend, source) {}
	}
}

/// Plays a long [AudioClip] by feeding it to a source chunk by chunk from a worker thread.
///
/// The worker keeps [BUFFER_COUNT] chunks of [BUFFER_SIZE] samples queued and stops once a
/// non-looping clip has been played through.
pub struct MusicStream {
	device: AudioDevice,
	source: SourceId,
	shared: Arc<Mutex<StreamShared>>,
	worker: Option<JoinHandle<()>>,
}

impl MusicStream {
	pub fn new(device: AudioDevice, source: SourceId) -> Self {
		Self {
			device,
			source,
			shared: Arc::new(Mutex::new(StreamShared::default())),
			worker: None,
		}
	}

	pub fn source(&self) -> SourceId {
		self.source
	}

	pub fn play(&mut self) {
		{
			let mut shared = self.shared.lock();
			match shared.state {
				PlaybackState::Playing => return,
				PlaybackState::Paused => {
					shared.state = PlaybackState::Playing;
					self.device.play(self.source);
					return;
				},
				PlaybackState::Stopped => {},
			}
		}

		// A worker that ran a clip to its end may still be winding down
		self.join_worker();

		{
			let mut shared = self.shared.lock();
			let mut backend = self.device.lock();
			backend.clear_queue(self.source);
			shared.position = 0;
			shared.queued = 0;
			shared.fill(&mut **backend, self.source);

			if shared.queued == 0 {
				debug!("nothing to stream on source {:?}", self.source);
				return;
			}

			let result = backend.play(self.source);
			log_failure("play", self.source, result);
			shared.state = PlaybackState::Playing;
		}

		let device = self.device.clone();
		let shared = self.shared.clone();
		let source = self.source;
		self.worker = Some(thread::spawn(move || stream(device, source, shared)));
	}

	pub fn pause(&mut self) {
		let mut shared = self.shared.lock();
		if shared.state == PlaybackState::Playing {
			shared.state = PlaybackState::Paused;
			self.device.pause(self.source);
		}
	}

	pub fn stop(&mut self) {
		self.shared.lock().state = PlaybackState::Stopped;
		self.join_worker();

		let mut shared = self.shared.lock();
		let mut backend = self.device.lock();
		let result = backend.stop(self.source);
		log_failure("stop", self.source, result);
		backend.clear_queue(self.source);
		shared.position = 0;
		shared.queued = 0;
	}

	pub fn status(&self) -> PlaybackState {
		self.shared.lock().state
	}

	pub fn is_looping(&self) -> bool {
		self.shared.lock().looping
	}

	pub fn set_looping(&mut self, looping: bool) {
		self.shared.lock().looping = looping;
	}

	/// Replace the streamed clip. Playback stops.
	pub fn set_clip(&mut self, clip: Arc<AudioClip>) {
		self.stop();
		self.shared.lock().clip = Some(clip);
	}

	pub fn clip(&self) -> Option<Arc<AudioClip>> {
		self.shared.lock().clip.clone()
	}

	fn join_worker(&mut self) {
		if let Some(worker) = self.worker.take() {
			if worker.join().is_err() {
				warn!("audio stream worker for source {:?} panicked", self.source);
			}
		}
	}
}

impl Drop for MusicStream {
	fn drop(&mut self) {
		self.stop();
	}
}

fn stream(device: AudioDevice, source: SourceId, shared: Arc<Mutex<StreamShared>>) {
	debug!("audio stream worker started for source {source:?}");

	loop {
		{
			let mut shared = shared.lock();
			match shared.state {
				PlaybackState::Stopped => break,
				PlaybackState::Paused => {},
				PlaybackState::Playing => {
					let mut backend = device.lock();
					let processed = backend.processed_buffers(source).min(shared.queued);
					backend.unqueue_buffers(source, processed);
					shared.queued -= processed;
					shared.fill(&mut **backend, source);

					if shared.queued == 0 {
						let result = backend.stop(source);
						log_failure("stop", source, result);
						shared.state = PlaybackState::Stopped;
						break;
					}

					if processed > 0 && backend.state(source) == PlaybackState::Stopped {
						warn!("audio stream underrun on source {source:?}, restarting");
						let result = backend.play(source);
						log_failure("restart", source, result);
					}
				},
			}
		}

		thread::sleep(POLL_INTERVAL);
	}

	debug!("audio stream worker finished for source {source:?}");
}
