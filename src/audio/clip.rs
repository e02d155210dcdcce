use std::sync::Arc;
use std::time::Duration;

/// Decoded interleaved 16 bit PCM.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
	sample_rate: u32,
	channels: u16,
	samples: Arc<[i16]>,
}

impl AudioClip {
	/// # Panics
	/// Panics if `sample_rate` or `channels` is zero.
	pub fn new(sample_rate: u32, channels: u16, samples: impl Into<Arc<[i16]>>) -> Self {
		assert!(sample_rate > 0, "Audio clips need a non-zero sample rate");
		assert!(channels > 0, "Audio clips need at least one channel");
		Self {
			sample_rate,
			channels,
			samples: samples.into(),
		}
	}

	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	pub fn channels(&self) -> u16 {
		self.channels
	}

	pub fn samples(&self) -> &[i16] {
		&self.samples
	}

	pub fn len(&self) -> usize {
		self.samples.len()
	}

	pub fn is_empty(&self) -> bool {
		self.samples.is_empty()
	}

	pub fn duration(&self) -> Duration {
		let frames = self.samples.len() as f64 / self.channels as f64;
		Duration::from_secs_f64(frames / self.sample_rate as f64)
	}
}
