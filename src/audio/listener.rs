use crate::components::Component;
use crate::audio::AudioDevice;

/// Acts like a microphone at the entity's [Transform](crate::scene::Transform).
/// Only one listener should exist at a time; the last one updated wins.
#[derive(Component, Clone)]
pub struct Listener {
	device: AudioDevice,
	gain: f32,
}

impl Listener {
	pub fn new(device: &AudioDevice) -> Self {
		Self {
			device: device.clone(),
			gain: 1.0,
		}
	}

	pub fn gain(&self) -> f32 {
		self.gain
	}

	/// Global output gain.
	pub fn set_gain(&mut self, gain: f32) {
		self.gain = gain;
		self.device.set_listener_gain(gain);
	}

	pub(crate) fn device(&self) -> &AudioDevice {
		&self.device
	}
}
