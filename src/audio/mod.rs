//! Positional audio.
//!
//! [SoundSource] and [Listener] components talk to an [AudioBackend] through an [AudioDevice].
//! Streamed sources are fed by a [MusicStream] worker thread, the only state shared across threads.

mod audio_system;
mod backend;
mod clip;
mod device;
mod listener;
mod sound_source;
mod stream;

pub use audio_system::*;
pub use backend::*;
pub use clip::*;
pub use device::*;
pub use listener::*;
pub use sound_source::*;
pub use stream::*;
