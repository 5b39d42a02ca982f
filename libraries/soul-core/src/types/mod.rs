mod audio;
mod device;

pub use audio::{AudioCharacteristics, BitDepth, Codec, DepthOrigin, SampleRate};
pub use device::{DeviceCapability, DeviceId};
