pub mod encoder;
pub mod video;

pub use encoder::{EncodeError, FrameEncoder};
pub use video::VideoFrame;
