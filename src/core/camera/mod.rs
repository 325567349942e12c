//! 相机获取与释放
//!
//! 真正的相机由宿主（Flutter）持有，这里只负责：
//! 1. 按分辨率/帧率偏好申请视频流
//! 2. 独占持有视频流句柄，重新申请前先释放旧流
//! 3. 任何退出路径（成功、失败、销毁）都释放所有轨道

pub mod acquirer;
pub mod error;
pub mod host;
pub mod source;

pub use acquirer::CameraAcquirer;
pub use error::CameraError;
pub use host::{CameraAvailability, HostCamera};
pub use source::{CameraBackend, CameraConstraints, FacingMode, VideoStream};
