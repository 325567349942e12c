use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera permission denied. Check browser settings.")]
    PermissionDenied,
    #[error("No camera found. Please connect a camera.")]
    DeviceNotFound,
    #[error("Camera access is not supported on this device.")]
    Unsupported,
    #[error("Camera error: {0}")]
    Other(String),
}

impl CameraError {
    pub fn kind(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => "PermissionDenied",
            CameraError::DeviceNotFound => "DeviceNotFound",
            CameraError::Unsupported => "Unsupported",
            CameraError::Other(_) => "CameraError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            CameraError::PermissionDenied.to_string(),
            "Camera permission denied. Check browser settings."
        );
        assert_eq!(
            CameraError::DeviceNotFound.to_string(),
            "No camera found. Please connect a camera."
        );
        assert_eq!(CameraError::Other("busy".into()).kind(), "CameraError");
    }
}
