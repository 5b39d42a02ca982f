// soul-audio-desktop/src/backend.rs
//
// Host backend selection

use crate::error::Result;
use crate::virtual_host::VirtualHost;
use serde::{Deserialize, Serialize};
use soul_core::OsAudio;
use std::sync::Arc;

/// Which OS audio host the engine talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostBackend {
    /// In-process device set (reference devices)
    #[default]
    Virtual,

    /// Platform audio through CPAL (requires the `cpal` feature)
    System,
}

impl HostBackend {
    /// Get human-readable name of backend
    pub fn name(&self) -> &'static str {
        match self {
            Self::Virtual => "virtual",
            Self::System => "system",
        }
    }

    /// Check if backend is available in this build
    pub fn is_available(&self) -> bool {
        match self {
            Self::Virtual => true,
            Self::System => cfg!(feature = "cpal"),
        }
    }
}

/// Create the host for `backend`
pub fn create_host(backend: HostBackend) -> Result<Arc<dyn OsAudio>> {
    match backend {
        HostBackend::Virtual => Ok(Arc::new(VirtualHost::with_reference_devices())),

        #[cfg(feature = "cpal")]
        HostBackend::System => Ok(Arc::new(crate::cpal_host::CpalHost::new())),

        #[cfg(not(feature = "cpal"))]
        HostBackend::System => Err(crate::error::AudioError::BackendUnavailable(
            "system audio requires the `cpal` feature".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(feature = "cpal"))]
    use crate::error::AudioError;

    #[test]
    fn virtual_backend_always_available() {
        assert!(HostBackend::Virtual.is_available());
        let host = create_host(HostBackend::Virtual).unwrap();
        assert_eq!(host.name(), "Virtual");
        assert_eq!(host.enumerate_devices().unwrap().len(), 3);
    }

    #[test]
    fn backend_names_parse_from_config() {
        let backend: HostBackend = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(backend, HostBackend::System);
        assert_eq!(HostBackend::default(), HostBackend::Virtual);
    }

    #[cfg(not(feature = "cpal"))]
    #[test]
    fn system_backend_needs_cpal_feature() {
        assert!(!HostBackend::System.is_available());
        assert!(matches!(
            create_host(HostBackend::System),
            Err(AudioError::BackendUnavailable(_))
        ));
    }
}
