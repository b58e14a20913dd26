use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

/// Device models reported in mobile mode.
pub const DEVICE_MODELS: &[&str] = &[
    "M2104K10I",
    "22081212C",
    "2211133C",
    "23049RAD8C",
    "23127PN0CC",
    "24031PN0DC",
];

/// OS versions reported in mobile mode.
pub const OS_VERSIONS: &[&str] = &[
    "Android_10",
    "Android_11",
    "Android_12",
    "Android_13",
    "Android_14.0.0",
];

/// Stable client fingerprint presented on every request of a client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    device_model: String,
    os_version: String,
    session_uuid: Uuid,
}

impl IdentityProfile {
    pub fn new(device_model: impl Into<String>, os_version: impl Into<String>, session_uuid: Uuid) -> Self {
        Self {
            device_model: device_model.into(),
            os_version: os_version.into(),
            session_uuid,
        }
    }

    /// Draw a fingerprint uniformly from the candidate lists.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let device_model = DEVICE_MODELS.choose(rng).copied().unwrap_or(DEVICE_MODELS[0]);
        let os_version = OS_VERSIONS.choose(rng).copied().unwrap_or(OS_VERSIONS[0]);
        let session_uuid = uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid();
        Self::new(device_model, os_version, session_uuid)
    }

    pub fn device_model(&self) -> &str { &self.device_model }

    pub fn os_version(&self) -> &str { &self.os_version }

    pub fn session_uuid(&self) -> Uuid { self.session_uuid }
}
