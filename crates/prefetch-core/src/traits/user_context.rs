use crate::models::DeviceInfo;

/// Source of the signed-in user for the current session.
pub trait IUserContext: Send + Sync {
    /// `None` when nobody is signed in; tracking is then skipped silently.
    fn current_user_id(&self) -> Option<String>;

    /// Device snapshot recorded on new behavior profiles.
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo::default()
    }
}
