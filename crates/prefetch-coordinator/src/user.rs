use prefetch_core::models::DeviceInfo;
use prefetch_core::traits::IUserContext;

/// User context fixed for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct StaticUser {
    user_id: Option<String>,
    device: DeviceInfo,
}

impl StaticUser {
    pub fn new(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            user_id: (!user_id.is_empty()).then_some(user_id),
            device: DeviceInfo::default(),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.device = device;
        self
    }
}

impl IUserContext for StaticUser {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }

    fn device_info(&self) -> DeviceInfo {
        self.device.clone()
    }
}
