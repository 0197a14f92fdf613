/// Why the browser could not give us a position.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location access was denied. Please allow access to your location to log workouts.")]
    PermissionDenied,

    #[error("Your position is currently unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Timed out while getting your position.")]
    Timeout,

    #[error("This browser does not support geolocation.")]
    Unsupported,

    #[error("Could not get your position: {0}")]
    Other(String),
}

impl GeolocationError {
    /// Classifies a `GeolocationPositionError` by its code.
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable(message.into()),
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Other(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geolocation_codes() {
        assert_eq!(GeolocationError::from_code(1, "User denied Geolocation"), GeolocationError::PermissionDenied);
        assert_eq!(GeolocationError::from_code(3, ""), GeolocationError::Timeout);

        let unavailable = GeolocationError::from_code(2, "Network location provider failed");
        assert_eq!(
            unavailable.to_string(),
            "Your position is currently unavailable: Network location provider failed"
        );
        assert!(matches!(GeolocationError::from_code(9, "odd"), GeolocationError::Other(m) if m == "odd"));
    }
}
