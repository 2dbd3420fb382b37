//! Device capability detection.

/// Substrings that mark a user agent as a mobile device. Matched
/// case-insensitively.
pub const MOBILE_USER_AGENT_MARKERS: [&str; 8] = [
    "Android",
    "webOS",
    "iPhone",
    "iPad",
    "iPod",
    "BlackBerry",
    "IEMobile",
    "Opera Mini",
];

/// Check a device identifier string against the known mobile markers.
#[must_use]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let haystack = user_agent.to_ascii_lowercase();
    MOBILE_USER_AGENT_MARKERS
        .iter()
        .any(|marker| haystack.contains(&marker.to_ascii_lowercase()))
}

/// Answers whether the running environment is a mobile device.
pub trait MobileDetector {
    /// `true` when mobile-only suppression should apply.
    fn is_mobile(&self) -> bool;
}

/// Detector over a captured user-agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent(pub String);

impl MobileDetector for UserAgent {
    fn is_mobile(&self) -> bool {
        is_mobile_user_agent(&self.0)
    }
}

impl<F: Fn() -> bool> MobileDetector for F {
    fn is_mobile(&self) -> bool {
        self()
    }
}
