//! Monday.com API version definitions.
//!
//! This module provides the [`ApiVersion`] enum sent in the `API-Version`
//! request header.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Monday.com API version.
///
/// Monday.com releases API versions quarterly (January, April, July, October).
/// This enum provides variants for known versions plus a `Custom` variant
/// for versions released after this crate.
///
/// # Example
///
/// ```rust
/// use monday_api::ApiVersion;
///
/// let version: ApiVersion = "2025-04".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2025_04);
/// assert_eq!(format!("{}", ApiVersion::V2025_04), "2025-04");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2024-10 (October 2024)
    V2024_10,
    /// API version 2025-01 (January 2025)
    V2025_01,
    /// API version 2025-04 (April 2025)
    V2025_04,
    /// API version 2025-07 (July 2025)
    V2025_07,
    /// API version 2025-10 (October 2025)
    V2025_10,
    /// Custom version string for future or unrecognized versions.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    /// Returns `true` for versions known to this crate.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    const fn ordinal(&self) -> u32 {
        match self {
            Self::V2024_10 => 1,
            Self::V2025_01 => 2,
            Self::V2025_04 => 3,
            Self::V2025_07 => 4,
            Self::V2025_10 => 5,
            Self::Custom(_) => 100,
        }
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => a.cmp(b),
            _ => self.ordinal().cmp(&other.ordinal()),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2024_10 => "2024-10",
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "2024-10" => Ok(Self::V2024_10),
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            _ => {
                if Self::is_valid_version_format(&s) {
                    Ok(Self::Custom(s))
                } else {
                    Err(ConfigError::InvalidApiVersion { version: s })
                }
            }
        }
    }
}

impl ApiVersion {
    fn is_valid_version_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };

        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && matches!(month, "01" | "04" | "07" | "10")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_parses_known_versions() {
        assert_eq!(
            "2024-10".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2024_10
        );
        assert_eq!(
            " 2025-07 ".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2025_07
        );
    }

    #[test]
    fn test_api_version_display() {
        assert_eq!(format!("{}", ApiVersion::V2025_01), "2025-01");
        assert_eq!(
            format!("{}", ApiVersion::Custom("2026-04".to_string())),
            "2026-04"
        );
    }

    #[test]
    fn test_api_version_parses_future_versions() {
        let version: ApiVersion = "2026-01".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("2026-01".to_string()));
        assert!(!version.is_known());
    }

    #[test]
    fn test_api_version_rejects_invalid() {
        assert!("invalid".parse::<ApiVersion>().is_err());
        assert!("2024".parse::<ApiVersion>().is_err());
        assert!("2024-1".parse::<ApiVersion>().is_err());
        assert!("2024-02".parse::<ApiVersion>().is_err());
        assert!("24-01".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_version_ordering() {
        assert!(ApiVersion::V2024_10 < ApiVersion::V2025_01);
        assert!(ApiVersion::V2025_07 < ApiVersion::V2025_10);
        assert!(ApiVersion::latest() < ApiVersion::Custom("2026-01".to_string()));
        assert!(
            ApiVersion::Custom("2026-01".to_string()) < ApiVersion::Custom("2026-04".to_string())
        );
    }
}
