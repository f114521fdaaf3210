//! Macro for implementing Display and FromStr for gateway status enums
//!
//! The gateway reports statuses as upper-case strings (`"PENDING"`,
//! `"COMPLETED"`). This macro maps each variant to its wire string once and
//! derives both conversions from that table.
//!
//! # Example
//!
//! ```rust
//! use daasgateway_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum PickupStatus {
//!     Pending,
//!     Done,
//! }
//!
//! impl_status_conversions!(PickupStatus {
//!     Pending => "PENDING",
//!     Done => "DONE",
//! });
//!
//! assert_eq!(PickupStatus::Done.to_string(), "DONE");
//! assert_eq!("pending".parse::<PickupStatus>().unwrap(), PickupStatus::Pending);
//! ```

/// Implements Display and FromStr traits for status enums
///
/// - Display writes the wire string exactly as given
/// - FromStr matches case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation used by the gateway.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($str) {
                    return Ok(Self::$variant);
                })+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Pending,
        Completed,
    }

    impl_status_conversions!(TestStatus {
        Pending => "PENDING",
        Completed => "COMPLETED",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestStatus::Pending.to_string(), "PENDING");
        assert_eq!(TestStatus::Completed.to_string(), "COMPLETED");
    }

    #[test]
    fn test_fromstr_is_case_insensitive() {
        assert_eq!(TestStatus::from_str("PENDING").unwrap(), TestStatus::Pending);
        assert_eq!(TestStatus::from_str("completed").unwrap(), TestStatus::Completed);
        assert_eq!(TestStatus::from_str("ComPleted").unwrap(), TestStatus::Completed);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestStatus::from_str("RUNNING");
        assert!(result.unwrap_err().contains("Invalid TestStatus: RUNNING"));
        assert!(TestStatus::from_str("").is_err());
    }
}
