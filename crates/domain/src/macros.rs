//! Macro for the closed string enumerations of the API
//!
//! Statuses, types and states travel over the wire as lowercase strings.
//! This macro gives each enum a single mapping table and derives from it:
//! `as_str`, the `ALL` universe (used to resolve exclusive filters),
//! `Display` and a case-insensitive `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use helpscout_domain::impl_api_value_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Priority {
//!     Low,
//!     High,
//! }
//!
//! impl_api_value_conversions!(Priority {
//!     Low => "low",
//!     High => "high",
//! });
//!
//! assert_eq!(Priority::ALL, [Priority::Low, Priority::High]);
//! assert_eq!(Priority::High.as_str(), "high");
//! assert_eq!("LOW".parse::<Priority>(), Ok(Priority::Low));
//! ```

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for an API value enum.
#[macro_export]
macro_rules! impl_api_value_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every known value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation of the value.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => ::core::result::Result::Ok(Self::$variant),)+
                    _ => ::core::result::Result::Err(::std::format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestKind {
        Email,
        Chat,
        Phone,
    }

    impl_api_value_conversions!(TestKind {
        Email => "email",
        Chat => "chat",
        Phone => "phone",
    });

    #[test]
    fn test_universe_keeps_declaration_order() {
        assert_eq!(TestKind::ALL, &[TestKind::Email, TestKind::Chat, TestKind::Phone]);
    }

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestKind::Email.to_string(), "email");
        assert_eq!(TestKind::Phone.as_str(), "phone");
    }

    #[test]
    fn test_fromstr_mixed_case() {
        assert_eq!(TestKind::from_str("chat").unwrap(), TestKind::Chat);
        assert_eq!(TestKind::from_str("CHAT").unwrap(), TestKind::Chat);
        assert_eq!(TestKind::from_str("ChAt").unwrap(), TestKind::Chat);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestKind::from_str("fax");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestKind: fax"));
        assert!(TestKind::from_str("").is_err());
    }

    mod with_crate_result {
        use crate::errors::Result;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Channel {
            Web,
            Api,
        }

        impl_api_value_conversions!(Channel {
            Web => "web",
            Api => "api",
        });

        fn parse(value: &str) -> Result<Channel> {
            value.parse().map_err(crate::errors::HelpScoutError::InvalidInput)
        }

        #[test]
        fn test_expands_next_to_crate_result_alias() {
            assert_eq!(parse("API").unwrap(), Channel::Api);
            assert_eq!(Channel::Web.to_string(), "web");
            assert!(parse("fax").is_err());
        }
    }
}
