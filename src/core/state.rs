//! State trait for machine phases.
//!
//! A phase is a plain, serializable label for where a machine stands. Phases
//! carry no data so they can be recorded in a [`StateHistory`] without
//! retaining anything sensitive (such as positions).
//!
//! [`StateHistory`]: super::StateHistory

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine phases.
///
/// All methods are pure.
///
/// # Example
///
/// ```rust
/// use geowatch::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Prompt {
///     Asking,
///     Granted,
///     Denied,
/// }
///
/// impl State for Prompt {
///     fn name(&self) -> &str {
///         match self {
///             Self::Asking => "Asking",
///             Self::Granted => "Granted",
///             Self::Denied => "Denied",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Granted | Self::Denied)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Denied)
///     }
/// }
///
/// assert!(Prompt::Denied.is_error());
/// assert!(!Prompt::Asking.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Terminal phases accept no further transitions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Error phases are usually also final, but this is not enforced.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Signal {
        Searching,
        Locked,
        Lost,
    }

    impl State for Signal {
        fn name(&self) -> &str {
            match self {
                Self::Searching => "Searching",
                Self::Locked => "Locked",
                Self::Lost => "Lost",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Lost)
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Lost)
        }
    }

    #[test]
    fn defaults_are_non_final_and_non_error() {
        #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
        struct Idle;

        impl State for Idle {
            fn name(&self) -> &str {
                "Idle"
            }
        }

        assert!(!Idle.is_final());
        assert!(!Idle.is_error());
    }

    #[test]
    fn overrides_are_respected() {
        assert_eq!(Signal::Locked.name(), "Locked");
        assert!(!Signal::Searching.is_final());
        assert!(!Signal::Locked.is_error());
        assert!(Signal::Lost.is_final());
        assert!(Signal::Lost.is_error());
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&Signal::Locked).unwrap();
        let back: Signal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Signal::Locked);
    }
}
