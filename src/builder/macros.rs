//! Macros for declaring state enumerations.

/// Declare an enum together with its `State` and `Choices` impls.
///
/// Each variant carries its token and an optional label. Declaration order
/// is the ordinal order used by the adjacency fallback.
///
/// The expansion derives `serde::Serialize` and `serde::Deserialize` by
/// path, so the calling crate must depend on `serde` itself.
///
/// # Example
///
/// ```
/// use statefield::core::{Choices, State};
/// use statefield::state_enum;
///
/// state_enum! {
///     pub enum PaymentState {
///         Start = "start": "Payment started",
///         InitReceived = "init_data_received": "Init data received",
///         Done = "done",
///     }
/// }
///
/// assert_eq!(PaymentState::InitReceived.name(), "init_data_received");
/// assert_eq!(PaymentState::Start.label(), Some("Payment started"));
/// assert_eq!(PaymentState::Done.label(), None);
/// assert_eq!(PaymentState::members().len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $token:literal $(: $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $token)]
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $token),*
                }
            }

            fn label(&self) -> Option<&str> {
                match self {
                    $(Self::$variant => $crate::__state_label!($($label)?)),*
                }
            }
        }

        impl $crate::core::Choices for $name {
            fn members() -> Vec<Self> {
                vec![$(Self::$variant),*]
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __state_label {
    () => {
        None
    };
    ($label:literal) => {
        Some($label)
    };
}
