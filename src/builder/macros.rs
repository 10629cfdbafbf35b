//! Macros for ergonomic action definitions.

/// Generate an enum of unit actions implementing [`Action`](crate::core::Action).
///
/// Each variant's kind is its name, unless a string tag is given with
/// `= "TAG"`.
///
/// # Example
///
/// ```
/// use tally::action_enum;
/// use tally::core::Action;
///
/// action_enum! {
///     pub enum NoiseAction {
///         Scream = "SCREAM",
///         Silence = "SILENCE",
///         Murmur,
///     }
/// }
///
/// assert_eq!(NoiseAction::Scream.kind(), "SCREAM");
/// assert_eq!(NoiseAction::Murmur.kind(), "Murmur");
/// ```
#[macro_export]
macro_rules! action_enum {
    (@kind $variant:ident) => {
        stringify!($variant)
    };
    (@kind $variant:ident $tag:literal) => {
        $tag
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $tag:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Action for $name {
            fn kind(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::action_enum!(@kind $variant $($tag)?)),*
                }
            }
        }
    };
}
