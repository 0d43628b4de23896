//! Domain models: users, subscriptions, dashboard stats.

/// Declares a closed enum whose wire and storage form is a fixed label.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    other => Err(format!("unknown {} `{}`", stringify!($name), other)),
                }
            }
        }
    };
}

pub mod dashboard;
pub mod subscription;
pub mod user;

pub use dashboard::DashboardStats;
pub use subscription::{
    Category, DurationLabel, NewSubscription, Subscription, SubscriptionPatch,
    SubscriptionStatus, SubscriptionType,
};
pub use user::{AccessLevel, LoginRequest, LoginResponse, NewUser, Role, User, UserPatch, UserRecord};
