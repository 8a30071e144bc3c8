use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned string identities. An empty value means the entity has not
/// been persisted yet.
macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn is_assigned(&self) -> bool {
                !self.0.is_empty()
            }

            pub fn is_unassigned(&self) -> bool {
                !self.is_assigned()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(OrganizationId);
id_newtype!(TeamId);
id_newtype!(MemberId);
