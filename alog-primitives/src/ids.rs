//! Identifier types for events, traces, and spans.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn as_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::random()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::parse_str(s).map_err(Error::from)?;
                Ok(Self::from_uuid(uuid))
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for a single recorded event.
    EventId
}

uuid_id! {
    /// Identifier shared by every span belonging to one outermost
    /// instrumented call chain.
    TraceId
}

uuid_id! {
    /// Identifier for one instrumented call frame within a trace.
    SpanId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_trace_id() {
        let id = TraceId::random();
        let parsed = id.to_string().parse::<TraceId>().expect("parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn span_ids_are_unique() {
        let a = SpanId::random();
        let b = SpanId::random();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-uuid".parse::<EventId>().expect_err("should fail");
        assert!(matches!(err, Error::InvalidId { .. }));
    }

    #[test]
    fn serde_transparent() {
        let id = SpanId::random();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
