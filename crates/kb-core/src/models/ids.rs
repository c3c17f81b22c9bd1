use serde::{Deserialize, Serialize};

/// Integer primary keys as issued by the board service, wrapped so that a
/// column id can never be passed where a task id is expected.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(BoardId);
id_type!(ColumnId);
id_type!(TaskId);
id_type!(UserId);
id_type!(
    /// Freelance order a chat thread belongs to
    OrderId
);
id_type!(MessageId);
id_type!(ProposalId);
