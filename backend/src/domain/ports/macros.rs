//! Generates the error enums returned by repository ports.
//!
//! Every repository fails in one of two ways: the pool could not hand out a
//! connection, or a statement failed once connected. The macro stamps out
//! that pair with a per-port subject in the message, plus `&str`-friendly
//! constructors for the adapters' error mappers.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident for $subject:literal
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// A pooled connection could not be checked out.
            #[error("{subject} connection failed: {message}", subject = $subject)]
            Connection { message: String },
            /// A query or mutation failed after the connection was acquired.
            #[error("{subject} query failed: {message}", subject = $subject)]
            Query { message: String },
        }

        impl $name {
            pub fn connection(message: impl Into<String>) -> Self {
                Self::Connection {
                    message: message.into(),
                }
            }

            pub fn query(message: impl Into<String>) -> Self {
                Self::Query {
                    message: message.into(),
                }
            }
        }
    };
}

pub(crate) use define_port_error;
