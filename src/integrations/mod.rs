//! External service integrations.

pub mod claims_client {
    pub use crate::claims_client::*;
}

pub mod fixtures {
    pub use crate::fixtures::*;
}
