// Domain-layer modules and shared errors/models
pub mod ingestion {
    pub use crate::ingestion::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod normalizer {
    pub use crate::normalizer::*;
}

pub mod search {
    pub use crate::search::*;
}

pub mod stats {
    pub use crate::stats::*;
}

pub mod errors {
    pub use crate::errors::*;
}
