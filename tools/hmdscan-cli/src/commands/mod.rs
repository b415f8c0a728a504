pub mod identify;
pub mod scan;
pub mod snapshot;
pub mod variants;
