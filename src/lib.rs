pub mod directory;
pub mod engine;
pub mod model;
pub mod notify;
pub mod observability;
pub mod reports;
pub mod seed;
