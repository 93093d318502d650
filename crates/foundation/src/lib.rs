pub mod ids;
pub mod profile;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use ids::*;
pub use profile::*;
pub use time::*;
