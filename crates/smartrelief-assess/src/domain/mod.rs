//! Domain value objects.
//!
//! Every type here is produced by a pure function of its inputs and never
//! mutated afterwards. Bounded scores are clamped on construction.

pub mod damage;
pub mod disaster;
pub mod features;
pub mod infrastructure;
pub mod report;
pub mod resources;
pub mod scores;

pub use damage::*;
pub use disaster::*;
pub use features::*;
pub use infrastructure::*;
pub use report::*;
pub use resources::*;
pub use scores::*;
