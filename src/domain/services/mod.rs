pub mod aggregation;
pub mod geometry;

pub use aggregation::{aggregate, total_hours};
pub use geometry::{compute_slices, percentage, PALETTE_SIZE};
