//! Compliance-metrics derivation for resolved ship records.

mod engine;
mod normalize;
mod remarks;

pub use engine::{COMPLIANT_FLAG, MetricsResult, NO_REMARK_SENTINEL, assess};
pub use normalize::{LEAF_DECIMALS, normalize, round_to};
pub use remarks::describe_flag_reason;
