//! Range clause tree for version matching

pub mod constraint;
mod constraint_interface;
mod match_all;
mod match_none;
mod multi_constraint;
mod operator;
mod range;

pub use constraint::Constraint;
pub use constraint_interface::ConstraintInterface;
pub use match_all::MatchAllConstraint;
pub use match_none::MatchNoneConstraint;
pub use multi_constraint::{MultiConstraint, MultiConstraintError};
pub use operator::Operator;
pub use range::Range;
