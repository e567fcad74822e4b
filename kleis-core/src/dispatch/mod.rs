//! Outcome dispatch
//!
//! A verification outcome becomes an [`ActionPlan`]: an ordered list of
//! bolt moves, screens and holds. The input task walks the plan, awaiting
//! each hold on its own timer, so the sequence itself stays host-testable.

pub mod plan;

pub use plan::{perform, ActionPlan, Outcome, Step, StepError, MAX_PLAN_STEPS};
