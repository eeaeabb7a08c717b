/*!
The stochastic local search core: initialization, flip selection, the outer solve loop, and
post-feasibility optimization (§4.2–§4.3).
*/

mod initialize;
mod optimize;
mod select;
mod solve;

pub use optimize::optimize;
pub use solve::{solve, FeasibleVerdict, SolveOutcome};
