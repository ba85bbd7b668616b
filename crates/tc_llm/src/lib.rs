pub mod error;
pub mod provider;
pub mod turn;

pub use error::Error;
pub use provider::{ChatRequest, FragmentStream, Provider, available_models};
pub use turn::{TurnEnd, TurnOutcome, run_turn};
