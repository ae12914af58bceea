//! Match state, the effect pipeline and the turn structure

pub mod actions;
pub mod combat;
pub mod context;
pub mod dispatch;
pub mod event;
pub mod phase;
pub mod prompt;
pub mod properties;
pub mod runner;
pub mod state;
pub mod view;

pub use context::{Context, Effect};
pub use event::Event;
pub use phase::{Step, TurnStructure};
pub use prompt::{PromptReply, PromptSender};
pub use runner::{MatchHandle, MatchStatus};
pub use state::{Match, MatchOutcome, MatchSetup};
pub use view::{CardFace, CardState, PlayerState};
