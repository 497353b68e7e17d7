pub mod markup;
pub mod outcome;
pub mod preferences;
pub mod render;
pub mod search;
pub mod state;

pub use search::{PendingSearch, SearchClient};
pub use state::{ClientState, Completion, SearchState};
