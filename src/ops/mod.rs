pub mod prompt;
pub mod queue;
pub mod search_link;
pub mod session;

pub use queue::{FavouritesSet, SuggestionQueue};
pub use session::{Completion, Notice, RequestTicket, Session, SubmitError, SwipeOutcome, View};
