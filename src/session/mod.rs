pub mod clock;
pub mod state;
pub mod store;
pub mod file;

pub use clock::{Clock, ManualClock, SystemClock};
pub use state::Session;
pub use store::{MemorySessionStore, SessionStore};
pub use file::FileSessionStore;
