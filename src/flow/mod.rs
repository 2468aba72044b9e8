pub mod navigator;
pub mod progress;
pub mod login;
pub mod scan;
pub mod summary;

pub use navigator::{Destination, HistoryNavigator, Navigator};
pub use progress::ProgressTicker;
pub use login::{LoginController, LoginState};
pub use scan::{ScanController, ScanState};
pub use summary::{SummaryController, SummaryState};
