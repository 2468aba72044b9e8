use std::sync::Mutex;
use crate::config::NavigationConfig;

/// Views a flow can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Login,
    Landing,
    ScanSubmission,
    Summary { scan_id: String },
    /// A location handed back by the API, followed verbatim.
    External(String),
}

impl Destination {
    pub fn path(&self, nav: &NavigationConfig) -> String {
        match self {
            Destination::Login => nav.login.clone(),
            Destination::Landing => nav.landing.clone(),
            Destination::ScanSubmission => "/scanner/automatic-scanner".to_string(),
            Destination::Summary { scan_id } => format!("/scanner/summary-report?scanId={}", scan_id),
            Destination::External(location) => location.clone(),
        }
    }
}

/// Navigation side effects requested by flow controllers.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: Destination);

    /// Return to the previous view, if there is one.
    fn back(&self) -> Option<Destination>;
}

/// Navigator backed by an in-process history stack.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    stack: Mutex<Vec<Destination>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(initial: Destination) -> Self {
        Self {
            stack: Mutex::new(vec![initial]),
        }
    }

    pub fn current(&self) -> Option<Destination> {
        self.stack.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }

    pub fn history(&self) -> Vec<Destination> {
        self.stack.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, to: Destination) {
        tracing::debug!(destination = ?to, "Navigating");
        self.stack.lock().unwrap_or_else(|e| e.into_inner()).push(to);
    }

    fn back(&self) -> Option<Destination> {
        let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        if stack.len() < 2 {
            return None;
        }
        stack.pop();
        stack.last().cloned()
    }
}
