//! Click event model for asynchronous click tracking.

use crate::domain::entities::NewClick;

/// A redirect observed by the HTTP layer, queued for the click worker.
///
/// Carries the resolved `link_id` so the worker never has to look the code up
/// again. Client metadata is optional since headers may be missing.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub code: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}

impl ClickEvent {
    pub fn new(
        link_id: i64,
        code: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            code,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }

    pub fn to_new_click(&self) -> NewClick {
        NewClick {
            link_id: self.link_id,
            user_agent: self.user_agent.clone(),
            referer: self.referer.clone(),
            ip: self.ip.clone(),
        }
    }
}
