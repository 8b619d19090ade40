//! Dashboard: shorten a URL and list the user's links.

use super::Effect;
use super::session::View;
use crate::api::dto::links::{LinkResponse, ShortenRequest, ShortenResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    EditUrl(String),
    Submit,
    Created(ShortenResponse),
    Loaded(Vec<LinkResponse>),
    Failed(String),
    Logout,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub url_input: String,
    pub links: Vec<LinkResponse>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Link returned by the last successful submit.
    pub last_created: Option<ShortenResponse>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects to run when the dashboard is first shown.
    pub fn on_enter(mut self) -> (Self, Vec<Effect>) {
        self.is_loading = true;
        (self, vec![Effect::LoadLinks])
    }

    pub fn update(mut self, action: DashboardAction) -> (Self, Vec<Effect>) {
        match action {
            DashboardAction::EditUrl(value) => {
                self.url_input = value;
                (self, vec![])
            }
            DashboardAction::Submit => {
                if self.is_loading {
                    return (self, vec![]);
                }

                let url = self.url_input.trim();
                if url.is_empty() {
                    self.error = Some("Please enter a URL.".into());
                    return (self, vec![]);
                }

                let request = ShortenRequest {
                    original_url: url.to_string(),
                    custom_code: None,
                };
                self.is_loading = true;
                self.error = None;
                (self, vec![Effect::SendShorten(request)])
            }
            DashboardAction::Created(link) => {
                self.url_input.clear();
                self.last_created = Some(link);
                (self, vec![Effect::LoadLinks])
            }
            DashboardAction::Loaded(links) => {
                self.is_loading = false;
                self.links = links;
                (self, vec![])
            }
            DashboardAction::Failed(message) => {
                self.is_loading = false;
                self.error = Some(message);
                (self, vec![])
            }
            DashboardAction::Logout => (
                Self::default(),
                vec![Effect::ClearSession, Effect::Navigate(View::Login)],
            ),
        }
    }
}
