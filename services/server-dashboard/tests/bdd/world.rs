//! BDD test world for the server dashboard

use cucumber::World;
use server_dashboard::ViewState;

use crate::common::Harness;

#[derive(Debug, Default, World)]
pub struct DashboardWorld {
    pub harness: Option<Harness>,
    pub last_view: Option<ViewState>,
}

impl DashboardWorld {
    pub fn harness(&self) -> &Harness {
        self.harness.as_ref().expect("dashboard not set up")
    }
}
