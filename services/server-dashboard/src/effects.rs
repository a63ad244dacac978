//! Host environment effects the pipeline triggers
//!
//! The dialog, form and print integration live behind this trait so the
//! pipeline itself has no environment dependency.

use crate::report::render_report;
use crate::server::ServerForm;
use crate::view::ViewState;

/// Side effects on the surrounding user interface
#[cfg_attr(test, mockall::automock)]
pub trait UiEffects: Send + Sync {
    /// Close the add-server dialog
    fn close_modal(&self);

    /// Reset the add-server form to the given values
    fn reset_form(&self, form: &ServerForm);

    /// Print the given view through the host's print facility
    fn print_report(&self, view: &ViewState);
}

/// Effects for a terminal host: there is no dialog or form, printing writes a table to stdout
#[derive(Debug)]
pub struct TerminalEffects {
    title: String,
}

impl TerminalEffects {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl UiEffects for TerminalEffects {
    fn close_modal(&self) {
        tracing::debug!("Closing add-server dialog");
    }

    fn reset_form(&self, form: &ServerForm) {
        tracing::debug!("Resetting add-server form (status {})", form.status);
    }

    fn print_report(&self, view: &ViewState) {
        println!("{}", render_report(&self.title, view));
    }
}
