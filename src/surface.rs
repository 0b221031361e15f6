//! Page surface boundary.
//!
//! The submission pipeline never touches a rendering layer directly. It
//! drives a [`FormSurface`] injected at construction time: the set of form
//! inputs, the submit control, the status banner slot, and navigation that
//! the surrounding page must provide.

use crate::form::{Field, StatusMessage};
use log::*;
use std::collections::HashMap;

/// Boundary contract for the page hosting the login form.
///
/// Implementations own the actual widgets. The controller only ever holds
/// one surface and is the single writer of its submitting flag and banner
/// slot.
pub trait FormSurface: Send {
    /// Current value of the identifier input.
    fn read_identifier(&self) -> String;

    /// Current value of the password input.
    fn read_password(&self) -> String;

    /// Current state of the remember-me checkbox.
    fn read_remember(&self) -> bool;

    /// Write a (masked) value back into the identifier input.
    fn set_identifier(&mut self, value: &str);

    /// Attach an inline error to one field, replacing any previous one.
    fn set_field_error(&mut self, field: Field, message: &str);

    /// Detach the inline error from one field, if any.
    fn clear_field_error(&mut self, field: Field);

    /// Disable the submit control and swap its label while a request is in
    /// flight; restore it when the flag drops.
    fn set_submitting(&mut self, submitting: bool);

    /// Insert the status banner, evicting any previous one.
    fn show_status(&mut self, message: &StatusMessage);

    /// Remove the status banner, if any.
    fn clear_status(&mut self);

    /// Direct the page to the given target.
    fn navigate(&mut self, path: &str);

    /// Whether the form is still mounted. Side effects arriving after an
    /// unmount must not be applied.
    fn is_mounted(&self) -> bool;
}

/// Line-oriented surface backing the command line binary. Field values are
/// seeded up front, banner and navigation output go to stdout.
///
pub struct TerminalSurface {
    identifier: String,
    password: String,
    remember: bool,
    field_errors: HashMap<Field, String>,
    submitting: bool,
    mounted: bool,
}

impl TerminalSurface {
    /// Return a new surface seeded with the given field values.
    ///
    pub fn new(identifier: &str, password: &str, remember: bool) -> Self {
        TerminalSurface {
            identifier: identifier.to_string(),
            password: password.to_string(),
            remember,
            field_errors: HashMap::new(),
            submitting: false,
            mounted: true,
        }
    }

    /// Return the inline error currently attached to a field, if any.
    ///
    #[allow(dead_code)]
    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }
}

impl FormSurface for TerminalSurface {
    fn read_identifier(&self) -> String {
        self.identifier.clone()
    }

    fn read_password(&self) -> String {
        self.password.clone()
    }

    fn read_remember(&self) -> bool {
        self.remember
    }

    fn set_identifier(&mut self, value: &str) {
        self.identifier = value.to_string();
    }

    fn set_field_error(&mut self, field: Field, message: &str) {
        eprintln!("{:?}: {}", field, message);
        self.field_errors.insert(field, message.to_string());
    }

    fn clear_field_error(&mut self, field: Field) {
        self.field_errors.remove(&field);
    }

    fn set_submitting(&mut self, submitting: bool) {
        debug!("Submit control {}...", if submitting { "disabled" } else { "restored" });
        self.submitting = submitting;
    }

    fn show_status(&mut self, message: &StatusMessage) {
        println!("{}", message.text);
    }

    fn clear_status(&mut self) {
        // Printed lines cannot be retracted; nothing to remove.
    }

    fn navigate(&mut self, path: &str) {
        println!("Opening {}...", path);
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}
