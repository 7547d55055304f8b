//! Toolkit-independent state behind the picker window.
//!
//! The window only renders what this holds: the dropdown entries, the current
//! selection and a single status line. Transitions are
//! `Loading -> Populated` or `Loading -> Failed`; the first outcome wins.

use tracing::{info, warn};

use crate::error::PickerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Populated,
    Failed,
}

/// What the label under the dropdown shows. Never both a selection and an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Loading,
    Selected(String),
    Error(String),
}

#[derive(Debug)]
pub struct Picker {
    phase: Phase,
    countries: Vec<String>,
    selected: Option<String>,
    status: StatusLine,
    initial_selection: Option<String>,
}

impl Picker {
    pub fn new(initial_selection: Option<String>) -> Self {
        Self {
            phase: Phase::Loading,
            countries: Vec::new(),
            selected: None,
            status: StatusLine::Loading,
            initial_selection: initial_selection.filter(|s| !s.is_empty()),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Feeds the background fetch result in. Only the first call has effect.
    pub fn apply_outcome(&mut self, outcome: Result<Vec<String>, PickerError>) {
        if self.phase != Phase::Loading {
            warn!("Ignoring fetch outcome, picker already left the loading state");
            return;
        }

        match outcome {
            Ok(countries) if countries.is_empty() => self.fail(PickerError::EmptyResult),
            Ok(countries) => self.populate(countries),
            Err(err) => self.fail(err),
        }
    }

    /// User picked an entry. Names not in the dropdown are ignored.
    pub fn select(&mut self, name: &str) -> bool {
        if !self.countries.iter().any(|c| c == name) {
            return false;
        }
        self.selected = Some(name.to_string());
        self.status = StatusLine::Selected(name.to_string());
        true
    }

    fn populate(&mut self, countries: Vec<String>) {
        info!("Loaded {} countries", countries.len());
        self.countries = countries;
        self.phase = Phase::Populated;

        let choice = match self.initial_selection.as_deref() {
            Some(requested) => match find_country(&self.countries, requested) {
                Some(found) => Ok(found.to_string()),
                None => Err(PickerError::SelectionNotFound(requested.to_string())),
            },
            // same as a combo box's default current item
            None => Ok(self.countries[0].clone()),
        };

        match choice {
            Ok(name) => {
                self.select(&name);
            }
            Err(err) => {
                warn!("{}", err);
                self.selected = None;
                self.status = StatusLine::Error(err.to_string());
            }
        }
    }

    fn fail(&mut self, err: PickerError) {
        self.phase = Phase::Failed;
        self.countries.clear();
        self.selected = None;
        self.status = StatusLine::Error(err.to_string());
    }
}

/// Case-insensitive exact match; returns the list's own spelling.
pub fn find_country<'a>(countries: &'a [String], requested: &str) -> Option<&'a str> {
    let wanted = requested.to_lowercase();
    countries
        .iter()
        .find(|c| c.to_lowercase() == wanted)
        .map(String::as_str)
}
