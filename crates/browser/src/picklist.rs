//! Multi-select dropdown state.
//!
//! Holds a local copy of the options it was given, tracks which are selected,
//! and reports every change as a [`SelectionChanged`] for the host to route.

use serde::{Deserialize, Serialize};

use shelfview_catalog::FacetOption;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl PicklistOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Clicking an item asks for its selection to flip.
    pub fn click(&self) -> ItemToggle {
        ItemToggle {
            value: self.value.clone(),
            selected: !self.selected,
        }
    }
}

impl From<FacetOption> for PicklistOption {
    fn from(option: FacetOption) -> Self {
        Self {
            value: option.value,
            label: option.label,
            selected: option.selected,
        }
    }
}

/// Request from a single item to set its selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemToggle {
    pub value: String,
    pub selected: bool,
}

/// Emitted after every selection change with the full current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChanged {
    pub name: String,
    pub selected: Vec<PicklistOption>,
}

impl SelectionChanged {
    pub fn values(&self) -> Vec<String> {
        self.selected.iter().map(|o| o.value.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picklist {
    name: String,
    placeholder: String,
    disabled: bool,
    single_select: bool,
    options: Vec<PicklistOption>,
    loaded: bool,
    open: bool,
}

impl Picklist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            placeholder: "Select an Option".to_string(),
            disabled: false,
            single_select: false,
            options: Vec::new(),
            loaded: false,
            open: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn single_select(mut self) -> Self {
        self.single_select = true;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[PicklistOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Take a fresh copy of `options` on first use or when their count
    /// changed; otherwise keep the local selection state.
    pub fn load_options(&mut self, options: Vec<PicklistOption>) {
        if !self.loaded || self.options.len() != options.len() {
            self.options = options;
            self.loaded = true;
        }
    }

    /// Input click: refresh options, then flip open/closed.
    pub fn click(&mut self, options: Vec<PicklistOption>) {
        if self.disabled {
            return;
        }
        self.load_options(options);
        if self.open {
            self.close();
        } else {
            self.open = true;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Set `value`'s selection; single-select mode clears the others first.
    pub fn select(&mut self, value: &str, selected: bool) -> SelectionChanged {
        if self.single_select {
            self.options.iter_mut().for_each(|o| o.selected = false);
        }
        for option in self.options.iter_mut().filter(|o| o.value == value) {
            option.selected = selected;
        }
        self.selection_changed()
    }

    pub fn apply(&mut self, toggle: &ItemToggle) -> SelectionChanged {
        self.select(&toggle.value, toggle.selected)
    }

    /// Remove the `index`-th selected pill.
    pub fn remove(&mut self, index: usize) -> Option<SelectionChanged> {
        let value = self.selected_options().get(index)?.value.clone();
        Some(self.select(&value, false))
    }

    pub fn selected_options(&self) -> Vec<&PicklistOption> {
        self.options.iter().filter(|o| o.selected).collect()
    }

    pub fn has_selection(&self) -> bool {
        self.options.iter().any(|o| o.selected)
    }

    /// Text shown in the closed input.
    pub fn summary(&self) -> String {
        let selected = self.selected_options();
        match selected.len() {
            0 => self.placeholder.clone(),
            1 | 2 => selected
                .iter()
                .map(|o| o.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            n => format!("{n} Options Selected"),
        }
    }

    fn selection_changed(&self) -> SelectionChanged {
        SelectionChanged {
            name: self.name.clone(),
            selected: self.selected_options().into_iter().cloned().collect(),
        }
    }
}
