//! Application state for the interactive guide: active tab, theme and checklist progress.
//!
//! State changes go through the pure [`reduce`] function. Persistence is explicit: load once
//! with [`AppState::load`], save after every change with [`AppState::save`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::Serialize;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Store key holding the completed checklist ids as a JSON array.
pub const CHECKLIST_KEY: &str = "mcf-fsa-checklist";
/// Store key holding `"true"` or `"false"`.
pub const DARK_MODE_KEY: &str = "mcf_dark_mode";
/// Store key holding the active tab id.
pub const ACTIVE_TAB_KEY: &str = "mcf-active-tab";

/// Topic tabs of the guide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// What an FSA ID is.
    #[default]
    Overview,
    /// Interactive creation checklist.
    Checklist,
    /// Troubleshooting flowchart.
    Troubleshooting,
    /// Security tips.
    Security,
}

impl Tab {
    /// Tabs in display order.
    pub const ALL: [Tab; 4] = [
        Self::Overview,
        Self::Checklist,
        Self::Troubleshooting,
        Self::Security,
    ];

    /// Identifier used on the command line and in the store.
    pub fn id(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Checklist => "checklist",
            Self::Troubleshooting => "troubleshooting",
            Self::Security => "security",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Checklist => "Creation Checklist",
            Self::Troubleshooting => "Troubleshooting",
            Self::Security => "Security Tips",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown tab '{value}'"))
    }
}

/// One entry of the interactive checklist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Stable identifier, persisted in the store.
    pub id: u8,
    /// Short title.
    pub title: &'static str,
    /// Explanation shown under the title.
    pub description: &'static str,
}

/// The interactive checklist.
pub const CHECKLIST_ITEMS: [ChecklistItem; 8] = [
    ChecklistItem {
        id: 1,
        title: "Gather Required Information",
        description: "Collect your Social Security Number, full legal name, date of birth, and a valid email address.",
    },
    ChecklistItem {
        id: 2,
        title: "Choose a Strong Username",
        description: "Select a username that's easy to remember but unique. It will be your login for all federal student aid systems.",
    },
    ChecklistItem {
        id: 3,
        title: "Create a Secure Password",
        description: "Use at least 8 characters with a mix of letters, numbers, and symbols. Avoid personal information.",
    },
    ChecklistItem {
        id: 4,
        title: "Verify Email Address",
        description: "Use an email address you check regularly. You'll receive important notifications here.",
    },
    ChecklistItem {
        id: 5,
        title: "Set Up Challenge Questions",
        description: "Choose questions and answers that only you would know. These help recover your account if needed.",
    },
    ChecklistItem {
        id: 6,
        title: "Review Personal Information",
        description: "Double-check that your name matches your Social Security card exactly.",
    },
    ChecklistItem {
        id: 7,
        title: "Submit and Verify",
        description: "Submit your application and check your email for verification instructions.",
    },
    ChecklistItem {
        id: 8,
        title: "Test Your FSA ID",
        description: "Log in to fafsa.gov to ensure everything works correctly before using it for applications.",
    },
];

/// Looks up a checklist item by id.
pub fn checklist_item(id: u8) -> Option<&'static ChecklistItem> {
    CHECKLIST_ITEMS.iter().find(|item| item.id == id)
}

/// State changes the user can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Shows another tab.
    SelectTab(Tab),
    /// Flips the theme.
    ToggleDarkMode,
    /// Sets the theme explicitly.
    SetDarkMode(bool),
    /// Checks or unchecks a checklist item.
    ToggleItem(u8),
    /// Unchecks everything.
    ResetChecklist,
}

/// Everything the guide remembers between runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AppState {
    /// Visible tab.
    pub active_tab: Tab,
    /// Dark theme enabled.
    pub dark_mode: bool,
    /// Ids of checked items.
    pub completed: BTreeSet<u8>,
}

/// Applies `action` and returns the new state.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SelectTab(tab) => next.active_tab = tab,
        Action::ToggleDarkMode => next.dark_mode = !state.dark_mode,
        Action::SetDarkMode(enabled) => next.dark_mode = enabled,
        Action::ToggleItem(id) => {
            if checklist_item(id).is_none() {
                warn!("Ignoring unknown checklist item {id}");
            } else if !next.completed.remove(&id) {
                next.completed.insert(id);
            }
        }
        Action::ResetChecklist => next.completed.clear(),
    }
    next
}

impl AppState {
    /// Percentage of checked items, rounded to the nearest integer.
    pub fn progress(&self) -> u8 {
        let total = CHECKLIST_ITEMS.len() as f64;
        ((self.completed.len() as f64 / total) * 100.0).round() as u8
    }

    /// Whether every checklist item is checked.
    pub fn all_complete(&self) -> bool {
        CHECKLIST_ITEMS
            .iter()
            .all(|item| self.completed.contains(&item.id))
    }

    /// Reads the state from `store`, falling back to defaults for missing or unreadable values.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut state = Self::default();

        if let Some(raw) = store.get(CHECKLIST_KEY) {
            match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
                Ok(ids) => state.completed = ids.iter().filter_map(known_item_id).collect(),
                Err(err) => warn!("Ignoring corrupt checklist state: {err}"),
            }
        }

        if let Some(raw) = store.get(DARK_MODE_KEY) {
            state.dark_mode = raw == "true";
        }

        if let Some(raw) = store.get(ACTIVE_TAB_KEY) {
            match raw.parse() {
                Ok(tab) => state.active_tab = tab,
                Err(err) => warn!("Ignoring stored tab: {err}"),
            }
        }

        state
    }

    /// Writes the state to `store`.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let checklist =
            serde_json::to_string(&self.completed).map_err(|source| StoreError::Encode {
                key: CHECKLIST_KEY.to_string(),
                source,
            })?;
        store.set(CHECKLIST_KEY, checklist)?;
        store.set(DARK_MODE_KEY, self.dark_mode.to_string())?;
        store.set(ACTIVE_TAB_KEY, self.active_tab.id().to_string())
    }
}

/// Accepts a stored id only when it names one of the checklist items.
fn known_item_id(value: &serde_json::Value) -> Option<u8> {
    let id = value
        .as_u64()
        .and_then(|id| u8::try_from(id).ok())
        .filter(|id| checklist_item(*id).is_some());
    if id.is_none() {
        warn!("Dropping unknown checklist id {value}");
    }
    id
}
