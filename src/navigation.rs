//! Section navigation state machine.
//!
//! The whole scene reads one `NavState` per frame. `Navigator` is the only
//! writer: it applies user intents (select / back / scroll into or out of the
//! detail page) and refuses everything until the loading phase has revealed
//! the scene.
//!
//! ```text
//!            select(X)                 scroll down (debounced)
//!   Center ───────────▶ X(3D) ─────────────────────────────▶ X(2D)
//!     ▲                  ▲  ◀───────────────────────────────   │
//!     │                  │     scroll up at panel top          │
//!     └──── back ────────┴─────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Portfolio section identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    About,
    Projects,
    Skills,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::About,
        Section::Projects,
        Section::Skills,
        Section::Contact,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Contact => "Contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// How an active section is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Camera framing the section inside the 3D scene.
    #[default]
    ThreeD,
    /// Full-page scrollable detail view.
    TwoD,
}

/// Navigation state. `Center` is always presented in 3D, so the detail
/// view cannot exist without a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Center,
    Section { section: Section, view: ViewMode },
}

impl NavState {
    pub fn active_section(&self) -> Option<Section> {
        match *self {
            NavState::Center => None,
            NavState::Section { section, .. } => Some(section),
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        match *self {
            NavState::Center => ViewMode::ThreeD,
            NavState::Section { view, .. } => view,
        }
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active_section() == Some(section)
    }
}

/// User intent fed into the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    /// Nav button, satellite click, or core click.
    Select(Section),
    /// The explicit "Back to Center" control.
    Back,
    /// Scroll gesture asking for the 2D detail page.
    EnterDetail,
    /// Scroll gesture asking to return to the 3D scene.
    LeaveDetail,
}

/// Outcome of applying an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed { from: NavState, to: NavState },
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The loading phase has not revealed the scene yet.
    Locked,
    /// The intent does not apply to the current state.
    NotApplicable,
    /// The intent would not change anything.
    Unchanged,
}

/// Owner of the navigation state.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavState,
    unlocked: bool,
}

impl Navigator {
    /// Initial state: `Center(3D)`, locked.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Accept transitions from now on. Called once at reveal.
    pub fn unlock(&mut self) {
        self.unlocked = true;
    }

    pub fn apply(&mut self, intent: NavIntent) -> Transition {
        if !self.unlocked {
            log::debug!("navigation locked, ignoring {:?}", intent);
            return Transition::Ignored(IgnoreReason::Locked);
        }

        let from = self.state;
        let to = match (intent, from) {
            (NavIntent::Select(section), _) => NavState::Section {
                section,
                view: ViewMode::ThreeD,
            },
            (NavIntent::Back, NavState::Center) => {
                return Transition::Ignored(IgnoreReason::Unchanged);
            }
            (NavIntent::Back, NavState::Section { .. }) => NavState::Center,
            (
                NavIntent::EnterDetail,
                NavState::Section {
                    section,
                    view: ViewMode::ThreeD,
                },
            ) => NavState::Section {
                section,
                view: ViewMode::TwoD,
            },
            (
                NavIntent::LeaveDetail,
                NavState::Section {
                    section,
                    view: ViewMode::TwoD,
                },
            ) => NavState::Section {
                section,
                view: ViewMode::ThreeD,
            },
            (NavIntent::EnterDetail | NavIntent::LeaveDetail, _) => {
                log::debug!("{:?} not applicable in {:?}", intent, from);
                return Transition::Ignored(IgnoreReason::NotApplicable);
            }
        };

        if to == from {
            return Transition::Ignored(IgnoreReason::Unchanged);
        }

        self.state = to;
        log::info!("navigation {:?} -> {:?}", from, to);
        Transition::Changed { from, to }
    }
}
