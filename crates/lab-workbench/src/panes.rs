//! Pane state machine.
//!
//! Exactly one pane is active. Activating a pane hides the other surfaces,
//! shows the target, recomputes its layout and only then focuses it: a
//! hidden surface cannot take focus. The tab strip mirrors the active pane.

use lab_core::enums::Pane;

use crate::editor::Editor;

/// Owned mapping from pane to editor.
pub struct EditorRegistry {
    editors: [Box<dyn Editor>; 3],
}

impl EditorRegistry {
    #[must_use]
    pub fn new(markup: Box<dyn Editor>, style: Box<dyn Editor>, script: Box<dyn Editor>) -> Self {
        Self {
            editors: [markup, style, script],
        }
    }

    #[must_use]
    pub fn get(&self, pane: Pane) -> &dyn Editor {
        self.editors[pane.index()].as_ref()
    }

    pub fn get_mut(&mut self, pane: Pane) -> &mut dyn Editor {
        self.editors[pane.index()].as_mut()
    }
}

/// Rendered state of one tab control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabState {
    pub pane: Pane,
    pub selected: bool,
}

impl TabState {
    /// Value for the `aria-selected` attribute.
    #[must_use]
    pub const fn aria_selected(self) -> &'static str {
        if self.selected { "true" } else { "false" }
    }

    /// Roving tab index: only the selected tab is reachable with Tab.
    #[must_use]
    pub const fn tab_index(self) -> i8 {
        if self.selected { 0 } else { -1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed { from: Pane, to: Pane },
    Unchanged(Pane),
}

/// Active-pane owner.
pub struct PaneSwitcher {
    registry: EditorRegistry,
    active: Pane,
}

impl PaneSwitcher {
    /// Wrap `registry` and show the initial pane.
    #[must_use]
    pub fn new(registry: EditorRegistry) -> Self {
        let mut switcher = Self {
            registry,
            active: Pane::default(),
        };
        switcher.apply_effects();
        switcher
    }

    #[must_use]
    pub const fn active(&self) -> Pane {
        self.active
    }

    #[must_use]
    pub const fn registry(&self) -> &EditorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EditorRegistry {
        &mut self.registry
    }

    /// Move to `pane`. Re-activating the active pane changes nothing but
    /// still restores focus to it.
    pub fn activate(&mut self, pane: Pane) -> Transition {
        let from = self.active;
        self.active = pane;
        self.apply_effects();
        if from == pane {
            Transition::Unchanged(pane)
        } else {
            tracing::debug!(%from, to = %pane, "pane activated");
            Transition::Changed { from, to: pane }
        }
    }

    pub fn next(&mut self) -> Transition {
        self.activate(self.active.next())
    }

    pub fn previous(&mut self) -> Transition {
        self.activate(self.active.previous())
    }

    #[must_use]
    pub fn tabs(&self) -> [TabState; 3] {
        Pane::ORDER.map(|pane| TabState {
            pane,
            selected: pane == self.active,
        })
    }

    fn apply_effects(&mut self) {
        let active = self.active;
        for pane in Pane::ORDER {
            if pane != active {
                let editor = self.registry.get_mut(pane);
                editor.blur();
                editor.set_visible(false);
            }
        }
        let editor = self.registry.get_mut(active);
        editor.set_visible(true);
        editor.resize();
        if !editor.focus() {
            tracing::warn!(pane = %active, "active editor refused focus");
        }
    }
}
