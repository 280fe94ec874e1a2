//! Editing surfaces.

/// One pane's editing surface.
pub trait Editor: Send {
    fn text(&self) -> String;

    /// Replace the whole buffer.
    fn set_text(&mut self, text: &str);

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Recompute layout after becoming visible.
    fn resize(&mut self) {}

    /// Request keyboard focus. Hidden surfaces refuse; returns whether
    /// focus was taken.
    fn focus(&mut self) -> bool;

    fn blur(&mut self);

    fn has_focus(&self) -> bool;
}

/// In-memory editor.
#[derive(Debug, Clone, Default)]
pub struct BufferEditor {
    text: String,
    visible: bool,
    focused: bool,
}

impl BufferEditor {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Editor for BufferEditor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.focused = false;
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn focus(&mut self) -> bool {
        self.focused = self.visible;
        self.focused
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_editor_refuses_focus() {
        let mut editor = BufferEditor::new("x");
        assert!(!editor.focus());
        editor.set_visible(true);
        assert!(editor.focus());
        editor.set_visible(false);
        assert!(!editor.has_focus());
    }
}
