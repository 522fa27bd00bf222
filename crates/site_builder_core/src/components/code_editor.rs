//! crates/site_builder_core/src/components/code_editor.rs
//!
//! Tabbed HTML/CSS/JS editor.
//!
//! Sections are edited independently and nothing is persisted per
//! keystroke; `save` hands the whole triple to the caller.

use crate::domain::CodeState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorTab {
    #[default]
    Html,
    Css,
    Js,
}

impl EditorTab {
    pub fn label(self) -> &'static str {
        match self {
            EditorTab::Html => "HTML",
            EditorTab::Css => "CSS",
            EditorTab::Js => "JavaScript",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeEditor {
    initial: CodeState,
    current: CodeState,
    active: EditorTab,
}

impl CodeEditor {
    pub fn new(initial: &CodeState) -> Self {
        Self {
            initial: initial.clone(),
            current: initial.clone(),
            active: EditorTab::default(),
        }
    }

    /// Adopts new initial values. Edits are discarded only when the
    /// initial values actually changed.
    pub fn reseed(&mut self, initial: &CodeState) {
        if &self.initial == initial {
            return;
        }
        self.initial = initial.clone();
        self.current = initial.clone();
    }

    pub fn active(&self) -> EditorTab {
        self.active
    }

    pub fn select(&mut self, tab: EditorTab) {
        self.active = tab;
    }

    pub fn text(&self, tab: EditorTab) -> &str {
        match tab {
            EditorTab::Html => &self.current.html,
            EditorTab::Css => &self.current.css,
            EditorTab::Js => &self.current.js,
        }
    }

    pub fn edit(&mut self, tab: EditorTab, text: impl Into<String>) {
        let text = text.into();
        match tab {
            EditorTab::Html => self.current.html = text,
            EditorTab::Css => self.current.css = text,
            EditorTab::Js => self.current.js = text,
        }
    }

    pub fn is_dirty(&self, tab: EditorTab) -> bool {
        match tab {
            EditorTab::Html => self.current.html != self.initial.html,
            EditorTab::Css => self.current.css != self.initial.css,
            EditorTab::Js => self.current.js != self.initial.js,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.current != self.initial
    }

    pub fn snapshot(&self) -> CodeState {
        self.current.clone()
    }

    /// Passes the full current triple to `on_save` and returns its result.
    pub fn save<R>(&self, on_save: impl FnOnce(CodeState) -> R) -> R {
        on_save(self.snapshot())
    }
}
