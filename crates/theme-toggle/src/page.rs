//! The page surface the controller drives.
//!
//! A [`Page`] exposes the three things a theme toggle touches: attributes on
//! the root element, the root's transition style, and the body the toggle
//! control is appended to. [`MemoryPage`] is a plain model of that surface.

use std::collections::BTreeMap;

use crate::theme::Glyph;

/// Rendered state of the toggle control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleView {
    pub class_name: String,
    /// Accessible label (`aria-label`)
    pub label: String,
    pub glyph: Glyph,
    /// Rotation in degrees; 360 while the swap animation runs
    pub rotation: u16,
}

impl ToggleView {
    pub fn new(class_name: &str, label: &str, glyph: Glyph) -> Self {
        Self {
            class_name: class_name.to_string(),
            label: label.to_string(),
            glyph,
            rotation: 0,
        }
    }

    /// Inline `transform` style for the current rotation.
    pub fn transform(&self) -> String {
        format!("rotate({}deg)", self.rotation)
    }

    /// Markup for the control as it would appear in the body.
    pub fn to_html(&self) -> String {
        format!(
            r#"<button class="{}" aria-label="{}" style="transform: {}">{}</button>"#,
            self.class_name,
            self.label,
            self.transform(),
            self.glyph.to_html()
        )
    }
}

/// The document a controller applies themes to.
pub trait Page {
    /// Reads an attribute of the root element.
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Writes an attribute of the root element.
    fn set_root_attribute(&mut self, name: &str, value: &str);

    /// Sets (or with `None`, clears) the root element's `transition` style.
    fn set_root_transition(&mut self, transition: Option<&str>);

    /// Appends the toggle control as the last child of the body.
    fn append_toggle(&mut self, view: &ToggleView);

    /// Re-renders the previously appended toggle control.
    fn update_toggle(&mut self, view: &ToggleView);
}

/// An in-memory page model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPage {
    attributes: BTreeMap<String, String>,
    transition: Option<String>,
    toggles: Vec<ToggleView>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root transition style, if set.
    pub fn transition(&self) -> Option<&str> {
        self.transition.as_deref()
    }

    /// Toggle controls in the body, in append order.
    pub fn toggles(&self) -> &[ToggleView] {
        &self.toggles
    }

    /// Renders the root element with its attributes and body.
    pub fn to_html(&self) -> String {
        let mut attrs = String::new();
        for (name, value) in &self.attributes {
            attrs.push_str(&format!(r#" {}="{}""#, name, value));
        }
        if let Some(transition) = &self.transition {
            attrs.push_str(&format!(r#" style="transition: {}""#, transition));
        }
        let body: String = self.toggles.iter().map(ToggleView::to_html).collect();
        format!("<html{}><body>{}</body></html>", attrs, body)
    }
}

impl Page for MemoryPage {
    fn root_attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn set_root_transition(&mut self, transition: Option<&str>) {
        self.transition = transition.map(str::to_string);
    }

    fn append_toggle(&mut self, view: &ToggleView) {
        self.toggles.push(view.clone());
    }

    fn update_toggle(&mut self, view: &ToggleView) {
        if let Some(last) = self.toggles.last_mut() {
            *last = view.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_view_html() {
        let mut view = ToggleView::new("theme-toggle", "Toggle theme", Glyph::Moon);
        view.rotation = 360;
        assert_eq!(
            view.to_html(),
            r#"<button class="theme-toggle" aria-label="Toggle theme" style="transform: rotate(360deg)"><i class="fas fa-moon"></i></button>"#
        );
    }

    #[test]
    fn test_memory_page_attributes() {
        let mut page = MemoryPage::new();
        assert_eq!(page.root_attribute("data-theme"), None);
        page.set_root_attribute("data-theme", "dark");
        assert_eq!(page.root_attribute("data-theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_memory_page_update_without_toggle_is_noop() {
        let mut page = MemoryPage::new();
        page.update_toggle(&ToggleView::new("t", "l", Glyph::Sun));
        assert!(page.toggles().is_empty());
    }

    #[test]
    fn test_memory_page_html() {
        let mut page = MemoryPage::new();
        page.set_root_attribute("data-theme", "light");
        page.set_root_transition(Some("color 0.5s ease"));
        page.append_toggle(&ToggleView::new("theme-toggle", "Toggle theme", Glyph::Moon));

        let html = page.to_html();
        assert!(html.starts_with(r#"<html data-theme="light" style="transition: color 0.5s ease">"#));
        assert!(html.contains("fa-moon"));
    }
}
