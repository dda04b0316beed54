//! What a command did, and how it is printed.

use console::Style;
use serde::Serialize;
use theme_toggle::{Glyph, Page, PreferenceStore, Scheduler, ThemeController, ThemeMode};

use crate::cli::OutputMode;

/// The effect of the executed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Loaded,
    Toggled { to: ThemeMode, steps: usize },
    System { scheme: ThemeMode, applied: bool },
    Cleared,
}

/// Page state after a command.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mode: ThemeMode,
    pub stored: Option<ThemeMode>,
    pub glyph: Option<Glyph>,
    pub store_path: String,
    #[serde(flatten)]
    pub event: Event,
}

impl Report {
    pub fn capture<S, P, T>(
        controller: &ThemeController<S, P, T>,
        store_path: String,
        event: Event,
    ) -> Self
    where
        S: PreferenceStore,
        P: Page,
        T: Scheduler,
    {
        Self {
            mode: controller.current_mode(),
            stored: controller.stored_mode(),
            glyph: controller.toggle_view().map(|view| view.glyph),
            store_path,
            event,
        }
    }

    /// Renders the report for humans, styled or not.
    pub fn to_text(&self, styled: bool) -> String {
        let accent = paint(Style::new().cyan().bold(), styled);
        let muted = paint(Style::new().dim(), styled);

        let mut lines = Vec::new();
        match &self.event {
            Event::Loaded => {}
            Event::Toggled { to, .. } => lines.push(format!("switched to {}", accent(to.as_str()))),
            Event::System {
                scheme,
                applied: true,
            } => lines.push(format!("following system scheme: {}", accent(scheme.as_str()))),
            Event::System {
                scheme,
                applied: false,
            } => lines.push(format!(
                "system scheme {} ignored {}",
                scheme,
                muted("(explicit preference stored)")
            )),
            Event::Cleared => lines.push("stored preference cleared".to_string()),
        }

        let source = match self.stored {
            Some(_) => "stored",
            None => "not stored",
        };
        lines.push(format!("theme: {} {}", accent(self.mode.as_str()), muted(&format!("({})", source))));
        if let Some(glyph) = self.glyph {
            lines.push(format!("toggle: {} {}", glyph.symbol(), muted(glyph.icon_class())));
        }
        lines.push(format!("store: {}", muted(&self.store_path)));
        lines.join("\n")
    }

    pub fn render(&self, mode: OutputMode) -> Result<String, serde_json::Error> {
        match mode {
            OutputMode::Json => serde_json::to_string_pretty(self),
            OutputMode::Term => Ok(self.to_text(true)),
            OutputMode::Text => Ok(self.to_text(false)),
            OutputMode::Auto => Ok(self.to_text(console::colors_enabled())),
        }
    }
}

fn paint(style: Style, styled: bool) -> impl Fn(&str) -> String {
    let style = style.force_styling(true);
    move |text: &str| {
        if styled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
