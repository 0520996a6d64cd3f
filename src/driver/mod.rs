pub mod chrome;
pub mod scripts;

use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use chrome::ChromeDriver;

/// Point-in-time view of a live DOM node.
///
/// Widgets and waits only ever see snapshots; the selector is re-resolved
/// against the live page on every query, so nothing in the crate can hold a
/// stale node reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub tag_name: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub text: String,
    pub displayed: bool,
    pub enabled: bool,
    /// Checked state for checkboxes and radio inputs.
    #[serde(default)]
    pub selected: bool,
    /// Option values, populated only for `<select>` elements.
    #[serde(default)]
    pub option_values: Vec<String>,
}

impl ElementSnapshot {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Current `value` attribute, empty when unset.
    pub fn value(&self) -> String {
        self.attribute("value").unwrap_or_default().to_string()
    }

    pub fn is_interactable(&self) -> bool {
        self.displayed && self.enabled
    }
}

/// The browser session collaborator.
///
/// One instance drives one sequential stream of operations; the active query
/// context (top document vs. a frame) is session state, which is why
/// `enter_frame`/`exit_frame` live here rather than on an element handle.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// First match in DOM order, or `None`.
    async fn find_element(&self, selector: &str) -> Result<Option<ElementSnapshot>>;

    /// All matches in DOM order.
    async fn find_elements(&self, selector: &str) -> Result<Vec<ElementSnapshot>>;

    /// Click the first match. Callers are expected to have established
    /// interactability through a wait first.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Clear the text content of the first matching input.
    async fn clear(&self, selector: &str) -> Result<()>;

    /// Type into the first matching input without clearing it.
    async fn type_text(&self, selector: &str, text: &str) -> Result<()>;

    /// Choose the option with the given value on the first matching select.
    async fn select_option(&self, selector: &str, value: &str) -> Result<()>;

    async fn drag_to(&self, source_selector: &str, target_selector: &str) -> Result<()>;

    async fn drag_by_offset(&self, selector: &str, dx: i64, dy: i64) -> Result<()>;

    /// Switch the active query context into the frame matched by `selector`.
    async fn enter_frame(&self, selector: &str) -> Result<()>;

    /// Restore the active query context to the top document.
    async fn exit_frame(&self) -> Result<()>;

    async fn refresh(&self) -> Result<()>;

    async fn quit(&self) -> Result<()>;
}
