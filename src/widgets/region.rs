use crate::errors::{AutomatorError, Result};
use crate::wait::{with_pause, ElementWait};
use crate::widgets::inputs::Button;
use crate::widgets::Widget;
use tracing::info;

/// A page area holding an ordered set of addable components.
///
/// `menu_items` is the region's declared component order; it exists only to
/// translate a component name into its 1-based menu position.
pub struct Region {
    wait: ElementWait,
    locator: String,
    menu: Button,
    menu_items: Vec<String>,
}

impl Region {
    pub fn new(wait: ElementWait, locator: impl Into<String>, menu_items: Vec<String>) -> Self {
        let locator = locator.into();
        Self {
            menu: Button::new(wait.clone(), format!("{locator} .panel-title .caret")),
            wait,
            locator,
            menu_items,
        }
    }

    pub fn menu_items(&self) -> &[String] {
        &self.menu_items
    }

    /// Add the named components: open the menu, click each component's entry
    /// at its declared position, close the menu. Open and close are the same
    /// toggle control clicked twice.
    pub async fn add_components<S: AsRef<str>>(&self, components: &[S]) -> Result<()> {
        info!(region = %self.locator, count = components.len(), "adding components");
        self.expand_menu().await?;
        for component in components {
            let name = component.as_ref();
            let position = self.menu_position(name)?;
            self.wait
                .click_element(&format!(
                    "{} .small-box:nth-child({position})",
                    self.locator()
                ))
                .await?;
        }
        self.expand_menu().await
    }

    /// Toggle the add-component menu, then let its animation finish.
    pub async fn expand_menu(&self) -> Result<()> {
        with_pause(
            &self.wait,
            None,
            Some("menu animation finishes"),
            self.menu.click(),
        )
        .await
    }

    fn menu_position(&self, name: &str) -> Result<usize> {
        self.menu_items
            .iter()
            .position(|item| item == name)
            .map(|index| index + 1)
            .ok_or_else(|| {
                AutomatorError::ConfigLookup(format!(
                    "component `{name}` is not in the menu for region `{}`",
                    self.locator
                ))
            })
    }
}

impl Widget for Region {
    fn locator(&self) -> String {
        self.locator.clone()
    }
}
