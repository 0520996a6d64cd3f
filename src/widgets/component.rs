use crate::errors::Result;
use crate::wait::{with_pause, ElementWait};
use crate::widgets::inputs::Button;
use crate::widgets::Widget;

/// Confirmation control in the delete modal.
const CONFIRM_SELECTOR: &str = ".swal2-confirm.swal2-styled";

/// One component instance at a 1-based structural position within a region.
pub struct Component {
    wait: ElementWait,
    base_locator: String,
    position: u32,
    edit_button: Button,
    delete_button: Button,
    confirm_button: Button,
}

impl Component {
    pub fn new(wait: ElementWait, locator: impl Into<String>, position: u32) -> Self {
        let base_locator = locator.into();
        let derived = format!("{base_locator}:nth-child({position})");
        Self {
            edit_button: Button::new(wait.clone(), format!("{derived} .fa-pencil")),
            delete_button: Button::new(wait.clone(), format!("{derived} .fa-times")),
            confirm_button: Button::new(wait.clone(), CONFIRM_SELECTOR),
            wait,
            base_locator,
            position,
        }
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    /// Open the component's editor panel.
    pub async fn edit(&self) -> Result<()> {
        with_pause(
            &self.wait,
            None,
            Some("editor panel animates open"),
            self.edit_button.click(),
        )
        .await
    }

    /// Delete the component: the delete affordance, then the modal's
    /// confirmation control.
    pub async fn delete(&self) -> Result<()> {
        self.delete_button.click().await?;
        self.confirm_button.click().await
    }
}

impl Widget for Component {
    fn locator(&self) -> String {
        format!("{}:nth-child({})", self.base_locator, self.position)
    }
}
