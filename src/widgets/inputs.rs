//! Form input widgets: Text, Checkbox, Button, Select.
//!
//! Each owns a selector and a wait handle, nothing else. `AnyInput` erases
//! the variant for callers that dispatch on declared model types.

use crate::errors::{AutomatorError, Result};
use crate::wait::ElementWait;
use crate::widgets::Widget;
use serde::{Deserialize, Serialize};

/// Input types known to the model format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Button,
    Checkbox,
    Select,
}

/// A value read from or written to an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Text(String),
    Flag(bool),
}

pub struct Text {
    wait: ElementWait,
    locator: String,
}

impl Text {
    pub fn new(wait: ElementWait, locator: impl Into<String>) -> Self {
        Self {
            wait,
            locator: locator.into(),
        }
    }

    pub async fn value(&self) -> Result<String> {
        Ok(self.wait.get_element(&self.locator).await?.value())
    }

    /// Replace the field's content with `value`.
    pub async fn set(&self, value: &str) -> Result<()> {
        self.wait.send_keys(&self.locator, value).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.wait.get_element(&self.locator).await?;
        self.wait.driver().clear(&self.locator).await
    }
}

impl Widget for Text {
    fn locator(&self) -> String {
        self.locator.clone()
    }
}

pub struct Checkbox {
    wait: ElementWait,
    locator: String,
}

impl Checkbox {
    pub fn new(wait: ElementWait, locator: impl Into<String>) -> Self {
        Self {
            wait,
            locator: locator.into(),
        }
    }

    pub async fn checked(&self) -> Result<bool> {
        Ok(self.wait.get_element(&self.locator).await?.selected)
    }

    /// Idempotent: clicks only when the requested state differs from the
    /// current one, so re-applying a state never toggles it away.
    pub async fn set_checked(&self, checked: bool) -> Result<()> {
        if self.checked().await? != checked {
            self.wait.click_element(&self.locator).await?;
        }
        Ok(())
    }
}

impl Widget for Checkbox {
    fn locator(&self) -> String {
        self.locator.clone()
    }
}

pub struct Button {
    wait: ElementWait,
    locator: String,
}

impl Button {
    pub fn new(wait: ElementWait, locator: impl Into<String>) -> Self {
        Self {
            wait,
            locator: locator.into(),
        }
    }

    pub async fn click(&self) -> Result<()> {
        self.wait.click_element(&self.locator).await
    }
}

impl Widget for Button {
    fn locator(&self) -> String {
        self.locator.clone()
    }
}

pub struct Select {
    wait: ElementWait,
    locator: String,
}

impl Select {
    pub fn new(wait: ElementWait, locator: impl Into<String>) -> Self {
        Self {
            wait,
            locator: locator.into(),
        }
    }

    /// Value of the currently chosen option.
    pub async fn selected_value(&self) -> Result<String> {
        Ok(self.wait.get_element(&self.locator).await?.value())
    }

    /// Choose by underlying option value, not display label.
    pub async fn select(&self, value: &str) -> Result<()> {
        self.wait.select_value(&self.locator, value).await
    }
}

impl Widget for Select {
    fn locator(&self) -> String {
        self.locator.clone()
    }
}

/// Variant-erased input, as produced by the model factory.
pub enum AnyInput {
    Text(Text),
    Checkbox(Checkbox),
    Button(Button),
    Select(Select),
}

impl AnyInput {
    pub fn new(kind: InputKind, wait: ElementWait, locator: impl Into<String>) -> Self {
        let locator = locator.into();
        match kind {
            InputKind::Text => AnyInput::Text(Text::new(wait, locator)),
            InputKind::Checkbox => AnyInput::Checkbox(Checkbox::new(wait, locator)),
            InputKind::Button => AnyInput::Button(Button::new(wait, locator)),
            InputKind::Select => AnyInput::Select(Select::new(wait, locator)),
        }
    }

    pub fn kind(&self) -> InputKind {
        match self {
            AnyInput::Text(_) => InputKind::Text,
            AnyInput::Checkbox(_) => InputKind::Checkbox,
            AnyInput::Button(_) => InputKind::Button,
            AnyInput::Select(_) => InputKind::Select,
        }
    }

    /// Buttons have no value to read.
    pub async fn value(&self) -> Result<InputValue> {
        match self {
            AnyInput::Text(text) => Ok(InputValue::Text(text.value().await?)),
            AnyInput::Checkbox(checkbox) => Ok(InputValue::Flag(checkbox.checked().await?)),
            AnyInput::Select(select) => Ok(InputValue::Text(select.selected_value().await?)),
            AnyInput::Button(button) => Err(AutomatorError::Unsupported(format!(
                "button `{}` has no value",
                button.locator()
            ))),
        }
    }

    /// Buttons have no value to write; a mismatched value variant is a
    /// caller error, not an element failure.
    pub async fn set_value(&self, value: InputValue) -> Result<()> {
        match (self, value) {
            (AnyInput::Text(text), InputValue::Text(v)) => text.set(&v).await,
            (AnyInput::Checkbox(checkbox), InputValue::Flag(v)) => checkbox.set_checked(v).await,
            (AnyInput::Select(select), InputValue::Text(v)) => select.select(&v).await,
            (AnyInput::Button(button), _) => Err(AutomatorError::Unsupported(format!(
                "button `{}` cannot take a value",
                button.locator()
            ))),
            (input, value) => Err(AutomatorError::InvalidArgument(format!(
                "{:?} is not a valid value for a {:?} input at `{}`",
                value,
                input.kind(),
                input.locator()
            ))),
        }
    }

    pub async fn click(&self) -> Result<()> {
        match self {
            AnyInput::Button(button) => button.click().await,
            other => Err(AutomatorError::Unsupported(format!(
                "{:?} input at `{}` is not clickable; only buttons are",
                other.kind(),
                other.locator()
            ))),
        }
    }
}

impl Widget for AnyInput {
    fn locator(&self) -> String {
        match self {
            AnyInput::Text(text) => text.locator(),
            AnyInput::Checkbox(checkbox) => checkbox.locator(),
            AnyInput::Button(button) => button.locator(),
            AnyInput::Select(select) => select.locator(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaitConfig;
    use crate::driver::Driver;
    use crate::testing::{self, FakeDriver};
    use std::sync::Arc;

    fn fresh() -> (Arc<FakeDriver>, ElementWait) {
        let driver = Arc::new(FakeDriver::new());
        let config = WaitConfig {
            timeout_ms: 80,
            poll_interval_ms: 10,
        };
        let wait = ElementWait::new(Arc::clone(&driver) as Arc<dyn Driver>, config);
        (driver, wait)
    }

    #[tokio::test]
    async fn text_set_clears_the_field_first() {
        let (driver, wait) = fresh();
        driver.place("#name", testing::with_value("input", "old"));

        let text = Text::new(wait, "#name");
        text.set("new").await.unwrap();

        assert_eq!(driver.actions(), ["clear:#name", "type:#name:new"]);
        assert_eq!(text.value().await.unwrap(), "new");
    }

    #[tokio::test]
    async fn checkbox_setter_is_idempotent() {
        let (driver, wait) = fresh();
        driver.place("#opt-in", testing::checkbox(false));
        let checkbox = Checkbox::new(wait, "#opt-in");

        checkbox.set_checked(false).await.unwrap();
        assert_eq!(driver.click_count("#opt-in"), 0);

        checkbox.set_checked(true).await.unwrap();
        assert_eq!(driver.click_count("#opt-in"), 1);
        assert!(checkbox.checked().await.unwrap());

        checkbox.set_checked(true).await.unwrap();
        assert_eq!(driver.click_count("#opt-in"), 1);
    }

    #[tokio::test]
    async fn button_rejects_value_access_through_any_input() {
        let (driver, wait) = fresh();
        driver.place("#save", testing::visible("button"));
        let input = AnyInput::new(InputKind::Button, wait, "#save");

        let read = input.value().await;
        assert!(matches!(read, Err(AutomatorError::Unsupported(_))));

        let write = input.set_value(InputValue::Text("x".into())).await;
        assert!(matches!(write, Err(AutomatorError::Unsupported(_))));

        input.click().await.unwrap();
        assert_eq!(driver.click_count("#save"), 1);
    }

    #[tokio::test]
    async fn non_button_inputs_are_not_clickable_through_any_input() {
        let (driver, wait) = fresh();
        driver.place("#name", testing::with_value("input", ""));
        let input = AnyInput::new(InputKind::Text, wait, "#name");

        let result = input.click().await;
        assert!(matches!(result, Err(AutomatorError::Unsupported(_))));
        assert_eq!(driver.click_count("#name"), 0);
    }

    #[tokio::test]
    async fn mismatched_value_variant_is_an_invalid_argument() {
        let (driver, wait) = fresh();
        driver.place("#name", testing::with_value("input", ""));
        let input = AnyInput::new(InputKind::Text, wait, "#name");

        let result = input.set_value(InputValue::Flag(true)).await;
        assert!(matches!(result, Err(AutomatorError::InvalidArgument(_))));
        assert!(driver.actions().is_empty());
    }

    #[tokio::test]
    async fn select_sets_and_reads_by_option_value() {
        let (driver, wait) = fresh();
        driver.place("#layout", testing::select_with_options(&["grid", "list"]));
        let select = Select::new(wait, "#layout");

        select.select("list").await.unwrap();
        assert_eq!(select.selected_value().await.unwrap(), "list");
    }
}
