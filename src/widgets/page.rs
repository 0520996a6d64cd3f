use crate::errors::Result;
use crate::wait::ElementWait;
use crate::widgets::inputs::{Button, Text};
use tracing::info;

const CARET_BUTTON: &str = ".category-selector .btn.btn-info.dropdown-toggle";
const FILTER_FIELD: &str = ".category-selector input.dropdown-filter";
const FILTERED_RESULT: &str = ".category-selector .dropdown-menu li:nth-child(3)";
const PUBLISH_BUTTON: &str = ".content-header .btn-submit";
const CONFIRM_BUTTON: &str = ".swal2-container .swal2-confirm";

/// Fixed page chrome: one of these per session.
///
/// Unlike regions and components, the page's controls sit at stable selectors,
/// so it carries no locator of its own.
pub struct Page {
    wait: ElementWait,
    caret_button: Button,
    filter_field: Text,
    publish_button: Button,
    confirm_button: Button,
}

impl Page {
    pub fn new(wait: ElementWait) -> Self {
        Self {
            caret_button: Button::new(wait.clone(), CARET_BUTTON),
            filter_field: Text::new(wait.clone(), FILTER_FIELD),
            publish_button: Button::new(wait.clone(), PUBLISH_BUTTON),
            confirm_button: Button::new(wait.clone(), CONFIRM_BUTTON),
            wait,
        }
    }

    /// Switch to the named layout: open the category dropdown, filter by
    /// name, pick the filtered entry, and let the page settle.
    pub async fn select_layout(&self, layout: &str) -> Result<()> {
        info!(layout, "selecting layout");
        self.caret_button.click().await?;
        self.filter_field.set(layout).await?;
        self.wait.click_element(FILTERED_RESULT).await?;
        self.wait.wait_fixed("page settles after layout switch").await;
        Ok(())
    }

    /// Follow the sidebar link for the named page.
    pub async fn visit(&self, name: &str) -> Result<()> {
        info!(page = name, "visiting page");
        self.wait
            .click_element(&format!(".main-sidebar [href=\"/{name}\"]"))
            .await?;
        self.wait.wait_fixed("page finishes loading").await;
        Ok(())
    }

    /// Publish the current layout and confirm the prompt.
    ///
    /// The settle wait here is doubled: publishing round-trips through the
    /// backend, which takes longer than any DOM transition.
    pub async fn publish(&self) -> Result<()> {
        info!("publishing");
        self.publish_button.click().await?;
        self.confirm_button.click().await?;
        self.wait
            .with_timeout(self.wait.timeout() * 2)
            .wait_fixed("published changes propagate to the API")
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaitConfig;
    use crate::driver::Driver;
    use crate::testing::{self, FakeDriver};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    const TIMEOUT: Duration = Duration::from_millis(40);

    fn fresh() -> (Arc<FakeDriver>, Page) {
        let driver = Arc::new(FakeDriver::new());
        let config = WaitConfig {
            timeout_ms: TIMEOUT.as_millis() as u64,
            poll_interval_ms: 10,
        };
        let wait = ElementWait::new(Arc::clone(&driver) as Arc<dyn Driver>, config);
        (driver, Page::new(wait))
    }

    #[tokio::test]
    async fn select_layout_drives_the_category_selector_in_order() {
        let (driver, page) = fresh();
        driver.place(CARET_BUTTON, testing::visible("button"));
        driver.place(FILTER_FIELD, testing::with_value("input", ""));
        driver.place(FILTERED_RESULT, testing::visible("li"));

        page.select_layout("holiday-special").await.unwrap();

        assert_eq!(
            driver.actions(),
            [
                format!("click:{CARET_BUTTON}"),
                format!("clear:{FILTER_FIELD}"),
                format!("type:{FILTER_FIELD}:holiday-special"),
                format!("click:{FILTERED_RESULT}"),
            ]
        );
    }

    #[tokio::test]
    async fn visit_clicks_the_matching_sidebar_link() {
        let (driver, page) = fresh();
        driver.place(
            ".main-sidebar [href=\"/sports\"]",
            testing::visible("a"),
        );

        page.visit("sports").await.unwrap();

        assert_eq!(
            driver.actions(),
            ["click:.main-sidebar [href=\"/sports\"]"]
        );
    }

    #[tokio::test]
    async fn publish_confirms_then_waits_out_backend_propagation() {
        let (driver, page) = fresh();
        driver.place(PUBLISH_BUTTON, testing::visible("button"));
        driver.place(CONFIRM_BUTTON, testing::visible("button"));
        let started = Instant::now();

        page.publish().await.unwrap();

        assert_eq!(
            driver.actions(),
            [
                format!("click:{PUBLISH_BUTTON}"),
                format!("click:{CONFIRM_BUTTON}"),
            ]
        );
        assert!(started.elapsed() >= TIMEOUT * 2);
    }
}
