use crate::config::BrowserConfig;
use crate::driver::{scripts, Driver, ElementSnapshot};
use crate::errors::{AutomatorError, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::{Arc, Mutex};
use url::Url;

/// Chrome-backed driver implementation.
///
/// Queries and gestures run through injected JavaScript so that frame scoping
/// is uniform: the active frame selector is session state, and every script
/// resolves its root document from it.
pub struct ChromeDriver {
    browser: Mutex<Option<Browser>>,
    tab: Option<Arc<Tab>>,
    frame: Mutex<Option<String>>,
}

impl ChromeDriver {
    pub fn new() -> Self {
        Self {
            browser: Mutex::new(None),
            tab: None,
            frame: Mutex::new(None),
        }
    }

    /// Launch the browser and open the working tab.
    pub async fn launch(&mut self, config: &BrowserConfig) -> Result<()> {
        let window_size_arg = format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        );
        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={ua}"));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];
        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }
        for arg in &config.args {
            args.push(OsStr::new(arg));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .args(args)
            .build()
            .map_err(|e| AutomatorError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| AutomatorError::LaunchFailed(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| AutomatorError::LaunchFailed(e.to_string()))?;

        *self.browser.lock().unwrap() = Some(browser);
        self.tab = Some(tab);
        Ok(())
    }

    fn tab(&self) -> Result<&Arc<Tab>> {
        self.tab
            .as_ref()
            .ok_or_else(|| AutomatorError::LaunchFailed("browser has not been launched".into()))
    }

    fn active_frame(&self) -> Option<String> {
        self.frame.lock().unwrap().clone()
    }

    fn eval(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .tab()?
            .evaluate(script, false)
            .map_err(|e| AutomatorError::ScriptFailed(e.to_string()))?;
        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    /// Run a script that reports success as a boolean, mapping `false` to a
    /// vanished-element failure.
    fn eval_action(&self, script: &str, selector: &str) -> Result<()> {
        match self.eval(script)?.as_bool() {
            Some(true) => Ok(()),
            _ => Err(AutomatorError::NotFound(format!(
                "`{selector}` was no longer present when the action ran"
            ))),
        }
    }
}

impl Default for ChromeDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Driver for ChromeDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        Url::parse(url).map_err(|e| AutomatorError::NavigationFailed(format!("{url}: {e}")))?;
        let tab = self.tab()?;
        tab.navigate_to(url)
            .map_err(|e| AutomatorError::NavigationFailed(e.to_string()))?;
        tab.wait_until_navigated()
            .map_err(|e| AutomatorError::NavigationFailed(e.to_string()))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.tab()?.get_url())
    }

    async fn find_element(&self, selector: &str) -> Result<Option<ElementSnapshot>> {
        Ok(self.find_elements(selector).await?.into_iter().next())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
        let script = scripts::query_all(selector, self.active_frame().as_deref());
        let value = self.eval(&script)?;
        let payload = value
            .as_str()
            .ok_or_else(|| AutomatorError::ScriptFailed("query returned no payload".into()))?;
        Ok(serde_json::from_str(payload)?)
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let script = scripts::click_first(selector, self.active_frame().as_deref());
        self.eval_action(&script, selector)
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        let script = scripts::clear_first(selector, self.active_frame().as_deref());
        self.eval_action(&script, selector)
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let script = scripts::type_into_first(selector, text, self.active_frame().as_deref());
        self.eval_action(&script, selector)
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        let script = scripts::select_option_first(selector, value, self.active_frame().as_deref());
        self.eval_action(&script, selector)
    }

    async fn drag_to(&self, source_selector: &str, target_selector: &str) -> Result<()> {
        let script = scripts::drag_to(
            source_selector,
            target_selector,
            self.active_frame().as_deref(),
        );
        self.eval_action(&script, source_selector)
    }

    async fn drag_by_offset(&self, selector: &str, dx: i64, dy: i64) -> Result<()> {
        let script = scripts::drag_by_offset(selector, dx, dy, self.active_frame().as_deref());
        self.eval_action(&script, selector)
    }

    async fn enter_frame(&self, selector: &str) -> Result<()> {
        let script = scripts::frame_is_available(selector);
        match self.eval(&script)?.as_bool() {
            Some(true) => {
                *self.frame.lock().unwrap() = Some(selector.to_string());
                Ok(())
            }
            _ => Err(AutomatorError::NotFound(format!(
                "`{selector}` is not an available frame"
            ))),
        }
    }

    async fn exit_frame(&self) -> Result<()> {
        *self.frame.lock().unwrap() = None;
        Ok(())
    }

    async fn refresh(&self) -> Result<()> {
        // Reloading tears down any frame context with the page.
        *self.frame.lock().unwrap() = None;
        self.eval("location.reload()")?;
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| AutomatorError::NavigationFailed(e.to_string()))?;
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        self.browser.lock().unwrap().take();
        Ok(())
    }
}
