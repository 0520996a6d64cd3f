//! Blocking-poll primitives over the driver.
//!
//! Every operation re-resolves its selector against the live page on each
//! poll tick, succeeds as soon as its condition holds, and fails with
//! `NotFound` only once the full timeout has elapsed.

use crate::config::WaitConfig;
use crate::driver::{Driver, ElementSnapshot};
use crate::errors::{AutomatorError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::debug;

/// How `wait_for_count` compares the live match count to the requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    AtLeast,
    Exactly,
}

impl CountMode {
    fn satisfied(self, live: usize, requested: usize) -> bool {
        match self {
            CountMode::AtLeast => live >= requested,
            CountMode::Exactly => live == requested,
        }
    }
}

/// Deadline bookkeeping for one wait operation.
struct PollClock {
    deadline: Instant,
    interval: Duration,
}

impl PollClock {
    fn new(timeout: Duration, interval: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            interval,
        }
    }

    /// Sleep until the next poll tick. Returns `false` once the deadline has
    /// passed, never earlier.
    async fn tick(&self) -> bool {
        let now = Instant::now();
        if now >= self.deadline {
            return false;
        }
        sleep(self.interval.min(self.deadline - now)).await;
        true
    }
}

/// Shared wait context: one driver, one polling budget.
///
/// Cheap to clone; widgets each hold their own handle. `with_timeout` derives
/// a handle with a different budget for call sites that need one.
#[derive(Clone)]
pub struct ElementWait {
    driver: Arc<dyn Driver>,
    config: WaitConfig,
}

impl ElementWait {
    pub fn new(driver: Arc<dyn Driver>, config: WaitConfig) -> Self {
        Self { driver, config }
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    /// Same driver, different timeout budget.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut config = self.config.clone();
        config.timeout_ms = timeout.as_millis() as u64;
        Self {
            driver: Arc::clone(&self.driver),
            config,
        }
    }

    fn clock(&self) -> PollClock {
        PollClock::new(self.config.timeout(), self.config.poll_interval())
    }

    /// First matching element, once present.
    pub async fn get_element(&self, selector: &str) -> Result<ElementSnapshot> {
        let clock = self.clock();
        loop {
            if let Some(element) = self.driver.find_element(selector).await? {
                return Ok(element);
            }
            if !clock.tick().await {
                return Err(AutomatorError::timed_out(selector, "present"));
            }
        }
    }

    /// All matching elements, once at least one is present.
    pub async fn get_all_elements(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
        let clock = self.clock();
        loop {
            let elements = self.driver.find_elements(selector).await?;
            if !elements.is_empty() {
                return Ok(elements);
            }
            if !clock.tick().await {
                return Err(AutomatorError::timed_out(selector, "any present"));
            }
        }
    }

    /// Click the first match once it is present, visible, and enabled.
    pub async fn click_element(&self, selector: &str) -> Result<()> {
        let clock = self.clock();
        loop {
            if let Some(element) = self.driver.find_element(selector).await? {
                if element.is_interactable() {
                    return self.driver.click(selector).await;
                }
            }
            if !clock.tick().await {
                return Err(AutomatorError::timed_out(selector, "clickable"));
            }
        }
    }

    /// Wait until the live match count satisfies `mode` against `count`.
    pub async fn wait_for_count(&self, selector: &str, count: i64, mode: CountMode) -> Result<()> {
        if count <= 0 {
            return Err(AutomatorError::InvalidArgument(format!(
                "requested element count must be greater than 0, got {count}"
            )));
        }
        let requested = count as usize;
        let condition = match mode {
            CountMode::AtLeast => format!("at least {requested} present"),
            CountMode::Exactly => format!("exactly {requested} present"),
        };
        let clock = self.clock();
        loop {
            let live = self.driver.find_elements(selector).await?.len();
            if mode.satisfied(live, requested) {
                return Ok(());
            }
            if !clock.tick().await {
                return Err(AutomatorError::timed_out(selector, &condition));
            }
        }
    }

    /// Wait until nothing matches, or every match is invisible.
    pub async fn wait_for_disappearance(&self, selector: &str) -> Result<()> {
        let clock = self.clock();
        loop {
            let elements = self.driver.find_elements(selector).await?;
            if elements.iter().all(|element| !element.displayed) {
                return Ok(());
            }
            if !clock.tick().await {
                return Err(AutomatorError::timed_out(selector, "gone"));
            }
        }
    }

    /// Block for the full timeout, unconditionally.
    ///
    /// Escape hatch for settle times no DOM predicate captures. The reason
    /// string is mandatory and logged, so unexplained fixed waits stand out.
    pub async fn wait_fixed(&self, reason: &str) {
        debug!(reason, timeout_ms = self.config.timeout_ms, "fixed wait");
        sleep(self.config.timeout()).await;
    }

    /// Wait for presence, clear the field, then type `text` into it.
    pub async fn send_keys(&self, selector: &str, text: &str) -> Result<()> {
        self.get_element(selector).await?;
        self.driver.clear(selector).await?;
        self.driver.type_text(selector, text).await
    }

    /// Wait for presence of a `<select>` and choose the option whose value
    /// equals `value`.
    pub async fn select_value(&self, selector: &str, value: &str) -> Result<()> {
        let element = self.get_element(selector).await?;
        if element.tag_name != "select" {
            return Err(AutomatorError::TypeMismatch {
                selector: selector.to_string(),
                expected: "select".to_string(),
                found: element.tag_name,
            });
        }
        if !element.option_values.iter().any(|option| option == value) {
            return Err(AutomatorError::NotFound(format!(
                "`{selector}` has no option with value `{value}`"
            )));
        }
        self.driver.select_option(selector, value).await
    }

    /// Non-throwing presence predicate; a timeout reads as absent.
    pub async fn element_is_present(&self, selector: &str) -> bool {
        self.get_element(selector).await.is_ok()
    }

    /// Non-throwing visibility predicate; a timeout reads as invisible.
    pub async fn element_is_visible(&self, selector: &str) -> bool {
        let clock = self.clock();
        loop {
            match self.driver.find_element(selector).await {
                Ok(Some(element)) if element.displayed => return true,
                Ok(_) => {}
                Err(_) => return false,
            }
            if !clock.tick().await {
                return false;
            }
        }
    }

    /// Wait for both operands, then drag the source onto the target.
    pub async fn drag(&self, source_selector: &str, target_selector: &str) -> Result<()> {
        self.get_element(source_selector).await?;
        self.get_element(target_selector).await?;
        self.driver.drag_to(source_selector, target_selector).await
    }

    /// Wait for the operand, then drag it by a pixel offset.
    pub async fn drag_by_offset(&self, selector: &str, dx: i64, dy: i64) -> Result<()> {
        self.get_element(selector).await?;
        self.driver.drag_by_offset(selector, dx, dy).await
    }

    /// Run `body` with the query context switched into a frame.
    ///
    /// The outer context is restored on every exit path: `body` failing with
    /// an error still exits the frame before the error propagates.
    pub async fn in_frame<T, F, Fut>(&self, selector: &str, body: F) -> Result<T>
    where
        F: FnOnce(ElementWait) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.get_element(selector).await?;
        self.driver.enter_frame(selector).await?;
        let outcome = body(self.clone()).await;
        let restored = self.driver.exit_frame().await;
        let value = outcome?;
        restored?;
        Ok(value)
    }
}

/// Wrap an operation with a fixed settle wait before and/or after it.
///
/// The operation future is built lazily at the call site, so nothing runs
/// until any `before` pause has elapsed.
pub async fn with_pause<T, Fut>(
    wait: &ElementWait,
    before: Option<&str>,
    after: Option<&str>,
    operation: Fut,
) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    if let Some(reason) = before {
        wait.wait_fixed(reason).await;
    }
    let value = operation.await?;
    if let Some(reason) = after {
        wait.wait_fixed(reason).await;
    }
    Ok(value)
}
