//! Test support: a scriptable in-memory driver.
//!
//! `FakeDriver` serves canned `ElementSnapshot`s keyed by selector, records
//! every call in order, and can delay an element's appearance by a number of
//! polls. Flow-runner test suites downstream use it the same way the unit
//! tests here do.

use crate::driver::{Driver, ElementSnapshot};
use crate::errors::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeDriver {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    dom: HashMap<String, Vec<ElementSnapshot>>,
    /// Elements that appear only after N further queries of their selector.
    delayed: HashMap<String, (u32, Vec<ElementSnapshot>)>,
    calls: Vec<String>,
    frame: Option<String>,
    url: String,
}

impl FakeState {
    /// Selectors are scoped by the active frame, mirroring how a real session
    /// resolves queries against the current document.
    fn key(&self, selector: &str) -> String {
        match &self.frame {
            Some(frame) => format!("{frame}::{selector}"),
            None => selector.to_string(),
        }
    }

    fn resolve(&mut self, selector: &str) -> Vec<ElementSnapshot> {
        let key = self.key(selector);
        if let Some((remaining, elements)) = self.delayed.remove(&key) {
            if remaining <= 1 {
                self.dom.insert(key.clone(), elements);
            } else {
                self.delayed.insert(key.clone(), (remaining - 1, elements));
            }
        }
        self.dom.get(&key).cloned().unwrap_or_default()
    }
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&self, selector: &str, element: ElementSnapshot) {
        self.place_many(selector, vec![element]);
    }

    pub fn place_many(&self, selector: &str, elements: Vec<ElementSnapshot>) {
        self.state
            .lock()
            .unwrap()
            .dom
            .insert(selector.to_string(), elements);
    }

    /// Make `elements` appear only after the selector has been queried
    /// `polls` times.
    pub fn place_after_polls(&self, selector: &str, polls: u32, elements: Vec<ElementSnapshot>) {
        self.state
            .lock()
            .unwrap()
            .delayed
            .insert(selector.to_string(), (polls, elements));
    }

    /// Script an element that only exists inside a frame's document.
    pub fn place_in_frame(&self, frame_selector: &str, selector: &str, element: ElementSnapshot) {
        self.place_many(&format!("{frame_selector}::{selector}"), vec![element]);
    }

    pub fn remove(&self, selector: &str) {
        self.state.lock().unwrap().dom.remove(selector);
    }

    /// Every recorded call, in issue order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Recorded calls with element queries filtered out.
    pub fn actions(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("find:"))
            .collect()
    }

    pub fn click_count(&self, selector: &str) -> usize {
        let needle = format!("click:{selector}");
        self.calls().iter().filter(|call| **call == needle).count()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

/// A visible, enabled element.
pub fn visible(tag: &str) -> ElementSnapshot {
    ElementSnapshot {
        tag_name: tag.to_string(),
        attributes: HashMap::new(),
        text: String::new(),
        displayed: true,
        enabled: true,
        selected: false,
        option_values: vec![],
    }
}

pub fn hidden(tag: &str) -> ElementSnapshot {
    ElementSnapshot {
        displayed: false,
        ..visible(tag)
    }
}

pub fn disabled(tag: &str) -> ElementSnapshot {
    ElementSnapshot {
        enabled: false,
        ..visible(tag)
    }
}

pub fn checkbox(checked: bool) -> ElementSnapshot {
    let mut element = visible("input");
    element
        .attributes
        .insert("type".to_string(), "checkbox".to_string());
    element.selected = checked;
    element
}

pub fn select_with_options(values: &[&str]) -> ElementSnapshot {
    let mut element = visible("select");
    element.option_values = values.iter().map(|v| v.to_string()).collect();
    element
}

pub fn with_value(tag: &str, value: &str) -> ElementSnapshot {
    let mut element = visible(tag);
    element
        .attributes
        .insert("value".to_string(), value.to_string());
    element
}

#[async_trait]
impl Driver for FakeDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.url = url.to_string();
        state.calls.push(format!("navigate:{url}"));
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn find_element(&self, selector: &str) -> Result<Option<ElementSnapshot>> {
        Ok(self.find_elements(selector).await?.into_iter().next())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("find:{selector}"));
        Ok(state.resolve(selector))
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("click:{selector}"));
        // Clicking a scripted checkbox toggles it, like the real thing.
        let key = state.key(selector);
        if let Some(elements) = state.dom.get_mut(&key) {
            if let Some(element) = elements.first_mut() {
                if element.attribute("type") == Some("checkbox") {
                    element.selected = !element.selected;
                }
            }
        }
        Ok(())
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("clear:{selector}"));
        let key = state.key(selector);
        if let Some(elements) = state.dom.get_mut(&key) {
            if let Some(element) = elements.first_mut() {
                element.attributes.insert("value".to_string(), String::new());
            }
        }
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("type:{selector}:{text}"));
        let key = state.key(selector);
        if let Some(elements) = state.dom.get_mut(&key) {
            if let Some(element) = elements.first_mut() {
                let value = format!("{}{}", element.value(), text);
                element.attributes.insert("value".to_string(), value);
            }
        }
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("select:{selector}:{value}"));
        let key = state.key(selector);
        if let Some(elements) = state.dom.get_mut(&key) {
            if let Some(element) = elements.first_mut() {
                element
                    .attributes
                    .insert("value".to_string(), value.to_string());
            }
        }
        Ok(())
    }

    async fn drag_to(&self, source_selector: &str, target_selector: &str) -> Result<()> {
        self.record(format!("drag:{source_selector}->{target_selector}"));
        Ok(())
    }

    async fn drag_by_offset(&self, selector: &str, dx: i64, dy: i64) -> Result<()> {
        self.record(format!("drag_by:{selector}:{dx},{dy}"));
        Ok(())
    }

    async fn enter_frame(&self, selector: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("enter_frame:{selector}"));
        state.frame = Some(selector.to_string());
        Ok(())
    }

    async fn exit_frame(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("exit_frame".to_string());
        state.frame = None;
        Ok(())
    }

    async fn refresh(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("refresh".to_string());
        state.frame = None;
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        self.record("quit".to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delayed_elements_appear_after_the_scripted_number_of_polls() {
        let driver = FakeDriver::new();
        driver.place_after_polls(".late", 3, vec![visible("div")]);

        assert!(driver.find_element(".late").await.unwrap().is_none());
        assert!(driver.find_element(".late").await.unwrap().is_none());
        assert!(driver.find_element(".late").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn frame_scoping_switches_which_elements_resolve() {
        let driver = FakeDriver::new();
        driver.place("header", with_value("header", "outer"));
        driver.place_in_frame("iframe", "header", with_value("header", "inner"));

        let outer = driver.find_element("header").await.unwrap().unwrap();
        assert_eq!(outer.value(), "outer");

        driver.enter_frame("iframe").await.unwrap();
        let inner = driver.find_element("header").await.unwrap().unwrap();
        assert_eq!(inner.value(), "inner");

        driver.exit_frame().await.unwrap();
        let outer = driver.find_element("header").await.unwrap().unwrap();
        assert_eq!(outer.value(), "outer");
    }
}
