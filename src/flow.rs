//! Flow definition data shapes, plus validation against a model.
//!
//! Running flows is the flow-runner's job, not this crate's; what lives here
//! is the accepted file format and the rule that every region, component, and
//! input a step names must resolve in the model.

use crate::errors::{AutomatorError, Result};
use crate::model::ModelData;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FlowFile {
    pub site: String,
    pub tests: Vec<FlowTest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowTest {
    pub page: String,
    #[serde(default)]
    pub layout: Option<String>,
    pub steps: Vec<FlowStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum FlowStep {
    AddComponents {
        region: String,
        components: Vec<String>,
    },
    EditComponent {
        region: String,
        component: String,
        index: u32,
        steps: Vec<InputAction>,
    },
    RemoveComponent {
        region: String,
        index: u32,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum InputAction {
    Click { input: String },
    Set { input: String, value: String },
    Check { input: String, value: bool },
    Select { input: String, value: String },
}

impl InputAction {
    pub fn input(&self) -> &str {
        match self {
            InputAction::Click { input }
            | InputAction::Set { input, .. }
            | InputAction::Check { input, .. }
            | InputAction::Select { input, .. } => input,
        }
    }
}

impl FlowFile {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Dry-run every model reference in the flow. Fails on the first
    /// region, menu entry, component, or input that does not resolve.
    pub fn validate(&self, model: &ModelData) -> Result<()> {
        for test in &self.tests {
            for step in &test.steps {
                step.validate(model, &test.page)?;
            }
        }
        Ok(())
    }
}

impl FlowStep {
    fn validate(&self, model: &ModelData, page_name: &str) -> Result<()> {
        match self {
            FlowStep::AddComponents { region, components } => {
                model.region_locator(region)?;
                let menu = model.menu(page_name, region)?;
                for component in components {
                    if !menu.contains(component) {
                        return Err(AutomatorError::ConfigLookup(format!(
                            "component `{component}` is not in the menu for region `{region}` on page `{page_name}`"
                        )));
                    }
                }
                Ok(())
            }
            FlowStep::EditComponent {
                region,
                component,
                steps,
                ..
            } => {
                model.region_locator(region)?;
                for action in steps {
                    model.input_def(component, action.input())?;
                }
                Ok(())
            }
            FlowStep::RemoveComponent { region, .. } => {
                model.region_locator(region)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    const SAMPLE_MODEL: &str = r#"
regions:
  region-1:
    locator: region-1-locator
menus:
  page-1:
    region-1: [component-1, component-2, component-3]
components:
  locator: component-locator
  component-1:
    input-1: { type: text, locator: input-1-locator }
    input-2: { type: button, locator: input-2-locator }
"#;

    const SAMPLE_FLOW: &str = r#"
site: fox29
tests:
  - page: page-1
    layout: holiday-special
    steps:
      - action: add-components
        region: region-1
        components: [component-1, component-2]
      - action: edit-component
        region: region-1
        component: component-1
        index: 1
        steps:
          - { action: set, input: input-1, value: "Breaking news" }
          - { action: click, input: input-2 }
      - action: remove-component
        region: region-1
        index: 2
"#;

    fn model() -> ModelData {
        ModelData::from_yaml(SAMPLE_MODEL).unwrap()
    }

    #[test]
    fn sample_flow_parses_with_tagged_steps() {
        let flow = FlowFile::from_yaml(SAMPLE_FLOW).unwrap();
        assert_eq!(flow.site, "fox29");
        assert_eq!(flow.tests.len(), 1);

        let test = &flow.tests[0];
        assert_eq!(test.layout.as_deref(), Some("holiday-special"));
        assert!(matches!(test.steps[0], FlowStep::AddComponents { .. }));
        assert!(matches!(test.steps[1], FlowStep::EditComponent { .. }));
        assert!(matches!(test.steps[2], FlowStep::RemoveComponent { .. }));
    }

    #[test]
    fn a_valid_flow_passes_validation() {
        let flow = FlowFile::from_yaml(SAMPLE_FLOW).unwrap();
        tokio_test::assert_ok!(flow.validate(&model()));
    }

    #[test]
    fn a_component_missing_from_the_menu_fails_validation() {
        let flow = FlowFile::from_yaml(
            r#"
site: fox29
tests:
  - page: page-1
    steps:
      - action: add-components
        region: region-1
        components: [component-9]
"#,
        )
        .unwrap();
        let result = flow.validate(&model());
        assert!(matches!(result, Err(AutomatorError::ConfigLookup(_))));
    }

    #[test]
    fn an_unknown_input_fails_validation() {
        let flow = FlowFile::from_yaml(
            r#"
site: fox29
tests:
  - page: page-1
    steps:
      - action: edit-component
        region: region-1
        component: component-1
        index: 1
        steps:
          - { action: set, input: input-9, value: x }
"#,
        )
        .unwrap();
        let result = flow.validate(&model());
        assert!(matches!(result, Err(AutomatorError::ConfigLookup(_))));
    }

    #[test]
    fn an_unknown_region_fails_validation() {
        let flow = FlowFile::from_yaml(
            r#"
site: fox29
tests:
  - page: page-1
    steps:
      - action: remove-component
        region: region-9
        index: 1
"#,
        )
        .unwrap();
        let result = flow.validate(&model());
        assert!(matches!(result, Err(AutomatorError::ConfigLookup(_))));
    }
}
