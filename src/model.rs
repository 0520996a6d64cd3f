//! Model definition data and the widget factory over it.
//!
//! The model file is declarative YAML mapping region names to selectors,
//! pages to ordered region menus, and component names to input definitions.
//! The factory composes those selector fragments into concrete widgets; every
//! missing key is a hard `ConfigLookup` failure.

use crate::errors::{AutomatorError, Result};
use crate::wait::ElementWait;
use crate::widgets::{AnyInput, Component, InputKind, Region};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct ModelData {
    pub regions: HashMap<String, RegionDef>,
    /// page name -> region name -> ordered component names.
    pub menus: HashMap<String, HashMap<String, Vec<String>>>,
    pub components: ComponentCatalog,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionDef {
    pub locator: String,
}

/// The `components` mapping: one shared wrapper selector plus a nested input
/// table per component name.
#[derive(Debug, Clone)]
pub struct ComponentCatalog {
    pub locator: String,
    pub components: HashMap<String, HashMap<String, InputDef>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputDef {
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub locator: String,
}

// The catalog keeps `locator` inline with the component names, so the two
// shapes have to be pulled apart by hand.
impl<'de> Deserialize<'de> for ComponentCatalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let mut raw: HashMap<String, serde_yaml::Value> = HashMap::deserialize(deserializer)?;
        let locator = raw
            .remove("locator")
            .and_then(|value| value.as_str().map(str::to_string))
            .ok_or_else(|| D::Error::missing_field("locator"))?;

        let mut components = HashMap::new();
        for (name, value) in raw {
            let inputs: HashMap<String, InputDef> =
                serde_yaml::from_value(value).map_err(D::Error::custom)?;
            components.insert(name, inputs);
        }
        Ok(Self { locator, components })
    }
}

impl ModelData {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn region_locator(&self, region_name: &str) -> Result<&str> {
        self.regions
            .get(region_name)
            .map(|region| region.locator.as_str())
            .ok_or_else(|| {
                AutomatorError::ConfigLookup(format!("region `{region_name}` is not in the model"))
            })
    }

    pub fn menu(&self, page_name: &str, region_name: &str) -> Result<&[String]> {
        let page = self.menus.get(page_name).ok_or_else(|| {
            AutomatorError::ConfigLookup(format!("page `{page_name}` has no menus in the model"))
        })?;
        page.get(region_name).map(Vec::as_slice).ok_or_else(|| {
            AutomatorError::ConfigLookup(format!(
                "page `{page_name}` has no menu for region `{region_name}`"
            ))
        })
    }

    pub fn input_def(&self, component_name: &str, input_name: &str) -> Result<&InputDef> {
        let inputs = self
            .components
            .components
            .get(component_name)
            .ok_or_else(|| {
                AutomatorError::ConfigLookup(format!(
                    "component `{component_name}` is not in the model"
                ))
            })?;
        inputs.get(input_name).ok_or_else(|| {
            AutomatorError::ConfigLookup(format!(
                "component `{component_name}` has no input `{input_name}`"
            ))
        })
    }
}

/// Resolves model data into widgets by selector composition.
pub struct LayoutFactory {
    model: ModelData,
    wait: ElementWait,
}

impl LayoutFactory {
    pub fn new(model: ModelData, wait: ElementWait) -> Self {
        Self { model, wait }
    }

    pub fn model(&self) -> &ModelData {
        &self.model
    }

    /// Region widget: the region's own selector plus the page's ordered
    /// component menu for it.
    pub fn get_region(&self, region_name: &str, page_name: &str) -> Result<Region> {
        let locator = self.model.region_locator(region_name)?;
        let menu_items = self.model.menu(page_name, region_name)?.to_vec();
        Ok(Region::new(self.wait.clone(), locator, menu_items))
    }

    /// Component widget at a 1-based position: region selector joined with
    /// the shared component wrapper selector.
    pub fn get_component(&self, region_name: &str, position: u32) -> Result<Component> {
        let locator = format!(
            "{} {}",
            self.model.region_locator(region_name)?,
            self.model.components.locator
        );
        Ok(Component::new(self.wait.clone(), locator, position))
    }

    /// Input widget: region selector, component wrapper selector, and the
    /// input's own selector, joined in that order.
    pub fn get_input(
        &self,
        region_name: &str,
        component_name: &str,
        input_name: &str,
    ) -> Result<AnyInput> {
        let region_locator = self.model.region_locator(region_name)?;
        let def = self.model.input_def(component_name, input_name)?;
        let locator = format!(
            "{} {} {}",
            region_locator, self.model.components.locator, def.locator
        );
        Ok(AnyInput::new(def.kind, self.wait.clone(), locator))
    }
}
