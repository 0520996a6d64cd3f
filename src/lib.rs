pub mod config;
pub mod driver;
pub mod errors;
pub mod flow;
pub mod model;
pub mod testing;
pub mod wait;
pub mod widgets;

pub use config::{BrowserConfig, Config, Viewport, WaitConfig};
pub use driver::{ChromeDriver, Driver, ElementSnapshot};
pub use errors::{AutomatorError, Result};
pub use flow::{FlowFile, FlowStep, FlowTest, InputAction};
pub use model::{LayoutFactory, ModelData};
pub use wait::{with_pause, CountMode, ElementWait};
pub use widgets::{
    AnyInput, Button, Checkbox, Component, InputKind, InputValue, Page, Region, Select, Text,
    Widget,
};
