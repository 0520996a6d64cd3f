pub mod component;
pub mod inputs;
pub mod page;
pub mod region;

pub use component::Component;
pub use inputs::{AnyInput, Button, Checkbox, InputKind, InputValue, Select, Text};
pub use page::Page;
pub use region::Region;

/// The one capability every widget has: an effective selector, derived on
/// demand from owned fields. Widgets never hold live node references, so they
/// cannot go stale; re-resolution happens inside `ElementWait` on every call.
pub trait Widget {
    fn locator(&self) -> String;
}
