//! End-to-end widget flows over a fake session, checked through ordered
//! call logs.

use layout_automator::testing::{self, FakeDriver};
use layout_automator::{
    Driver, ElementWait, InputValue, LayoutFactory, ModelData, WaitConfig, Widget,
};
use std::sync::Arc;

const MODEL: &str = r##"
regions:
  hero:
    locator: "#hero"
menus:
  home:
    hero: [ad, doomsday, school-closing]
components:
  locator: .component-wrapper
  ad:
    headline: { type: text, locator: .headline }
    sponsored: { type: checkbox, locator: .sponsored }
    submit: { type: button, locator: .submit }
"##;

fn harness() -> (Arc<FakeDriver>, LayoutFactory) {
    let driver = Arc::new(FakeDriver::new());
    let config = WaitConfig {
        timeout_ms: 40,
        poll_interval_ms: 10,
    };
    let wait = ElementWait::new(Arc::clone(&driver) as Arc<dyn Driver>, config);
    let factory = LayoutFactory::new(ModelData::from_yaml(MODEL).unwrap(), wait);
    (driver, factory)
}

#[tokio::test]
async fn add_components_clicks_menu_open_entries_and_menu_close_in_order() {
    let (driver, factory) = harness();
    driver.place("#hero .panel-title .caret", testing::visible("span"));
    driver.place("#hero .small-box:nth-child(1)", testing::visible("div"));
    driver.place("#hero .small-box:nth-child(2)", testing::visible("div"));

    let region = factory.get_region("hero", "home").unwrap();
    region.add_components(&["ad", "doomsday"]).await.unwrap();

    assert_eq!(
        driver.actions(),
        [
            "click:#hero .panel-title .caret",
            "click:#hero .small-box:nth-child(1)",
            "click:#hero .small-box:nth-child(2)",
            "click:#hero .panel-title .caret",
        ]
    );
}

#[tokio::test]
async fn editing_a_component_drives_its_inputs_through_composed_selectors() {
    let (driver, factory) = harness();

    let component = factory.get_component("hero", 1).unwrap();
    assert_eq!(
        component.locator(),
        "#hero .component-wrapper:nth-child(1)"
    );
    driver.place(
        "#hero .component-wrapper:nth-child(1) .fa-pencil",
        testing::visible("i"),
    );

    let headline = factory.get_input("hero", "ad", "headline").unwrap();
    assert_eq!(headline.locator(), "#hero .component-wrapper .headline");
    driver.place(&headline.locator(), testing::with_value("input", ""));

    let sponsored = factory.get_input("hero", "ad", "sponsored").unwrap();
    driver.place(&sponsored.locator(), testing::checkbox(false));

    component.edit().await.unwrap();
    headline
        .set_value(InputValue::Text("Storm warning".into()))
        .await
        .unwrap();
    sponsored.set_value(InputValue::Flag(true)).await.unwrap();

    assert_eq!(
        driver.actions(),
        [
            "click:#hero .component-wrapper:nth-child(1) .fa-pencil".to_string(),
            format!("clear:{}", headline.locator()),
            format!("type:{}:Storm warning", headline.locator()),
            format!("click:{}", sponsored.locator()),
        ]
    );
}

#[tokio::test]
async fn removing_a_component_clicks_delete_then_the_modal_confirmation() {
    let (driver, factory) = harness();
    driver.place(
        "#hero .component-wrapper:nth-child(2) .fa-times",
        testing::visible("i"),
    );
    driver.place(".swal2-confirm.swal2-styled", testing::visible("button"));

    let component = factory.get_component("hero", 2).unwrap();
    component.delete().await.unwrap();

    assert_eq!(
        driver.actions(),
        [
            "click:#hero .component-wrapper:nth-child(2) .fa-times",
            "click:.swal2-confirm.swal2-styled",
        ]
    );
}
