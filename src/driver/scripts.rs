//! JavaScript snippets injected by `ChromeDriver`.
//!
//! Every query runs against a root document chosen at call time: the top
//! document, or the `contentDocument` of the active frame. Selector and value
//! arguments are embedded as JSON string literals to keep quoting safe.

/// JS expression for the active root document.
fn root_expr(frame: Option<&str>) -> String {
    match frame {
        Some(frame_selector) => format!(
            "(document.querySelector({})?.contentDocument ?? null)",
            js_str(frame_selector)
        ),
        None => "document".to_string(),
    }
}

fn js_str(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Serialize every match of `selector` into the `ElementSnapshot` shape.
pub fn query_all(selector: &str, frame: Option<&str>) -> String {
    format!(
        r#"
        (function() {{
            const root = {root};
            if (!root) return "[]";
            const snapshot = (el) => {{
                const view = el.ownerDocument.defaultView;
                const style = view.getComputedStyle(el);
                const rect = el.getBoundingClientRect();
                const attributes = {{}};
                for (const attr of el.attributes) attributes[attr.name] = attr.value;
                if (el.value !== undefined) attributes["value"] = String(el.value);
                const tag = el.tagName.toLowerCase();
                return {{
                    tag_name: tag,
                    attributes,
                    text: (el.textContent || "").trim(),
                    displayed: style.display !== "none"
                        && style.visibility !== "hidden"
                        && rect.width > 0 && rect.height > 0,
                    enabled: !el.disabled,
                    selected: !!el.checked,
                    option_values: tag === "select"
                        ? Array.from(el.options).map(o => o.value)
                        : [],
                }};
            }};
            const matches = Array.from(root.querySelectorAll({selector}));
            return JSON.stringify(matches.map(snapshot));
        }})()
        "#,
        root = root_expr(frame),
        selector = js_str(selector),
    )
}

/// Click the first match, returning whether one existed.
pub fn click_first(selector: &str, frame: Option<&str>) -> String {
    format!(
        r#"
        (function() {{
            const root = {root};
            const el = root ? root.querySelector({selector}) : null;
            if (!el) return false;
            el.click();
            return true;
        }})()
        "#,
        root = root_expr(frame),
        selector = js_str(selector),
    )
}

/// Clear the first matching input and fire an `input` event.
pub fn clear_first(selector: &str, frame: Option<&str>) -> String {
    format!(
        r#"
        (function() {{
            const root = {root};
            const el = root ? root.querySelector({selector}) : null;
            if (!el) return false;
            el.value = "";
            el.dispatchEvent(new Event("input", {{ bubbles: true }}));
            return true;
        }})()
        "#,
        root = root_expr(frame),
        selector = js_str(selector),
    )
}

/// Append text to the first matching input and fire `input`/`change` events.
pub fn type_into_first(selector: &str, text: &str, frame: Option<&str>) -> String {
    format!(
        r#"
        (function() {{
            const root = {root};
            const el = root ? root.querySelector({selector}) : null;
            if (!el) return false;
            el.focus();
            el.value = (el.value || "") + {text};
            el.dispatchEvent(new Event("input", {{ bubbles: true }}));
            el.dispatchEvent(new Event("change", {{ bubbles: true }}));
            return true;
        }})()
        "#,
        root = root_expr(frame),
        selector = js_str(selector),
        text = js_str(text),
    )
}

/// Select the option with the given value and fire a `change` event.
pub fn select_option_first(selector: &str, value: &str, frame: Option<&str>) -> String {
    format!(
        r#"
        (function() {{
            const root = {root};
            const el = root ? root.querySelector({selector}) : null;
            if (!el) return false;
            el.value = {value};
            el.dispatchEvent(new Event("change", {{ bubbles: true }}));
            return true;
        }})()
        "#,
        root = root_expr(frame),
        selector = js_str(selector),
        value = js_str(value),
    )
}

/// Simulate a drag gesture from one element's center to another's.
pub fn drag_to(source: &str, target: &str, frame: Option<&str>) -> String {
    format!(
        r#"
        (function() {{
            const root = {root};
            const src = root ? root.querySelector({source}) : null;
            const dst = root ? root.querySelector({target}) : null;
            if (!src || !dst) return false;
            const center = (el) => {{
                const r = el.getBoundingClientRect();
                return {{ x: r.left + r.width / 2, y: r.top + r.height / 2 }};
            }};
            const from = center(src);
            const to = center(dst);
            const fire = (el, type, at) => el.dispatchEvent(new MouseEvent(type, {{
                bubbles: true, cancelable: true, clientX: at.x, clientY: at.y,
            }}));
            fire(src, "mousedown", from);
            fire(src, "mousemove", to);
            fire(dst, "mousemove", to);
            fire(dst, "mouseup", to);
            return true;
        }})()
        "#,
        root = root_expr(frame),
        source = js_str(source),
        target = js_str(target),
    )
}

/// Simulate a drag gesture from an element's center by a pixel offset.
pub fn drag_by_offset(selector: &str, dx: i64, dy: i64, frame: Option<&str>) -> String {
    format!(
        r#"
        (function() {{
            const root = {root};
            const el = root ? root.querySelector({selector}) : null;
            if (!el) return false;
            const r = el.getBoundingClientRect();
            const from = {{ x: r.left + r.width / 2, y: r.top + r.height / 2 }};
            const to = {{ x: from.x + {dx}, y: from.y + {dy} }};
            const fire = (type, at) => el.dispatchEvent(new MouseEvent(type, {{
                bubbles: true, cancelable: true, clientX: at.x, clientY: at.y,
            }}));
            fire("mousedown", from);
            fire("mousemove", to);
            fire("mouseup", to);
            return true;
        }})()
        "#,
        root = root_expr(frame),
        selector = js_str(selector),
        dx = dx,
        dy = dy,
    )
}

/// Whether `selector` matches a frame element with an accessible document.
pub fn frame_is_available(selector: &str) -> String {
    format!(
        r#"
        (function() {{
            const el = document.querySelector({selector});
            return !!(el && el.contentDocument);
        }})()
        "#,
        selector = js_str(selector),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_is_embedded_as_json_literal() {
        let script = query_all("a[title=\"it's\"]", None);
        assert!(script.contains(r#""a[title=\"it's\"]""#));
    }

    #[test]
    fn frame_root_targets_content_document() {
        let script = click_first(".btn", Some("iframe.editor"));
        assert!(script.contains("contentDocument"));
        assert!(script.contains(r#""iframe.editor""#));
    }
}
