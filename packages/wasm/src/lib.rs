//! WebAssembly bindings for the Inkmark highlighter.
//!
//! The page script mirrors its content into a document snapshot, forwards
//! selection and pointer events, and re-renders from the HTML handed back.

use inkmark_dom::{to_html, Document, DomEvent, HtmlOptions, SelectionSnapshot};
use inkmark_highlighter::{ColorKey, EventOutcome, Highlighter, Palette};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Document plus highlighter, independent of the JS types
struct Page {
    doc: Document,
    highlighter: Highlighter,
}

impl Page {
    fn load(snapshot_json: &str, on_session_end: impl FnMut() + 'static) -> Result<Self, String> {
        let doc = Document::from_json(snapshot_json)
            .map_err(|e| format!("Snapshot error: {}", e))?;
        let mut highlighter = Highlighter::new(on_session_end);
        highlighter.resume(&doc);
        Ok(Self { doc, highlighter })
    }

    fn start(&mut self, color: &str) -> Result<(), String> {
        let color = ColorKey::new(color).map_err(|e| format!("Color error: {}", e))?;
        self.highlighter.start(&mut self.doc, color);
        Ok(())
    }

    fn stop(&mut self) {
        self.highlighter.stop(&mut self.doc);
    }

    /// `null` clears the selection
    fn set_selection(&mut self, json: &str) -> Result<(), String> {
        let selection: Option<SelectionSnapshot> =
            serde_json::from_str(json).map_err(|e| format!("Selection error: {}", e))?;
        match selection {
            Some(selection) => {
                let range = selection
                    .resolve(&self.doc)
                    .map_err(|e| format!("Selection error: {}", e))?;
                self.doc.selection_mut().set_range(range);
            }
            None => self.doc.selection_mut().remove_all_ranges(),
        }
        Ok(())
    }

    fn dispatch(&mut self, event: DomEvent) -> Result<EventOutcome, String> {
        self.highlighter
            .handle_event(&mut self.doc, event)
            .map_err(|e| format!("Highlight error: {}", e))
    }

    /// Id of the group committed by this release, if any
    fn pointer_up(&mut self) -> Result<Option<String>, String> {
        Ok(match self.dispatch(DomEvent::PointerUp)? {
            EventOutcome::Released(Some(group)) => Some(group.id),
            _ => None,
        })
    }

    fn select_start(&mut self) -> Result<bool, String> {
        Ok(self.dispatch(DomEvent::SelectStart)? == EventOutcome::Suppressed)
    }

    /// True when the click removed a highlight
    fn click(&mut self, path: &str) -> Result<bool, String> {
        let path = parse_path(path)?;
        let target = self
            .doc
            .node_at_path(&path)
            .ok_or_else(|| format!("No node at path {:?}", path))?;
        Ok(matches!(
            self.dispatch(DomEvent::Click { target })?,
            EventOutcome::Removed { .. }
        ))
    }

    fn remove_highlight(&mut self, group_id: &str) -> Result<usize, String> {
        self.highlighter
            .remove_highlight(&mut self.doc, group_id)
            .map_err(|e| format!("Highlight error: {}", e))
    }

    fn remove_all_highlights(&mut self) -> Result<usize, String> {
        self.highlighter
            .remove_all_highlights(&mut self.doc)
            .map_err(|e| format!("Highlight error: {}", e))
    }

    fn highlights_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.highlighter.highlights(&self.doc))
            .map_err(|e| format!("Serialization error: {}", e))
    }

    fn snapshot_json(&self) -> Result<String, String> {
        self.doc
            .to_json(false)
            .map_err(|e| format!("Serialization error: {}", e))
    }
}

/// `0/1/2` (child indices from the document root)
fn parse_path(path: &str) -> Result<Vec<usize>, String> {
    path.split('/')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| {
            segment
                .trim()
                .parse()
                .map_err(|_| format!("Bad path segment '{}'", segment))
        })
        .collect()
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

#[wasm_bindgen]
pub struct HighlightController {
    page: Page,
}

#[wasm_bindgen]
impl HighlightController {
    /// `onSessionEnd` is called with no arguments after every session
    #[wasm_bindgen(constructor)]
    pub fn new(
        snapshot_json: &str,
        on_session_end: js_sys::Function,
    ) -> Result<HighlightController, JsValue> {
        let page = Page::load(snapshot_json, move || {
            // An exception thrown by the page callback stays on the JS side
            let _ = on_session_end.call0(&JsValue::NULL);
        })
        .map_err(js_error)?;
        Ok(HighlightController { page })
    }

    pub fn start(&mut self, color: &str) -> Result<(), JsValue> {
        self.page.start(color).map_err(js_error)
    }

    pub fn stop(&mut self) {
        self.page.stop();
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.page.highlighter.is_active()
    }

    #[wasm_bindgen(getter, js_name = activeColor)]
    pub fn active_color(&self) -> Option<String> {
        self.page.highlighter.active_color().map(ToString::to_string)
    }

    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, selection_json: &str) -> Result<(), JsValue> {
        self.page.set_selection(selection_json).map_err(js_error)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<Option<String>, JsValue> {
        self.page.pointer_up().map_err(js_error)
    }

    /// True when the page should cancel the native `selectstart`
    #[wasm_bindgen(js_name = selectStart)]
    pub fn select_start(&mut self) -> Result<bool, JsValue> {
        self.page.select_start().map_err(js_error)
    }

    /// True when the page should stop the click from propagating
    pub fn click(&mut self, path: &str) -> Result<bool, JsValue> {
        self.page.click(path).map_err(js_error)
    }

    #[wasm_bindgen(js_name = removeHighlight)]
    pub fn remove_highlight(&mut self, group_id: &str) -> Result<usize, JsValue> {
        self.page.remove_highlight(group_id).map_err(js_error)
    }

    #[wasm_bindgen(js_name = removeAllHighlights)]
    pub fn remove_all_highlights(&mut self) -> Result<usize, JsValue> {
        self.page.remove_all_highlights().map_err(js_error)
    }

    #[wasm_bindgen(js_name = toHtml)]
    pub fn to_html(&self) -> String {
        to_html(&self.page.doc, HtmlOptions::default())
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.page.snapshot_json().map_err(js_error)
    }

    /// JSON list of `{ id, color, chunks }`
    pub fn highlights(&self) -> Result<String, JsValue> {
        self.page.highlights_json().map_err(js_error)
    }
}

/// CSS for the default palette
#[wasm_bindgen]
pub fn stylesheet() -> String {
    Palette::default().stylesheet()
}

#[wasm_bindgen(js_name = defaultPalette)]
pub fn default_palette() -> Result<String, JsValue> {
    serde_json::to_string(&Palette::default())
        .map_err(|e| js_error(format!("Serialization error: {}", e)))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    const SNAPSHOT: &str = r#"[{"type": "Element", "tag": "body", "children": [
        {"type": "Text", "content": "Hello world"}
    ]}]"#;

    #[wasm_bindgen_test]
    fn test_controller_round_trip() {
        let callback = js_sys::Function::new_no_args("");
        let mut controller = HighlightController::new(SNAPSHOT, callback).unwrap();
        controller.start("green").unwrap();
        assert!(controller.is_active());

        controller
            .set_selection(r#"{"start": {"path": [0, 0], "offset": 6}, "end": {"path": [0, 0], "offset": 11}}"#)
            .unwrap();
        assert_eq!(controller.pointer_up().unwrap(), Some("highlight_1".to_string()));
        assert!(!controller.is_active());

        assert_eq!(controller.remove_all_highlights().unwrap(), 1);
        assert_eq!(controller.to_html(), "<body>Hello world</body>");
    }

    #[wasm_bindgen_test]
    fn test_invalid_snapshot_rejected() {
        let callback = js_sys::Function::new_no_args("");
        assert!(HighlightController::new("{", callback).is_err());
    }
}
