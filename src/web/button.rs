/// The "Update data" button in the game's side controls
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement};

use crate::error::{Error, Result};
use crate::refresh::RefreshButton;

impl RefreshButton for HtmlButtonElement {
    fn set_label(&self, label: &str) {
        self.set_text_content(Some(label));
    }

    fn set_disabled(&self, disabled: bool) {
        HtmlButtonElement::set_disabled(self, disabled);
    }
}

pub fn create_refresh_button(document: &Document) -> Result<HtmlButtonElement> {
    let button: HtmlButtonElement = document
        .create_element("button")
        .map_err(|e| Error::host("create button", e))?
        .dyn_into()
        .map_err(|e| Error::host("create button", e.into()))?;

    button
        .style()
        .set_property("font-size", "1.25rem")
        .map_err(|e| Error::host("button style", e))?;

    Ok(button)
}
