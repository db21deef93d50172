use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement};

use crate::{
    constants::ADDRESS_FIELD_NAME,
    widget::handler::{AddressField, SubmitEvent},
    PinpointError, Result,
};

impl SubmitEvent for Event {
    fn prevent_default(&self) {
        Event::prevent_default(self);
    }
}

/// The `address` input of the geocoder form
pub struct FormField {
    input: HtmlInputElement,
}

impl FormField {
    pub fn from_form(form: &HtmlFormElement) -> Result<Self> {
        let selector = format!("[name=\"{ADDRESS_FIELD_NAME}\"]");
        let input = form
            .query_selector(&selector)
            .map_err(|e| PinpointError::Dom(format!("{e:?}")))?
            .ok_or_else(|| PinpointError::Dom(format!("form has no {selector} field")))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| PinpointError::Dom(format!("{selector} is not an input")))?;

        Ok(Self { input })
    }
}

impl AddressField for FormField {
    fn address(&self) -> String {
        self.input.value()
    }
}

pub fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| PinpointError::Dom("no document available".to_string()))
}

pub fn select(document: &Document, selector: &str) -> Result<Element> {
    document
        .query_selector(selector)
        .map_err(|e| PinpointError::Dom(format!("{e:?}")))?
        .ok_or_else(|| PinpointError::Dom(format!("nothing matches {selector}")))
}

pub fn select_form(document: &Document, selector: &str) -> Result<HtmlFormElement> {
    select(document, selector)?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| PinpointError::Dom(format!("{selector} is not a form")))
}
