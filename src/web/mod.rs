//! Browser entry point.
//!
//! `mount` wires the widget to the page: the map container, the address
//! form and an optional status element. It attaches exactly one `submit`
//! listener, which lives for the rest of the page session.

pub mod dom;
pub mod google_maps;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::{
    core::config::WidgetOptions,
    geocoding::google::GoogleGeocoder,
    widget::{handler::SubmitHandler, LocationWidget},
    Result,
};
use dom::FormField;
use google_maps::GoogleMap;

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.level(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn init_console() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

/// Mounts the widget. `options_json` is an optional JSON object with
/// [`WidgetOptions`] fields; anything omitted keeps its default.
#[wasm_bindgen]
pub fn mount(options_json: Option<String>) -> std::result::Result<(), JsValue> {
    init_console();

    let options = match options_json {
        Some(json) => serde_json::from_str::<WidgetOptions>(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => WidgetOptions::default(),
    };

    mount_with(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub fn mount_with(options: WidgetOptions) -> Result<()> {
    let document = dom::document()?;
    let container = dom::select(&document, &options.map_selector)?;
    let form = dom::select_form(&document, &options.form_selector)?;
    let status_element = match &options.status_selector {
        Some(selector) => Some(dom::select(&document, selector)?),
        None => None,
    };

    let map = GoogleMap::attach(&container, options.initial_map_options())?;
    let geocoder = Rc::new(GoogleGeocoder::new(options.geocoder.clone()));
    let field = Rc::new(FormField::from_form(&form)?);

    let mut widget = LocationWidget::initialize(map, options)?;
    if let Some(element) = status_element {
        widget.set_status_listener(move |status| {
            element.set_text_content(Some(&status.to_string()));
        });
    }

    let handler = SubmitHandler::new(Rc::new(RefCell::new(widget)), geocoder, field);
    let on_submit = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        let lookup = handler.on_submit(&event);
        wasm_bindgen_futures::spawn_local(async move {
            match lookup.await {
                Ok(outcome) => log::debug!("submission finished: {:?}", outcome),
                Err(err) => log::error!("could not update the map: {}", err),
            }
        });
    });

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(|e| crate::PinpointError::Dom(format!("{e:?}")))?;
    // The listener stays attached for the page's lifetime
    on_submit.forget();

    Ok(())
}
