use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};

use super::{LocationWidget, SubmissionOutcome};
use crate::{core::map::MapSurface, geocoding::Geocoder, Result};

/// The form's address input
pub trait AddressField {
    /// Current value, exactly as typed
    fn address(&self) -> String;
}

/// A form submission event
pub trait SubmitEvent {
    /// Cancels the browser's native submission (full page reload)
    fn prevent_default(&self);
}

/// Form submit handler bound to one widget.
///
/// Widget state is shared through `Rc<RefCell<_>>` and borrowed only in
/// the synchronous parts of a submission, never across the lookup.
pub struct SubmitHandler<M: MapSurface, G: ?Sized, F: ?Sized> {
    widget: Rc<RefCell<LocationWidget<M>>>,
    geocoder: Rc<G>,
    field: Rc<F>,
}

impl<M: MapSurface, G: ?Sized, F: ?Sized> Clone for SubmitHandler<M, G, F> {
    fn clone(&self) -> Self {
        Self {
            widget: Rc::clone(&self.widget),
            geocoder: Rc::clone(&self.geocoder),
            field: Rc::clone(&self.field),
        }
    }
}

impl<M, G, F> SubmitHandler<M, G, F>
where
    M: MapSurface + 'static,
    G: Geocoder + ?Sized + 'static,
    F: AddressField + ?Sized + 'static,
{
    pub fn new(widget: Rc<RefCell<LocationWidget<M>>>, geocoder: Rc<G>, field: Rc<F>) -> Self {
        Self {
            widget,
            geocoder,
            field,
        }
    }

    pub fn widget(&self) -> &Rc<RefCell<LocationWidget<M>>> {
        &self.widget
    }

    /// Handles one submission.
    ///
    /// Default prevention, the address read and the ticket allocation all
    /// happen before this returns. The returned future performs the lookup
    /// and applies it; the caller decides where to spawn it.
    pub fn on_submit<E: SubmitEvent + ?Sized>(
        &self,
        event: &E,
    ) -> LocalBoxFuture<'static, Result<SubmissionOutcome>> {
        event.prevent_default();

        let address = self.field.address();
        let submission = self.widget.borrow_mut().begin_submission(&address);

        let widget = Rc::clone(&self.widget);
        let geocoder = Rc::clone(&self.geocoder);
        let field = Rc::clone(&self.field);

        async move {
            let result = geocoder.geocode(&submission.address).await;
            let title = field.address();
            widget
                .borrow_mut()
                .apply_outcome(&submission, result, &title)
        }
        .boxed_local()
    }
}
