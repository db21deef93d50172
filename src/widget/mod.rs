//! The location widget: one map, one bounds accumulator, one form.
//!
//! A submission moves through three steps. [`LocationWidget::begin_submission`]
//! runs synchronously when the form is submitted and hands out a ticket.
//! The geocoding lookup then runs outside the widget. When it finishes,
//! [`LocationWidget::apply_outcome`] applies the result, but only if no newer
//! submission has started since; otherwise the result is dropped.

pub mod handler;
pub mod status;

use crate::{
    core::{
        config::{ViewportPolicy, WidgetOptions},
        geo::{LatLng, LatLngBounds},
        map::{MapOptions, MapSurface},
    },
    geocoding::{GeocodeCandidate, Geocoder},
    layers::marker::Marker,
    PinpointError, Result,
};

pub use status::{SubmissionOutcome, WidgetStatus};

/// A lookup in flight, identified by its ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub address: String,
}

type StatusListener = Box<dyn Fn(&WidgetStatus)>;

pub struct LocationWidget<M: MapSurface> {
    map: M,
    bounds: LatLngBounds,
    options: WidgetOptions,
    latest_ticket: u64,
    status: WidgetStatus,
    status_listener: Option<StatusListener>,
}

impl<M: MapSurface> LocationWidget<M> {
    /// Puts `map` on the default view and drops the default marker.
    /// Bounds start empty; the default marker is not part of them.
    pub fn initialize(mut map: M, options: WidgetOptions) -> Result<Self> {
        map.set_options(options.initial_map_options())?;

        let mut widget = Self {
            map,
            bounds: LatLngBounds::empty(),
            options,
            latest_ticket: 0,
            status: WidgetStatus::Idle,
            status_listener: None,
        };

        let title = widget.options.default_marker_title.clone();
        widget.drop_marker(widget.options.default_center, &title)?;

        log::info!(
            "location widget ready at {} (zoom {}, {})",
            widget.options.default_center,
            widget.options.default_zoom,
            widget.options.map_type
        );
        Ok(widget)
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn bounds(&self) -> &LatLngBounds {
        &self.bounds
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn status(&self) -> &WidgetStatus {
        &self.status
    }

    pub fn latest_ticket(&self) -> u64 {
        self.latest_ticket
    }

    /// Registers a callback invoked on every status change
    pub fn set_status_listener(&mut self, listener: impl Fn(&WidgetStatus) + 'static) {
        self.status_listener = Some(Box::new(listener));
    }

    /// Starts a lookup for `address`, superseding any lookup still in flight.
    /// The address is taken verbatim, empty strings included.
    pub fn begin_submission(&mut self, address: &str) -> Submission {
        self.latest_ticket += 1;
        log::debug!("submission #{} for {:?}", self.latest_ticket, address);

        self.set_status(WidgetStatus::Pending {
            address: address.to_string(),
        });
        Submission {
            ticket: self.latest_ticket,
            address: address.to_string(),
        }
    }

    pub fn is_current(&self, submission: &Submission) -> bool {
        submission.ticket == self.latest_ticket
    }

    /// Applies a finished lookup.
    ///
    /// `title` is the form's address value at completion time and becomes
    /// the new marker's title. Lookup failures, empty results and map
    /// updates that fail all leave the map and bounds as they were and end
    /// in a `Failed` or `NotFound` status, never a stuck `Pending`.
    pub fn apply_outcome(
        &mut self,
        submission: &Submission,
        result: Result<Vec<GeocodeCandidate>>,
        title: &str,
    ) -> Result<SubmissionOutcome> {
        if !self.is_current(submission) {
            log::debug!(
                "dropping stale result for submission #{} (latest is #{})",
                submission.ticket,
                self.latest_ticket
            );
            return Ok(SubmissionOutcome::Superseded);
        }

        let address = submission.address.clone();
        let candidates = match result {
            Ok(candidates) => candidates,
            Err(err) => {
                log::warn!("geocoding {:?} failed: {}", address, err);
                let reason = err.to_string();
                self.set_status(WidgetStatus::Failed {
                    address,
                    reason: reason.clone(),
                });
                return Ok(SubmissionOutcome::Failed(reason));
            }
        };

        let Some(best) = candidates.first() else {
            log::info!("no match for {:?}", address);
            self.set_status(WidgetStatus::NotFound { address });
            return Ok(SubmissionOutcome::NotFound);
        };

        let location = best.location;
        if let Err(err) = self.add_location(location, title) {
            log::warn!("could not show {:?} at {}: {}", address, location, err);
            let reason = err.to_string();
            self.set_status(WidgetStatus::Failed {
                address,
                reason: reason.clone(),
            });
            return Ok(SubmissionOutcome::Failed(reason));
        }

        self.set_status(WidgetStatus::Located { address, location });
        Ok(SubmissionOutcome::Located(location))
    }

    /// Re-centers the map on `location`, grows the bounds and drops a
    /// marker titled `title`. The final viewport follows the configured
    /// [`ViewportPolicy`].
    pub fn add_location(&mut self, location: LatLng, title: &str) -> Result<()> {
        if !location.is_valid() {
            return Err(PinpointError::InvalidCoordinates(location.to_string()));
        }

        let previous_view = MapOptions {
            center: self.map.center(),
            zoom: self.map.zoom(),
            map_type: self.map.map_type(),
        };
        let previous_bounds = self.bounds.clone();

        if let Err(err) = self.place_location(location, title) {
            // Roll back so a failed update never leaves the map half-moved
            self.bounds = previous_bounds;
            if let Err(restore_err) = self.map.set_options(previous_view) {
                log::warn!("could not restore the previous view: {}", restore_err);
            }
            return Err(err);
        }

        log::info!("added location {} ({} markers)", location, self.map.marker_count());
        Ok(())
    }

    fn place_location(&mut self, location: LatLng, title: &str) -> Result<()> {
        self.map
            .set_options(self.options.recenter_options(location))?;
        self.bounds.extend(&location);

        // A single-point box would zoom all the way in; keep the default zoom
        if self.options.viewport_policy == ViewportPolicy::FitAllLocations
            && !self.bounds.is_point()
        {
            self.map.fit_bounds(&self.bounds)?;
        }

        self.drop_marker(location, title)
    }

    /// Runs a whole submission against `geocoder`, titling the marker with
    /// the submitted address.
    pub async fn submit<G: Geocoder + ?Sized>(
        &mut self,
        geocoder: &G,
        address: &str,
    ) -> Result<SubmissionOutcome> {
        let submission = self.begin_submission(address);
        let result = geocoder.geocode(&submission.address).await;
        self.apply_outcome(&submission, result, address)
    }

    fn drop_marker(&mut self, position: LatLng, title: &str) -> Result<()> {
        self.map.add_marker(Marker::new(position, title))
    }

    fn set_status(&mut self, status: WidgetStatus) {
        self.status = status;
        if let Some(listener) = &self.status_listener {
            listener(&self.status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{geo::MapTypeId, map::MapView};
    use std::cell::RefCell;
    use std::rc::Rc;

    const CUPERTINO: LatLng = LatLng {
        lat: 37.3318,
        lng: -122.0312,
    };

    fn widget(policy: ViewportPolicy) -> LocationWidget<MapView> {
        let options = WidgetOptions::default().with_viewport_policy(policy);
        let map = MapView::new(options.initial_map_options());
        LocationWidget::initialize(map, options).unwrap()
    }

    fn found(location: LatLng) -> Result<Vec<GeocodeCandidate>> {
        Ok(vec![GeocodeCandidate::new(location)])
    }

    /// A map whose markers can be switched to fail after setup
    struct RejectingMap {
        view: MapView,
        reject_markers: bool,
    }

    impl MapSurface for RejectingMap {
        fn set_options(&mut self, options: MapOptions) -> Result<()> {
            self.view.set_options(options)
        }

        fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
            self.view.fit_bounds(bounds)
        }

        fn add_marker(&mut self, marker: Marker) -> Result<()> {
            if self.reject_markers {
                return Err(PinpointError::Dom("marker rejected".into()));
            }
            self.view.add_marker(marker)
        }

        fn center(&self) -> LatLng {
            self.view.center()
        }

        fn zoom(&self) -> u8 {
            self.view.zoom()
        }

        fn map_type(&self) -> MapTypeId {
            self.view.map_type()
        }

        fn marker_count(&self) -> usize {
            self.view.marker_count()
        }
    }

    #[test]
    fn test_initial_state() {
        let widget = widget(ViewportPolicy::CenterOnLatest);
        let options = WidgetOptions::default();

        assert_eq!(widget.map().center(), options.default_center);
        assert_eq!(widget.map().zoom(), options.default_zoom);
        assert_eq!(widget.map().marker_count(), 1);
        assert_eq!(widget.map().markers()[0].title(), "Eleven Fifty Coding Academy");
        assert_eq!(widget.map().markers()[0].position(), options.default_center);
        assert!(widget.bounds().is_empty());
        assert_eq!(widget.status(), &WidgetStatus::Idle);
    }

    #[test]
    fn test_add_location_recenters() {
        let mut widget = widget(ViewportPolicy::CenterOnLatest);
        let denver = LatLng::new(39.7392, -104.9903);

        widget.add_location(CUPERTINO, "one").unwrap();
        widget.add_location(denver, "two").unwrap();

        assert_eq!(widget.map().center(), denver);
        assert_eq!(widget.map().zoom(), 15);
        assert!(widget.bounds().contains(&CUPERTINO));
        assert!(widget.bounds().contains(&denver));
    }

    #[test]
    fn test_fit_all_locations_policy() {
        let mut widget = widget(ViewportPolicy::FitAllLocations);

        widget.add_location(CUPERTINO, "one").unwrap();
        // One point: stay at the default zoom on that point
        assert_eq!(widget.map().center(), CUPERTINO);
        assert_eq!(widget.map().zoom(), 15);

        let indy = LatLng::new(39.957139, -86.175216);
        widget.add_location(indy, "two").unwrap();
        assert_eq!(widget.map().center(), widget.bounds().center().unwrap());
        assert!(widget.map().zoom() < 15);
    }

    #[test]
    fn test_add_invalid_location_is_rejected() {
        let mut widget = widget(ViewportPolicy::CenterOnLatest);
        let err = widget.add_location(LatLng::new(120.0, 0.0), "bad").unwrap_err();
        assert!(matches!(err, PinpointError::InvalidCoordinates(_)));
        assert_eq!(widget.map().marker_count(), 1);
        assert!(widget.bounds().is_empty());
    }

    #[test]
    fn test_first_candidate_wins() {
        let mut widget = widget(ViewportPolicy::CenterOnLatest);
        let submission = widget.begin_submission("Cupertino");
        let candidates = vec![
            GeocodeCandidate::new(CUPERTINO),
            GeocodeCandidate::new(LatLng::new(10.0, 10.0)),
        ];

        let outcome = widget
            .apply_outcome(&submission, Ok(candidates), "Cupertino")
            .unwrap();

        assert_eq!(outcome, SubmissionOutcome::Located(CUPERTINO));
        assert!(!widget.bounds().contains(&LatLng::new(10.0, 10.0)));
    }

    #[test]
    fn test_empty_result_is_not_found() {
        let mut widget = widget(ViewportPolicy::CenterOnLatest);
        let before_center = widget.map().center();
        let submission = widget.begin_submission("zzzzzznotaplace");

        let outcome = widget
            .apply_outcome(&submission, Ok(Vec::new()), "zzzzzznotaplace")
            .unwrap();

        assert_eq!(outcome, SubmissionOutcome::NotFound);
        assert_eq!(widget.map().center(), before_center);
        assert_eq!(widget.map().marker_count(), 1);
        assert!(widget.bounds().is_empty());
        assert_eq!(
            widget.status(),
            &WidgetStatus::NotFound {
                address: "zzzzzznotaplace".into()
            }
        );
    }

    #[test]
    fn test_failure_leaves_map_untouched() {
        let mut widget = widget(ViewportPolicy::CenterOnLatest);
        let submission = widget.begin_submission("anywhere");

        let outcome = widget
            .apply_outcome(&submission, Err(PinpointError::HttpStatus(500)), "anywhere")
            .unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Failed(_)));
        assert_eq!(widget.map().marker_count(), 1);
        assert!(widget.bounds().is_empty());
        assert!(matches!(widget.status(), WidgetStatus::Failed { .. }));
    }

    #[test]
    fn test_invalid_candidate_reports_failure() {
        let mut widget = widget(ViewportPolicy::CenterOnLatest);
        let before = widget.map().clone();
        let submission = widget.begin_submission("somewhere");

        let outcome = widget
            .apply_outcome(&submission, found(LatLng::new(120.0, 0.0)), "somewhere")
            .unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Failed(_)));
        assert_eq!(widget.map(), &before);
        assert!(widget.bounds().is_empty());
        match widget.status() {
            WidgetStatus::Failed { address, reason } => {
                assert_eq!(address, "somewhere");
                assert!(reason.starts_with("Invalid coordinates"), "{reason}");
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn test_map_failure_rolls_back_and_reports_failure() {
        let options = WidgetOptions::default().with_viewport_policy(ViewportPolicy::FitAllLocations);
        let map = RejectingMap {
            view: MapView::new(options.initial_map_options()),
            reject_markers: false,
        };
        let mut widget = LocationWidget::initialize(map, options).unwrap();
        widget.add_location(CUPERTINO, "one").unwrap();
        let view_before = widget.map().view.clone();
        let bounds_before = widget.bounds().clone();

        widget.map_mut().reject_markers = true;
        let submission = widget.begin_submission("Denver");
        let outcome = widget
            .apply_outcome(&submission, found(LatLng::new(39.7392, -104.9903)), "Denver")
            .unwrap();

        assert_eq!(outcome, SubmissionOutcome::Failed("DOM error: marker rejected".into()));
        assert_eq!(widget.map().view, view_before);
        assert_eq!(widget.bounds(), &bounds_before);
        assert!(matches!(widget.status(), WidgetStatus::Failed { .. }));
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut widget = widget(ViewportPolicy::CenterOnLatest);
        let first = widget.begin_submission("first");
        let second = widget.begin_submission("second");
        assert!(!widget.is_current(&first));

        let denver = LatLng::new(39.7392, -104.9903);
        let outcome = widget.apply_outcome(&second, found(denver), "second").unwrap();
        assert_eq!(outcome, SubmissionOutcome::Located(denver));

        let stale = widget.apply_outcome(&first, found(CUPERTINO), "first").unwrap();
        assert_eq!(stale, SubmissionOutcome::Superseded);
        assert_eq!(widget.map().center(), denver);
        assert_eq!(widget.map().marker_count(), 2);
        assert!(!widget.bounds().contains(&CUPERTINO));
    }

    #[test]
    fn test_marker_title_comes_from_completion_time_value() {
        let mut widget = widget(ViewportPolicy::CenterOnLatest);
        let submission = widget.begin_submission("1 Infinite Loop");

        widget
            .apply_outcome(&submission, found(CUPERTINO), "edited while waiting")
            .unwrap();

        let marker = widget.map().markers().last().unwrap();
        assert_eq!(marker.title(), "edited while waiting");
        assert_eq!(marker.position(), CUPERTINO);
    }

    #[test]
    fn test_status_listener_sees_transitions() {
        let mut widget = widget(ViewportPolicy::CenterOnLatest);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        widget.set_status_listener(move |status| sink.borrow_mut().push(status.clone()));

        let submission = widget.begin_submission("Cupertino");
        widget.apply_outcome(&submission, found(CUPERTINO), "Cupertino").unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].is_pending());
        assert!(matches!(seen[1], WidgetStatus::Located { .. }));
    }
}
