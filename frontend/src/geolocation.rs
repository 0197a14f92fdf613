use gloo_utils::window;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Position as GeolocationPosition, PositionError as GeolocationPositionError};
use workout_tracker_lib::{geolocation::GeolocationError, workout::Coordinates};
use yew::Callback;

/// Asks the browser for the current position. Exactly one of the callbacks fires.
pub fn request_position(on_success: Callback<Coordinates>, on_error: Callback<GeolocationError>) {
    let Ok(geolocation) = window().navigator().geolocation() else {
        on_error.emit(GeolocationError::Unsupported);
        return;
    };

    let success = Closure::once_into_js(move |position: JsValue| {
        let coords = position.unchecked_into::<GeolocationPosition>().coords();
        on_success.emit(Coordinates::new(coords.latitude(), coords.longitude()));
    });

    let error_cb = on_error.clone();
    let failure = Closure::once_into_js(move |err: JsValue| {
        let err = err.unchecked_into::<GeolocationPositionError>();
        error_cb.emit(GeolocationError::from_code(err.code(), err.message()));
    });

    if let Err(err) = geolocation.get_current_position_with_error_callback(success.unchecked_ref(), Some(failure.unchecked_ref())) {
        on_error.emit(GeolocationError::Other(format!("{err:?}")));
    }
}
