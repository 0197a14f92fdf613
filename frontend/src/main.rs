use crate::components::{
    map_component::{Focus, MapComponent},
    workout_form::WorkoutForm,
    workout_list::WorkoutList,
};
use gloo_console::{error, info};
use gloo_utils::window;
use storage::LocalStore;
use workout_tracker_lib::{
    config::TrackerConfig,
    form::FormInput,
    geolocation::GeolocationError,
    tracker::Tracker,
    workout::{Coordinates, WorkoutId},
};
use yew::prelude::*;

mod components;
mod geolocation;
mod storage;

fn alert(message: &str) {
    if let Err(err) = window().alert_with_message(message) {
        error!(format!("Failed to show alert \"{}\": {:?}", message, err));
    }
}

enum MainMsg {
    Located(Coordinates),
    LocationFailed(GeolocationError),
    MapClicked(Coordinates),
    Submit(FormInput),
    Select(WorkoutId),
    Reset,
}

struct Model {
    tracker: Tracker<LocalStore>,
    center: Option<Coordinates>,
    focus: Option<Focus>,
    pending_save: bool,
}

impl Model {
    fn save(&mut self) {
        if let Err(err) = self.tracker.persist() {
            error!(format!("Failed to save workouts: {}", err));
            alert(&format!("Could not save your workouts: {err}"));
        }
    }
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut tracker = Tracker::new(LocalStore, TrackerConfig::default());

        match tracker.restore() {
            Ok(count) => info!(format!("Restored {} workouts", count)),
            Err(err) => {
                error!(format!("Failed to restore workouts: {}", err));
                alert(&format!(
                    "Stored workouts could not be loaded: {err}. New workouts will not be saved until you press Reset."
                ));
            }
        }

        let link = ctx.link();
        geolocation::request_position(link.callback(MainMsg::Located), link.callback(MainMsg::LocationFailed));

        Self {
            tracker,
            center: None,
            focus: None,
            pending_save: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Located(coords) => {
                info!(format!("Located at {}, {}", coords.lat, coords.lng));
                self.center = Some(coords);
            }
            MainMsg::LocationFailed(err) => {
                error!(format!("Geolocation failed: {}", err));
                alert(&err.to_string());
                return false;
            }
            MainMsg::MapClicked(coords) => {
                self.tracker.map_clicked(coords);
            }
            MainMsg::Submit(input) => match self.tracker.submit(&input) {
                Ok(workout) => {
                    info!(format!("Added workout {}", workout.id()));
                    // Saved in rendered(), once the marker and entry are drawn
                    self.pending_save = true;
                }
                Err(err) => {
                    alert(&err.to_string());
                    return false;
                }
            },
            MainMsg::Select(id) => {
                let Some(at) = self.tracker.select(&id) else {
                    return false;
                };
                let seq = self.focus.map_or(0, |f| f.seq.wrapping_add(1));
                self.focus = Some(Focus { at, seq });
                self.pending_save = true;
            }
            MainMsg::Reset => {
                if let Err(err) = self.tracker.clear() {
                    error!(format!("Failed to clear workouts: {}", err));
                    alert(&format!("Could not delete your workouts: {err}"));
                    return false;
                }
                info!("Cleared workouts, reloading");
                if let Err(err) = window().location().reload() {
                    error!(format!("Failed to reload after clearing workouts: {:?}", err));
                    alert("Your workouts were deleted. Please reload the page.");
                }
            }
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.pending_save {
            self.pending_save = false;
            self.save();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let config = self.tracker.config().clone();
        let workouts = self.tracker.workouts().to_vec();
        let has_workouts = !workouts.is_empty();

        let on_submit = link.callback(MainMsg::Submit);
        let on_select = link.callback(MainMsg::Select);
        let on_map_click = link.callback(MainMsg::MapClicked);
        let on_reset = link.callback(|_: MouseEvent| MainMsg::Reset);

        html! { <>
            <div class="sidebar">
                <ul class="workouts">
                    <WorkoutForm
                        open={self.tracker.form().is_open()}
                        reset_delay_ms={config.form_reset_delay_ms}
                        {on_submit}
                    />
                    <WorkoutList workouts={workouts.clone()} {on_select} />
                </ul>
                if has_workouts {
                    <button class="reset-btn" onclick={on_reset}>{"Reset"}</button>
                }
            </div>
            if let Some(center) = self.center {
                <MapComponent {center} workouts={workouts.clone()} focus={self.focus} {config} on_click={on_map_click} />
            } else {
                <div class="map-container map-container--waiting">{"Waiting for your location…"}</div>
            }
        </> }
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
