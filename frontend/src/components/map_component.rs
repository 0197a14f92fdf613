use gloo_console::info;
use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use web_sys::{
    HtmlElement, Node,
    js_sys::{Function, Object, Reflect},
};
use workout_tracker_lib::{
    config::{PopupConfig, TrackerConfig},
    map::{MapAdapter, MarkerLayer},
    workout::{Coordinates, Workout},
};
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Leaflet calls the bindings don't cover with the options we need.
    type LeafletObject;

    #[wasm_bindgen(method)]
    fn on(this: &LeafletObject, kind: &str, handler: &Function);

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view_with_options(this: &LeafletObject, center: &LatLng, zoom: f64, options: &Object);

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &LeafletObject);
}

fn set_option(target: &JsValue, key: &str, value: impl Into<JsValue>) {
    // Reflect::set only fails on non-objects
    let _ = Reflect::set(target, &key.into(), &value.into());
}

/// Leaflet map used as the tracker's [`MapAdapter`].
pub struct LeafletMap {
    map: Map,
    popup: PopupConfig,
    pan_duration_secs: f64,
    _on_click: Closure<dyn FnMut(JsValue)>,
}

impl LeafletMap {
    /// Creates the map in `container`, centered on `center`, and reports clicks through `on_click`.
    pub fn initialize(container: &HtmlElement, center: Coordinates, config: &TrackerConfig, on_click: Callback<Coordinates>) -> Self {
        let map = Map::new_with_element(container, &MapOptions::default());
        map.set_view(&LatLng::new(center.lat, center.lng), config.zoom_level);
        add_tile_layer(&map, config);

        let on_click = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let Ok(lat_lng) = Reflect::get(&event, &"latlng".into()) else {
                return;
            };
            let lat_lng = lat_lng.unchecked_into::<LatLng>();
            on_click.emit(Coordinates::new(lat_lng.lat(), lat_lng.lng()));
        });
        map.unchecked_ref::<LeafletObject>().on("click", on_click.as_ref().unchecked_ref());

        info!(format!("Map ready at {}, {}", center.lat, center.lng));

        Self {
            map,
            popup: config.popup.clone(),
            pan_duration_secs: config.pan_duration_secs,
            _on_click: on_click,
        }
    }
}

impl MapAdapter for LeafletMap {
    fn place_marker(&mut self, workout: &Workout) {
        let coords = workout.coords();

        let popup_opts = PopupOptions::default();
        popup_opts.set_max_width(self.popup.max_width);
        popup_opts.set_max_height(self.popup.max_height);
        popup_opts.set_auto_close(false);
        popup_opts.set_close_on_click(false);
        popup_opts.set_class_name(workout.kind().popup_class());

        let popup = Popup::new(&popup_opts, None);
        popup.set_content(&workout.popup_content().into());

        let marker = Marker::new(&LatLng::new(coords.lat, coords.lng));
        marker.add_to(&self.map);
        marker.bind_popup(&popup);
        marker.unchecked_ref::<LeafletObject>().open_popup();
    }

    fn center_on(&mut self, at: Coordinates, zoom: f64, animate: bool) {
        let pan = Object::new();
        set_option(&pan, "duration", self.pan_duration_secs);

        let options = Object::new();
        set_option(&options, "animate", animate);
        set_option(&options, "pan", pan);

        self.map
            .unchecked_ref::<LeafletObject>()
            .set_view_with_options(&LatLng::new(at.lat, at.lng), zoom, &options);
    }
}

fn add_tile_layer(map: &Map, config: &TrackerConfig) {
    let opts = TileLayerOptions::new();
    opts.set_update_when_idle(true);
    set_option(&opts, "attribution", config.attribution.as_str());
    TileLayer::new_options(&config.tile_url, &opts).add_to(map);
}

/// Request to move the map to a workout. `seq` changes on every request so
/// clicking the same entry twice still recenters.
#[derive(PartialEq, Clone, Copy)]
pub struct Focus {
    pub at: Coordinates,
    pub seq: u32,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub center: Coordinates,
    pub workouts: Vec<Workout>,
    pub focus: Option<Focus>,
    pub config: TrackerConfig,
    pub on_click: Callback<Coordinates>,
}

pub struct MapComponent {
    container: HtmlElement,
    markers: MarkerLayer<LeafletMap>,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }
}

impl Component for MapComponent {
    type Message = ();
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let container = document().create_element("div").unwrap();
        let container: HtmlElement = container.dyn_into().unwrap();
        container.set_id("map");

        Self {
            container,
            markers: MarkerLayer::new(ctx.props().config.zoom_level),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let props = ctx.props();
            let map = LeafletMap::initialize(&self.container, props.center, &props.config, props.on_click.clone());
            let placed = self.markers.attach(map, &props.workouts);
            info!(format!("Placed {} stored workouts", placed));
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();

        self.markers.sync(&props.workouts);

        if let Some(focus) = props.focus {
            if old_props.focus != Some(focus) {
                self.markers.center_on(focus.at, true);
            }
        }

        false
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="map-container">
                {self.render_map()}
            </div>
        }
    }
}
