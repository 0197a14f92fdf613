use gloo_timers::callback::Timeout;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::{
    form::{FormInput, MetricField},
    workout::WorkoutKind,
};
use yew::prelude::*;

pub enum Msg {
    Kind(String),
    Distance(String),
    Duration(String),
    Cadence(String),
    Elevation(String),
    Submit,
    RestoreDisplay,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub open: bool,
    /// How long `display: none` stays set after hiding, in ms.
    pub reset_delay_ms: u32,
    pub on_submit: Callback<FormInput>,
}

pub struct WorkoutForm {
    input: FormInput,
    distance_ref: NodeRef,
    display_none: bool,
    focus_pending: bool,
    display_timeout: Option<Timeout>,
}

impl WorkoutForm {
    fn hide(&mut self, ctx: &Context<Self>) {
        self.input.clear();
        self.display_none = true;

        let link = ctx.link().clone();
        self.display_timeout = Some(Timeout::new(ctx.props().reset_delay_ms, move || {
            link.send_message(Msg::RestoreDisplay);
        }));
    }

    fn row(&self, label: &str, value: &str, placeholder: &str, hidden: bool, oninput: Callback<InputEvent>, node_ref: Option<NodeRef>) -> Html {
        html! {
            <div class={classes!("form__row", hidden.then_some("form__row--hidden"))}>
                <label class="form__label">{label}</label>
                <input
                    class="form__input"
                    placeholder={placeholder.to_owned()}
                    value={value.to_owned()}
                    ref={node_ref.unwrap_or_default()}
                    {oninput}
                />
            </div>
        }
    }
}

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

impl Component for WorkoutForm {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            input: FormInput::default(),
            distance_ref: NodeRef::default(),
            display_none: false,
            focus_pending: ctx.props().open,
            display_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Kind(value) => {
                if let Ok(kind) = value.parse::<WorkoutKind>() {
                    self.input.set_kind(kind);
                }
            }
            Msg::Distance(value) => self.input.distance = value,
            Msg::Duration(value) => self.input.duration = value,
            Msg::Cadence(value) => self.input.cadence = value,
            Msg::Elevation(value) => self.input.elevation = value,
            Msg::Submit => {
                ctx.props().on_submit.emit(self.input.clone());
                return false;
            }
            Msg::RestoreDisplay => {
                self.display_none = false;
                self.display_timeout = None;
            }
        }
        true
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let open = ctx.props().open;
        if old_props.open && !open {
            self.hide(ctx);
        } else if open {
            // Also on a second map click while already open
            self.focus_pending = true;
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.focus_pending {
            self.focus_pending = false;
            if let Some(input) = self.distance_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let open = ctx.props().open;
        let metric = self.input.visible_metric();

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let onchange = link.callback(|e: Event| Msg::Kind(e.target_unchecked_into::<HtmlSelectElement>().value()));

        html! {
            <form
                class={classes!("form", (!open).then_some("hidden"))}
                style={self.display_none.then_some("display: none")}
                {onsubmit}
            >
                <div class="form__row">
                    <label class="form__label">{"Type"}</label>
                    <select class="form__input form__input--type" {onchange}>
                        <option value="running" selected={self.input.kind == WorkoutKind::Running}>{"Running"}</option>
                        <option value="cycling" selected={self.input.kind == WorkoutKind::Cycling}>{"Cycling"}</option>
                    </select>
                </div>
                {self.row("Distance", &self.input.distance, "km", false, link.callback(|e| Msg::Distance(input_value(e))), Some(self.distance_ref.clone()))}
                {self.row("Duration", &self.input.duration, "min", false, link.callback(|e| Msg::Duration(input_value(e))), None)}
                {self.row("Cadence", &self.input.cadence, "step/min", metric != MetricField::Cadence, link.callback(|e| Msg::Cadence(input_value(e))), None)}
                {self.row("Elev Gain", &self.input.elevation, "meters", metric != MetricField::Elevation, link.callback(|e| Msg::Elevation(input_value(e))), None)}
                <button class="form__btn">{"OK"}</button>
            </form>
        }
    }
}
