use workout_tracker_lib::workout::{Workout, WorkoutId};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutListProps {
    pub workouts: Vec<Workout>,
    pub on_select: Callback<WorkoutId>,
}

/// Newest workout first, right below the form.
#[function_component]
pub fn WorkoutList(props: &WorkoutListProps) -> Html {
    props
        .workouts
        .iter()
        .rev()
        .map(|workout| {
            let id = workout.id().clone();
            let on_select = props.on_select.clone();
            let onclick = Callback::from(move |_: MouseEvent| on_select.emit(id.clone()));

            html! {
                <li
                    key={workout.id().to_string()}
                    class={classes!("workout", format!("workout--{}", workout.kind().as_str()))}
                    data-id={workout.id().to_string()}
                    {onclick}
                >
                    <h2 class="workout__title">{workout.description()}</h2>
                    { for workout.details().into_iter().map(|detail| html! {
                        <div class="workout__details">
                            <span class="workout__icon">{detail.icon}</span>
                            <span class="workout__value">{detail.value}</span>
                            <span class="workout__unit">{detail.unit}</span>
                        </div>
                    }) }
                </li>
            }
        })
        .collect()
}
