use yew::prelude::*;

#[function_component(CalendarPage)]
pub fn calendar_page() -> Html {
    html! {
        <div class="p-6">
            <h1 class="mb-4 text-xl font-semibold text-neutral-900">{"Calendar"}</h1>
            <p class="text-neutral-600">{"The scheduling calendar lives here."}</p>
        </div>
    }
}
