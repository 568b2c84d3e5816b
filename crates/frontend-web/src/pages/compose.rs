use yew::prelude::*;

#[function_component(ComposePage)]
pub fn compose_page() -> Html {
    html! {
        <div class="p-6">
            <h1 class="mb-4 text-xl font-semibold text-neutral-900">{"Compose"}</h1>
            <p class="text-neutral-600">{"The post editor lives here."}</p>
        </div>
    }
}
