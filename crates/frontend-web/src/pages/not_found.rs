use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="flex min-h-screen flex-col items-center justify-center bg-white">
            <h1 class="mb-2 text-3xl font-bold text-neutral-900">{"404"}</h1>
            <p class="mb-6 text-neutral-600">{"This page doesn't exist."}</p>
            <Link<Route> to={Route::Landing} classes="underline">{"Go home"}</Link<Route>>
        </div>
    }
}
