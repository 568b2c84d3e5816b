use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    html! {
        <div class="flex min-h-screen flex-col items-center justify-center bg-white px-4 text-center">
            <h1 class="mb-4 text-4xl font-bold text-neutral-900">{"Postdeck"}</h1>
            <p class="mb-8 max-w-md text-neutral-600">
                {"Plan, schedule and publish your social posts from one place."}
            </p>
            <div class="flex gap-4">
                <Link<Route> to={Route::Login} classes="rounded bg-neutral-900 px-5 py-2 text-white">
                    {"Sign in"}
                </Link<Route>>
                <Link<Route> to={Route::Register} classes="rounded border border-neutral-300 px-5 py-2 text-neutral-700">
                    {"Get started"}
                </Link<Route>>
            </div>
        </div>
    }
}
