use crate::routes::Route;
use postdeck_frontend_common::session::use_logout;
use postdeck_frontend_common::use_session;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let session = use_session();
    let logout = use_logout();

    let on_logout = {
        let logout = logout.clone();
        Callback::from(move |_: MouseEvent| logout.emit(()))
    };

    let greeting = session
        .user
        .as_ref()
        .map(|user| user.fullname.clone())
        .unwrap_or_else(|| "there".into());

    html! {
        <div class="min-h-screen bg-neutral-50">
            <header class="flex items-center justify-between border-b border-neutral-200 bg-white px-6 py-4">
                <h1 class="text-lg font-bold text-neutral-900">{"Postdeck"}</h1>
                <nav class="flex items-center gap-4 text-sm text-neutral-600">
                    <Link<Route> to={Route::Compose}>{"Compose"}</Link<Route>>
                    <Link<Route> to={Route::Calendar}>{"Calendar"}</Link<Route>>
                    <Link<Route> to={Route::Settings}>{"Settings"}</Link<Route>>
                    <button onclick={on_logout} class="rounded border border-neutral-300 px-3 py-1">
                        {"Logout"}
                    </button>
                </nav>
            </header>
            <main class="p-6">
                <h2 class="mb-2 text-xl font-semibold text-neutral-900">
                    { format!("Welcome back, {greeting}") }
                </h2>
                <p class="text-neutral-600">
                    {"Your scheduled posts and connected accounts will show up here."}
                </p>
            </main>
        </div>
    }
}
