use postdeck_frontend_common::session::use_refetch_user;
use postdeck_frontend_common::use_session;
use yew::prelude::*;

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let session = use_session();
    let refetch_user = use_refetch_user();

    let on_refresh = {
        let refetch_user = refetch_user.clone();
        // Profile edits land server-side; force past the staleness window
        Callback::from(move |_: MouseEvent| refetch_user.emit(true))
    };

    html! {
        <div class="p-6">
            <h1 class="mb-4 text-xl font-semibold text-neutral-900">{"Settings"}</h1>
            if let Some(user) = session.user.as_ref() {
                <dl class="mb-6 text-sm text-neutral-700">
                    <dt class="font-medium">{"Name"}</dt>
                    <dd class="mb-2">{user.fullname.clone()}</dd>
                    <dt class="font-medium">{"Email"}</dt>
                    <dd class="mb-2">{user.email.clone()}</dd>
                    if let Some(subscription) = user.subscription.as_ref() {
                        <dt class="font-medium">{"Plan"}</dt>
                        <dd>{subscription.plan_name.clone()}</dd>
                    }
                </dl>
            }
            <button onclick={on_refresh} class="rounded border border-neutral-300 px-3 py-1 text-sm">
                {"Refresh profile"}
            </button>
        </div>
    }
}
