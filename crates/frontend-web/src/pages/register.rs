use crate::routes::Route;
use postdeck_frontend_common::services::AuthApiService;
use postdeck_http::client::ClientError;
use std::collections::HashMap;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let navigator = use_navigator().expect("navigator available inside the router");

    let email = use_state(String::new);
    let fullname = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let field_errors = use_state(HashMap::<String, String>::new);
    let is_submitting = use_state(|| false);

    let bind_input = |state: UseStateHandle<String>| {
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };
    let on_email_input = bind_input(email.clone());
    let on_fullname_input = bind_input(fullname.clone());
    let on_password_input = bind_input(password.clone());

    let on_submit = {
        let navigator = navigator.clone();
        let email = email.clone();
        let fullname = fullname.clone();
        let password = password.clone();
        let error = error.clone();
        let field_errors = field_errors.clone();
        let is_submitting = is_submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }
            is_submitting.set(true);
            error.set(None);
            field_errors.set(HashMap::new());

            let navigator = navigator.clone();
            let error = error.clone();
            let field_errors = field_errors.clone();
            let is_submitting = is_submitting.clone();
            let email = (*email).clone();
            let fullname = (*fullname).clone();
            let password = (*password).clone();

            wasm_bindgen_futures::spawn_local(async move {
                match AuthApiService::new()
                    .register(email, fullname, password)
                    .await
                {
                    Ok(()) => navigator.push(&Route::Login),
                    Err(ClientError::Validation { message, errors }) => {
                        error.set(Some(message));
                        field_errors.set(errors);
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                is_submitting.set(false);
            });
        })
    };

    let field_error = |name: &str| {
        field_errors.get(name).map(|message| {
            html! { <p class="mb-2 text-sm text-red-600">{message.clone()}</p> }
        })
    };

    html! {
        <div class="flex min-h-screen items-center justify-center bg-white px-4">
            <div class="w-full max-w-sm">
                <h1 class="mb-8 text-2xl font-bold text-neutral-900">{"Create your account"}</h1>
                if let Some(message) = (*error).clone() {
                    <p class="mb-4 text-sm text-red-600">{message}</p>
                }
                <form onsubmit={on_submit}>
                    <label class="mb-1 block text-sm text-neutral-700" for="fullname">{"Full name"}</label>
                    <input
                        id="fullname"
                        type="text"
                        class="mb-2 w-full rounded border border-neutral-300 px-3 py-2"
                        value={(*fullname).clone()}
                        oninput={on_fullname_input}
                    />
                    { for field_error("fullname") }
                    <label class="mb-1 block text-sm text-neutral-700" for="email">{"Email"}</label>
                    <input
                        id="email"
                        type="email"
                        class="mb-2 w-full rounded border border-neutral-300 px-3 py-2"
                        value={(*email).clone()}
                        oninput={on_email_input}
                    />
                    { for field_error("email") }
                    <label class="mb-1 block text-sm text-neutral-700" for="password">{"Password"}</label>
                    <input
                        id="password"
                        type="password"
                        class="mb-2 w-full rounded border border-neutral-300 px-3 py-2"
                        value={(*password).clone()}
                        oninput={on_password_input}
                    />
                    { for field_error("password") }
                    <button
                        type="submit"
                        disabled={*is_submitting}
                        class="mt-4 w-full rounded bg-neutral-900 py-2 text-white disabled:opacity-50"
                    >
                        { if *is_submitting { "Creating account..." } else { "Register" } }
                    </button>
                </form>
                <p class="mt-6 text-center text-sm text-neutral-600">
                    {"Already registered? "}
                    <Link<Route> to={Route::Login} classes="underline">{"Sign in"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}
