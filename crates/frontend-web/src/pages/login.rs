use crate::routes::Route;
use postdeck_frontend_common::services::AuthApiService;
use postdeck_frontend_common::{use_session, SessionAction};
use postdeck_http::client::{ClientError, Credential};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("navigator available inside the router");

    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let is_submitting = use_state(|| false);

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let session = session.clone();
        let navigator = navigator.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let is_submitting = is_submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }
            is_submitting.set(true);
            error.set(None);

            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let is_submitting = is_submitting.clone();
            let email = (*email).clone();
            let password = (*password).clone();

            wasm_bindgen_futures::spawn_local(async move {
                match AuthApiService::new().login(email, password).await {
                    Ok(tokens) => {
                        // Storing the credential kicks off the user
                        // fetch through the session provider
                        session.dispatch(SessionAction::SetCredential(Some(Credential {
                            access_token: tokens.access_token,
                            refresh_token: Some(tokens.refresh_token),
                        })));
                        navigator.push(&Route::Dashboard);
                    }
                    Err(ClientError::AuthenticationFailed(_)) => {
                        error.set(Some("Invalid email or password.".into()));
                    }
                    Err(err) => {
                        error.set(Some(err.to_string()));
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    let on_google = Callback::from(move |_: MouseEvent| {
        wasm_bindgen_futures::spawn_local(async move {
            match AuthApiService::new().oauth_init().await {
                Ok(response) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&response.auth_url);
                    }
                }
                Err(err) => tracing::warn!(%err, "failed to start Google OAuth"),
            }
        });
    });

    html! {
        <div class="flex min-h-screen items-center justify-center bg-white px-4">
            <div class="w-full max-w-sm">
                <h1 class="mb-8 text-2xl font-bold text-neutral-900">{"Sign in to Postdeck"}</h1>
                if let Some(message) = (*error).clone() {
                    <p class="mb-4 text-sm text-red-600">{message}</p>
                }
                <form onsubmit={on_submit}>
                    <label class="mb-1 block text-sm text-neutral-700" for="email">{"Email"}</label>
                    <input
                        id="email"
                        type="email"
                        class="mb-4 w-full rounded border border-neutral-300 px-3 py-2"
                        value={(*email).clone()}
                        oninput={on_email_input}
                    />
                    <label class="mb-1 block text-sm text-neutral-700" for="password">{"Password"}</label>
                    <input
                        id="password"
                        type="password"
                        class="mb-6 w-full rounded border border-neutral-300 px-3 py-2"
                        value={(*password).clone()}
                        oninput={on_password_input}
                    />
                    <button
                        type="submit"
                        disabled={*is_submitting}
                        class="w-full rounded bg-neutral-900 py-2 text-white disabled:opacity-50"
                    >
                        { if *is_submitting { "Signing in..." } else { "Sign in" } }
                    </button>
                </form>
                <button
                    onclick={on_google}
                    class="mt-4 w-full rounded border border-neutral-300 py-2 text-neutral-700"
                >
                    {"Continue with Google"}
                </button>
                <p class="mt-6 text-center text-sm text-neutral-600">
                    {"No account yet? "}
                    <Link<Route> to={Route::Register} classes="underline">{"Register"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}
