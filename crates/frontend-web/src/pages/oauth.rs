//! OAuth redirect landing pages. The provider hands tokens back via
//! query parameters on the success redirect.

use crate::routes::Route;
use postdeck_frontend_common::{use_session, LoadingSpinner, SessionAction};
use postdeck_http::client::Credential;
use yew::prelude::*;
use yew_router::prelude::*;

fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|value| !value.is_empty())
}

#[function_component(OAuthSuccessPage)]
pub fn oauth_success_page() -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("navigator available inside the router");

    use_effect_with((), move |_| {
        match query_param("access_token") {
            Some(access_token) => {
                session.dispatch(SessionAction::SetCredential(Some(Credential {
                    access_token,
                    refresh_token: query_param("refresh_token"),
                })));
                navigator.push(&Route::Dashboard);
            }
            None => {
                tracing::warn!("OAuth redirect arrived without an access token");
                navigator.push(&Route::Login);
            }
        }
        || ()
    });

    html! {
        <div class="flex min-h-screen items-center justify-center bg-white">
            <LoadingSpinner text={"Redirecting..."} />
        </div>
    }
}

#[function_component(OAuthErrorPage)]
pub fn oauth_error_page() -> Html {
    html! {
        <div class="flex min-h-screen items-center justify-center bg-white px-4">
            <div class="text-center">
                <h1 class="mb-4 text-2xl font-bold text-neutral-900">{"Sign-in failed"}</h1>
                <p class="mb-6 text-neutral-600">
                    {"We couldn't complete the Google sign-in. Please try again."}
                </p>
                <Link<Route> to={Route::Login} classes="underline">{"Back to login"}</Link<Route>>
            </div>
        </div>
    }
}
