//! Route guards.
//!
//! Entry to a protected route is decided synchronously against the
//! durable credential and the bridge snapshot; the decision never
//! awaits the user fetch. Because the guard also subscribes to the
//! session context, a later negative settlement re-renders it and the
//! same table then corrects an optimistic allow.

use crate::routes::Route;
use postdeck_frontend_common::{
    evaluate_guard, use_session, BrowserTokenStore, GuardDecision, LoadingSpinner, SessionBridge,
};
use postdeck_http::client::TokenStore;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    pub children: Children,
}

/// Wrapper for routes that require an authenticated session
#[function_component(RequireSession)]
pub fn require_session(props: &GuardProps) -> Html {
    let bridge = use_context::<SessionBridge>()
        .expect("SessionBridge not found. Make sure the app root provides it");
    // Subscribing here is what turns a provisional allow into a final
    // decision once the user fetch settles
    let session = use_session();

    let has_credential = BrowserTokenStore::new().get().is_some();
    let snapshot = bridge.read();

    if evaluate_guard(has_credential, snapshot.as_ref()) == GuardDecision::Deny {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    if session.is_loading {
        return html! { <LoadingSpinner text={"Loading your session..."} /> };
    }

    html! { <>{props.children.clone()}</> }
}

/// Wrapper for login/register: an existing credential goes straight to
/// the dashboard
#[function_component(RedirectIfAuthenticated)]
pub fn redirect_if_authenticated(props: &GuardProps) -> Html {
    if BrowserTokenStore::new().get().is_some() {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }
    html! { <>{props.children.clone()}</> }
}
