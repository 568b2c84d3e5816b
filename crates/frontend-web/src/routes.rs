use crate::guard::{RedirectIfAuthenticated, RequireSession};
use crate::pages::{
    CalendarPage, ComposePage, DashboardPage, LandingPage, LoginPage, NotFoundPage,
    OAuthErrorPage, OAuthSuccessPage, RegisterPage, SettingsPage,
};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Landing,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/compose")]
    Compose,
    #[at("/calendar")]
    Calendar,
    #[at("/settings")]
    Settings,
    #[at("/auth/google/success")]
    OAuthSuccess,
    #[at("/auth/google/error")]
    OAuthError,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Landing => html! { <LandingPage /> },
        Route::Login => html! {
            <RedirectIfAuthenticated>
                <LoginPage />
            </RedirectIfAuthenticated>
        },
        Route::Register => html! {
            <RedirectIfAuthenticated>
                <RegisterPage />
            </RedirectIfAuthenticated>
        },
        Route::Dashboard => html! {
            <RequireSession>
                <DashboardPage />
            </RequireSession>
        },
        Route::Compose => html! {
            <RequireSession>
                <ComposePage />
            </RequireSession>
        },
        Route::Calendar => html! {
            <RequireSession>
                <CalendarPage />
            </RequireSession>
        },
        Route::Settings => html! {
            <RequireSession>
                <SettingsPage />
            </RequireSession>
        },
        Route::OAuthSuccess => html! { <OAuthSuccessPage /> },
        Route::OAuthError => html! { <OAuthErrorPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
