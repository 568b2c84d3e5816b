use crate::routes::{switch, Route};
use postdeck_frontend_common::{SessionBridge, SessionProvider};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // One bridge per page load: the session provider writes it, route
    // guards read it. Shared explicitly through context rather than a
    // process-wide global.
    let bridge = use_memo((), |_| SessionBridge::new());

    html! {
        <ContextProvider<SessionBridge> context={(*bridge).clone()}>
            <SessionProvider bridge={(*bridge).clone()}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </SessionProvider>
        </ContextProvider<SessionBridge>>
    }
}
