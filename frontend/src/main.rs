use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod error;
mod head;
mod shindan {
    pub mod answers;
    pub mod script;
    pub mod sequencer;
    pub mod timers;
}
mod pages {
    pub mod shindan;
}
mod components {
    pub mod chat_message;
    pub mod number_question;
}

use pages::shindan::ShindanPage;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/takuya-shindan")]
    Shindan,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home | Route::Shindan => {
            info!("Rendering shindan page");
            html! { <ShindanPage /> }
        }
        Route::NotFound => {
            info!("Rendering not found page");
            html! {
                <div class="not-found" style="padding: 4rem 1rem; text-align: center;">
                    <p>{"ページが見つかりません。"}</p>
                    <Link<Route> to={Route::Shindan}>{"診断ページへ戻る"}</Link<Route>>
                </div>
            }
        }
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(config::log_level()) {
        web_sys::console::warn_1(&format!("error initializing log: {}", e).into());
    }

    info!("Starting application");
    head::install();
    yew::Renderer::<App>::new().render();
}
