use crate::{
	auth::Status,
	backend::Backend,
	components::{Footer, Navbar},
	route::{RequireSession, Route as _},
};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

pub mod api;
pub mod auth;
pub mod backend;
pub mod catalog;
pub mod components;
pub mod config;
pub mod data;
pub mod hooks;
pub mod page;
pub mod route;
pub mod session;
pub mod upload;
pub mod util;

#[cfg(test)]
mod testing;

fn main() {
	logging::wasm::init(logging::wasm::Config::default().prefer_target());
	yew::Renderer::<App>::new().render();
}

#[derive(Debug, Clone, PartialEq, Routable)]
pub enum Route {
	#[at("/")]
	Home,
	#[at("/explore")]
	Explore,
	#[at("/upload")]
	Upload,
	#[at("/signin")]
	SignIn,
	#[at("/developer-panel")]
	DeveloperPanel,
	#[at("/monetization")]
	Monetization,
	#[at("/auth/*")]
	Auth,
	#[not_found]
	#[at("/404")]
	NotFound,
}

impl route::Route for Route {
	fn html(self) -> Html {
		match self {
			Self::Home => html! { <page::Home /> },
			Self::Explore => html! { <page::Explore /> },
			Self::Upload => html! { <page::Upload /> },
			Self::SignIn => html! { <page::SignIn /> },
			Self::DeveloperPanel => html! {
				<RequireSession><page::DeveloperPanel /></RequireSession>
			},
			Self::Monetization => html! {
				<RequireSession><page::Monetization /></RequireSession>
			},
			Self::Auth => api::auth::Route::switch(),
			Self::NotFound => html! { <page::NotFound /> },
		}
	}
}

#[function_component]
fn App() -> Html {
	let status = use_store_value::<Status>();
	let backend = use_memo(status.clone(), |status| Backend::new(backend::get(status)));
	html! {
		<ContextProvider<Backend> context={(*backend).clone()}>
			<BrowserRouter>
				<SessionRestore />
				<Navbar />
				<main class="container py-4">
					{match status.is_initializing() {
						true => html! {
							<div class="text-center text-muted py-5">{"Initialising MielteCity..."}</div>
						},
						false => Route::switch(),
					}}
				</main>
				<Footer />
			</BrowserRouter>
		</ContextProvider<Backend>>
	}
}

#[function_component]
fn SessionRestore() -> Html {
	auth::use_session_restore();
	auth::use_session_refresh();
	html! {}
}
