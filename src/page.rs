mod dashboard;
pub use dashboard::*;

mod explore;
pub use explore::*;

mod home;
pub use home::*;

mod monetization;
pub use monetization::*;

mod sign_in;
pub use sign_in::*;

mod upload;
pub use upload::*;

use yew::prelude::*;

#[function_component]
pub fn NotFound() -> Html {
	html! {
		<section class="not-found">
			<h1>{"404"}</h1>
			<p>{"This page does not exist."}</p>
			<yew_router::components::Link<crate::Route> to={crate::Route::Home}>{"Go home"}</yew_router::components::Link<crate::Route>>
		</section>
	}
}
