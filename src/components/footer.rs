use crate::{config::SUPPORT_EMAIL, Route};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component]
pub fn Footer() -> Html {
	html! {
		<footer class="footer border-top mt-5 py-4">
			<div class="brand">
				<Link<Route> to={Route::Home}>{"MielteCity"}</Link<Route>>
				<p>{"Production-ready source code, published by the developers who wrote it."}</p>
			</div>
			<div class="terms">
				<h4>{"Terms"}</h4>
				<p>{"Every project is provided as-is by its developer. Check the license bundled with each archive before shipping it."}</p>
				<p>{"Downloads are recorded so developers can qualify for the seller program."}</p>
				<p>
					{"Questions or takedown requests: "}
					<a href={format!("mailto:{SUPPORT_EMAIL}")}>{SUPPORT_EMAIL}</a>
				</p>
			</div>
			<p class="copyright">{"© MielteCity"}</p>
		</footer>
	}
}
