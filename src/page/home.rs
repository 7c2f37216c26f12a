use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

static PILLARS: [(&str, &str); 3] = [
	("Ship faster", "Start from a codebase that already handles auth, storage and deployment."),
	("Learn from real code", "Every project is complete and readable, not a snippet pulled out of context."),
	("Built by developers", "Publish what you've built and let other developers put it to work."),
];

#[function_component]
pub fn Home() -> Html {
	html! {<>
		<section class="hero">
			<h1>{"Production-ready source code, "}<span class="highlight">{"ready to ship"}</span></h1>
			<p class="lead text-muted">
				{"MielteCity is a marketplace where developers publish complete projects and others download them to learn from or build on."}
			</p>
			<div class="actions">
				<Link<Route> to={Route::Explore} classes="btn btn-primary">{"Explore Projects"}</Link<Route>>
				<Link<Route> to={Route::Upload} classes="btn btn-outline-secondary">{"Publish Your Code"}</Link<Route>>
			</div>
		</section>
		<section class="mission">
			<h2>{"Our Mission"}</h2>
			<p>
				{"Too much good code sits in private repositories. We make it easy to share finished work and to find a solid starting point for the next one."}
			</p>
			<div class="row g-4">
				{for PILLARS.iter().map(|(title, body)| html! {
					<div class="col-md-4">
						<h3>{*title}</h3>
						<p>{*body}</p>
					</div>
				})}
			</div>
		</section>
	</>}
}
