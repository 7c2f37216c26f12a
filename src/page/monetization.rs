use crate::{
	components::user::use_user,
	data::{Eligibility, TARGET_DOWNLOADS},
	hooks::use_projects,
	Route,
};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component]
pub fn Monetization() -> Html {
	let user = use_user();
	let projects = use_projects(user.as_ref().map(|user| user.email.clone()));
	let eligibility = match &projects.data {
		Some(projects) => Eligibility::from_projects(projects),
		None => Eligibility::default(),
	};
	let progress = eligibility.progress_percent();

	html! {
		<section class="monetization">
			<Link<Route> to={Route::DeveloperPanel}>{"← Back to dashboard"}</Link<Route>>
			<h1>{"Monetization Hub"}</h1>
			<p class="lead text-muted">{"Sell your projects once your account meets every requirement below."}</p>
			<div class="card card-body mb-4">
				<div class="progress-label">
					<span>{"Monthly downloads"}</span>
					<span>{format!("{}/{TARGET_DOWNLOADS}", eligibility.downloads.min(TARGET_DOWNLOADS))}</span>
				</div>
				<div class="progress">
					<div class="progress-bar bg-success" style={format!("width: {progress:.0}%")}></div>
				</div>
			</div>
			<ul class="list-group">
				{for eligibility.requirements().into_iter().map(|requirement| html! {
					<li class={classes!("list-group-item", "d-flex", "justify-content-between", requirement.is_done.then_some("list-group-item-success"))}>
						<div>
							<h3>{requirement.title}</h3>
							<p>{&requirement.description}</p>
						</div>
						<span class="status">{&requirement.status}</span>
					</li>
				})}
			</ul>
			if eligibility.is_eligible() {
				<p class="alert alert-success">{"You're eligible to sell. We'll reach out with the next steps."}</p>
			} else {
				<p class="alert alert-info">{"Keep publishing. Seller applications open once every requirement is met."}</p>
			}
		</section>
	}
}
