use crate::{
	api::orders::record_order,
	backend::{use_backend, Backend},
	catalog::Filter,
	components::{user::use_user, ProjectCard},
	data::{CategoryFilter, Order, Project, User},
	hooks::use_projects,
	util::timestamp,
};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

/// Delay between confirming a download and opening the archive.
static OPEN_DELAY_MILLIS: u32 = 1_500;

#[derive(Debug, Clone, PartialEq, Default)]
enum Checkout {
	#[default]
	Idle,
	Processing,
	Done,
	Failed(String),
}

#[function_component]
pub fn Explore() -> Html {
	let projects = use_projects(None);
	let filter = use_state(Filter::default);
	let selected = use_state(|| None::<Project>);

	let on_search = {
		let filter = filter.clone();
		Callback::from(move |event: InputEvent| {
			let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() else {
				return;
			};
			let mut next = (*filter).clone();
			next.search = input.value();
			filter.set(next);
		})
	};
	let clear = {
		let filter = filter.clone();
		Callback::from(move |_: MouseEvent| {
			let mut next = (*filter).clone();
			next.clear();
			filter.set(next);
		})
	};
	let on_select = {
		let selected = selected.clone();
		Callback::from(move |project: Project| selected.set(Some(project)))
	};
	let on_close = {
		let selected = selected.clone();
		Callback::from(move |_: ()| selected.set(None))
	};

	let chips = CategoryFilter::options().map(|option| {
		let filter = filter.clone();
		let is_active = filter.category == option;
		let onclick = Callback::from(move |_: MouseEvent| {
			let mut next = (*filter).clone();
			next.category = option;
			filter.set(next);
		});
		html! {
			<button class={classes!("btn", "btn-sm", "btn-outline-primary", is_active.then_some("active"))} {onclick}>{option.to_string()}</button>
		}
	});

	let listing = match (&projects.data, projects.loading) {
		(_, true) => html! { <div class="text-center text-muted py-5">{"Loading projects..."}</div> },
		(Some(projects), false) => {
			let cards = filter
				.apply(projects)
				.map(|project| html! { <ProjectCard project={project.clone()} on_select={on_select.clone()} /> })
				.collect::<Vec<_>>();
			match cards.is_empty() {
				true => html! {
					<div class="empty">
						<p>{"No projects match your search."}</p>
						if !filter.is_empty() {
							<button class="btn btn-outline-secondary" onclick={clear.clone()}>{"Clear filters"}</button>
						}
					</div>
				},
				false => html! { <div class="row row-cols-1 row-cols-md-2 row-cols-lg-3 g-4">{cards}</div> },
			}
		}
		(None, false) => html! {
			<div class="empty">
				<p>{"Projects could not be loaded."}</p>
				<button class="btn btn-outline-secondary" onclick={{
					let projects = projects.clone();
					Callback::from(move |_: MouseEvent| projects.run())
				}}>{"Retry"}</button>
			</div>
		},
	};

	html! {
		<section class="explore">
			<h1>{"Explore Projects"}</h1>
			<div class="filters">
				<input
					class="form-control"
					type="search"
					placeholder="Search by title or category..."
					value={filter.search.clone()}
					oninput={on_search}
				/>
				<div class="d-flex flex-wrap gap-2 mt-2">{for chips}</div>
			</div>
			{listing}
			if let Some(project) = &*selected {
				<CheckoutModal project={project.clone()} {on_close} />
			}
		</section>
	}
}

async fn record_download(backend: &Backend, project: &Project, user: Option<&User>) -> anyhow::Result<()> {
	let order = Order::for_download(project, user, timestamp()?);
	record_order(&**backend, &order).await?;
	Ok(())
}

#[derive(Debug, Clone, PartialEq, Properties)]
struct CheckoutModalProps {
	project: Project,
	on_close: Callback<()>,
}

#[function_component]
fn CheckoutModal(props: &CheckoutModalProps) -> Html {
	let backend = use_backend();
	let user = use_user();
	let state = use_state_eq(Checkout::default);
	let timeout = use_mut_ref(|| None::<Timeout>);

	let confirm = {
		let state = state.clone();
		let project = props.project.clone();
		let on_close = props.on_close.clone();
		Callback::from(move |_: MouseEvent| {
			if *state == Checkout::Processing {
				return;
			}
			state.set(Checkout::Processing);
			let backend = backend.clone();
			let state = state.clone();
			let project = project.clone();
			let user = user.clone();
			let on_close = on_close.clone();
			let timeout = timeout.clone();
			wasm_bindgen_futures::spawn_local(async move {
				if let Err(err) = record_download(&backend, &project, user.as_ref()).await {
					log::error!(target: "orders", "Failed to record order: {err}");
					state.set(Checkout::Failed(err.to_string()));
					return;
				}
				state.set(Checkout::Done);
				*timeout.borrow_mut() = Some(Timeout::new(OPEN_DELAY_MILLIS, move || {
					match &project.zip_url {
						Some(url) => {
							let _ = gloo_utils::window().open_with_url_and_target(url, "_blank");
						}
						None => log::warn!(target: "orders", "project {} has no archive", project.id),
					}
					on_close.emit(());
				}));
			});
		})
	};

	let close = {
		let state = state.clone();
		let on_close = props.on_close.clone();
		Callback::from(move |_: MouseEvent| {
			if *state != Checkout::Processing {
				on_close.emit(());
			}
		})
	};
	// clicks on the backdrop close the modal, clicks inside it don't
	let on_backdrop = {
		let close = close.clone();
		Callback::from(move |event: MouseEvent| {
			let is_backdrop = event.target().is_some() && event.target() == event.current_target();
			if is_backdrop {
				close.emit(event);
			}
		})
	};

	let project = &props.project;
	html! {
		<div class="modal d-block" onclick={on_backdrop}>
			<div class="modal-dialog modal-dialog-centered modal-lg">
				<div class="modal-content p-4">
					<img class="img-fluid rounded mb-3" src={project.cover_image.clone()} alt={project.title.clone()} />
					<h2>{&project.title}</h2>
					<p class="description">{&project.description}</p>
					<dl class="row">
						<dt class="col-sm-4">{"Category"}</dt><dd class="col-sm-8">{project.category.to_string()}</dd>
						<dt class="col-sm-4">{"Size"}</dt><dd class="col-sm-8">{&project.file_size}</dd>
						<dt class="col-sm-4">{"Developer"}</dt><dd class="col-sm-8">{&project.developer.name}</dd>
						<dt class="col-sm-4">{"Price"}</dt><dd class="col-sm-8">{"Free"}</dd>
					</dl>
					{match &*state {
						Checkout::Idle => html! {
							<button class="btn btn-primary" onclick={confirm}>{"Download Source Code"}</button>
						},
						Checkout::Processing => html! {
							<button class="btn btn-primary" disabled=true>{"Processing..."}</button>
						},
						Checkout::Done => html! {
							<p class="alert alert-success">{"Success! Your download will start shortly."}</p>
						},
						Checkout::Failed(message) => html! {<>
							<p class="alert alert-danger">{message}</p>
							<button class="btn btn-primary" onclick={confirm}>{"Try Again"}</button>
						</>},
					}}
					<button class="btn btn-outline-secondary" onclick={close}>{"Close"}</button>
				</div>
			</div>
		</div>
	}
}
