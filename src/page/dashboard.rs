use crate::{
	api::projects::remove_project,
	backend::use_backend,
	components::{toast::use_toast, user::use_user, ConfirmModal, ToastKind, ToastView},
	data::Project,
	hooks::use_projects,
	Route,
};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component]
pub fn DeveloperPanel() -> Html {
	let user = use_user();
	let backend = use_backend();
	let projects = use_projects(user.as_ref().map(|user| user.email.clone()));
	let toast = use_toast();
	let pending = use_state(|| None::<Project>);
	let is_deleting = use_state_eq(|| false);

	let Some(user) = user else {
		return html! {};
	};

	let ask_delete = {
		let pending = pending.clone();
		move |project: Project| {
			let pending = pending.clone();
			Callback::from(move |_: MouseEvent| pending.set(Some(project.clone())))
		}
	};
	let cancel = {
		let pending = pending.clone();
		Callback::from(move |_: ()| pending.set(None))
	};
	let confirm = {
		let pending = pending.clone();
		let is_deleting = is_deleting.clone();
		let projects = projects.clone();
		let toast = toast.clone();
		let email = user.email.clone();
		Callback::from(move |_: ()| {
			let Some(project) = (*pending).clone() else {
				return;
			};
			is_deleting.set(true);
			let backend = backend.clone();
			let pending = pending.clone();
			let is_deleting = is_deleting.clone();
			let projects = projects.clone();
			let toast = toast.clone();
			let email = email.clone();
			wasm_bindgen_futures::spawn_local(async move {
				match remove_project(&*backend, &project.id, &email).await {
					Ok(()) => {
						let remaining = projects
							.data
							.iter()
							.flatten()
							.filter(|owned| owned.id != project.id)
							.cloned()
							.collect::<Vec<_>>();
						projects.set_data(remaining);
						toast.show(ToastKind::Success, format!("\"{}\" was deleted.", project.title));
					}
					Err(err) => {
						log::error!(target: "projects", "Failed to delete {}: {err}", project.id);
						toast.show(ToastKind::Error, err.to_string());
					}
				}
				is_deleting.set(false);
				pending.set(None);
			});
		})
	};
	let dismiss_toast = {
		let toast = toast.clone();
		Callback::from(move |_: ()| toast.dismiss())
	};

	let listing = match (&projects.data, projects.loading) {
		(_, true) => html! { <div class="text-center text-muted py-5">{"Loading your projects..."}</div> },
		(Some(owned), false) if !owned.is_empty() => html! {
			<table class="table table-hover align-middle">
				<thead>
					<tr>
						<th>{"Project"}</th>
						<th>{"Category"}</th>
						<th>{"Downloads"}</th>
						<th>{"Size"}</th>
						<th></th>
					</tr>
				</thead>
				<tbody>
					{for owned.iter().map(|project| html! {
						<tr key={project.id.clone()}>
							<td class="title">
								<img class="img-thumbnail me-2" width="64" src={project.cover_image.clone()} alt="" />
								{&project.title}
							</td>
							<td>{project.category.to_string()}</td>
							<td>{project.download_count}</td>
							<td>{&project.file_size}</td>
							<td class="actions">
								if let Some(url) = &project.zip_url {
									<a href={url.clone()} target="_blank" rel="noopener noreferrer">{"Archive"}</a>
								}
								<button class="btn btn-sm btn-outline-danger" onclick={ask_delete(project.clone())}>{"Delete"}</button>
							</td>
						</tr>
					})}
				</tbody>
			</table>
		},
		(Some(_), false) => html! {
			<div class="empty">
				<p>{"You haven't published anything yet."}</p>
				<Link<Route> to={Route::Upload} classes="btn btn-primary">{"Upload your first project"}</Link<Route>>
			</div>
		},
		(None, false) => html! {
			<div class="empty">
				<p>{"Your projects could not be loaded."}</p>
			</div>
		},
	};

	html! {
		<section class="dashboard">
			<div class="header">
				<div>
					<h1>{"Developer Dashboard"}</h1>
					<p class="lead text-muted">{format!("Signed in as {}", user.email)}</p>
				</div>
				<div class="actions">
					<Link<Route> to={Route::Upload} classes="btn btn-primary">{"Upload Project"}</Link<Route>>
					<Link<Route> to={Route::Monetization} classes="btn btn-outline-secondary">{"Monetization"}</Link<Route>>
				</div>
			</div>
			{listing}
			if let Some(project) = &*pending {
				<ConfirmModal
					title="Delete project?"
					message={format!("\"{}\" and its files will be permanently removed.", project.title)}
					confirm_label="Delete"
					is_busy={*is_deleting}
					on_confirm={confirm}
					on_cancel={cancel}
				/>
			}
			<ToastView toast={toast.current().cloned()} on_dismiss={dismiss_toast} />
		</section>
	}
}
