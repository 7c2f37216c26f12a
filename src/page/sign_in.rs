use crate::{
	api,
	auth::{self, CredentialsForm, Mode, Status},
	backend::use_backend,
	Route,
};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

#[function_component]
pub fn SignIn() -> Html {
	let status = use_store_value::<Status>();
	let backend = use_backend();
	let form = use_state(CredentialsForm::default);

	if status.user().is_some() {
		return html! { <Redirect<Route> to={Route::Upload} /> };
	}

	let on_email = {
		let form = form.clone();
		Callback::from(move |event: InputEvent| {
			if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
				let mut next = (*form).clone();
				next.email = input.value();
				form.set(next);
			}
		})
	};
	let on_password = {
		let form = form.clone();
		Callback::from(move |event: InputEvent| {
			if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
				let mut next = (*form).clone();
				next.password = input.value();
				form.set(next);
			}
		})
	};
	let toggle_mode = {
		let form = form.clone();
		Callback::from(move |_: MouseEvent| {
			let mut next = (*form).clone();
			next.toggle_mode();
			form.set(next);
		})
	};
	let on_submit = {
		let form = form.clone();
		Callback::from(move |event: SubmitEvent| {
			event.prevent_default();
			if form.is_loading {
				return;
			}
			let mut pending = (*form).clone();
			pending.begin();
			form.set(pending.clone());

			let form = form.clone();
			let backend = backend.clone();
			wasm_bindgen_futures::spawn_local(async move {
				let result = auth::submit(&*backend, pending.mode, &pending.email, &pending.password).await;
				if let Err(err) = &result {
					log::warn!(target: "auth", "{:?} failed: {err}", pending.mode);
				}
				let session = pending.settle(result);
				form.set(pending);
				let Some(session) = session else {
					return;
				};
				match auth::complete_session(&*backend, session, crate::util::unix_seconds()).await {
					Ok((session, user)) => Status::establish(session, user),
					Err(err) => {
						log::error!(target: "auth", "Failed to load the signed in user: {err}");
					}
				}
			});
		})
	};

	let (title, submit_label, toggle_label) = match form.mode {
		Mode::SignIn => ("Welcome back", "Sign In", "Don't have an account? Sign up"),
		Mode::SignUp => ("Create your account", "Sign Up", "Already have an account? Sign in"),
	};

	html! {
		<section class="sign-in">
			<h1>{title}</h1>
			<Link<api::auth::Route> to={api::auth::Route::Login} classes="btn btn-outline-dark w-100">
				{"Continue with Google"}
			</Link<api::auth::Route>>
			<div class="divider">{"or"}</div>
			<form onsubmit={on_submit}>
				<label for="email">{"Email"}</label>
				<input
					id="email" class="form-control" type="email" required=true
					value={form.email.clone()} oninput={on_email}
					placeholder="you@example.com"
				/>
				<label for="password">{"Password"}</label>
				<input
					id="password" class="form-control" type="password" required=true
					value={form.password.clone()} oninput={on_password}
				/>
				if let Some(error) = &form.error {
					<p class="alert alert-danger">{error}</p>
				}
				if let Some(notice) = &form.notice {
					<p class="alert alert-success">{notice}</p>
				}
				<button class="btn btn-primary" type="submit" disabled={form.is_loading}>
					{match form.is_loading { true => "Please wait...", false => submit_label }}
				</button>
			</form>
			<button class="btn btn-link" onclick={toggle_mode}>{toggle_label}</button>
		</section>
	}
}
