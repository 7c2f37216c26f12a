use crate::{
	auth::Status,
	backend::{use_backend, Backend},
};
use supabase::auth::session_from_fragment;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

#[derive(Debug, Clone, PartialEq, Routable)]
pub enum Route {
	#[at("/auth/login")]
	Login,
	#[at("/auth/logout")]
	Logout,
	#[at("/auth/callback")]
	Callback,
}

impl crate::route::Route for Route {
	fn html(self) -> Html {
		match self {
			Self::Login => html! { <GoogleLogin /> },
			Self::Logout => html! { <Logout /> },
			Self::Callback => html! { <Callback /> },
		}
	}
}

fn origin() -> String {
	gloo_utils::window().location().origin().unwrap_or_default()
}

/// Leaves the app for the provider's consent screen.
#[function_component]
fn GoogleLogin() -> Html {
	let backend = use_backend();
	use_effect_with((), move |_| match crate::auth::sign_in_with_google(&*backend, &origin()) {
		Ok(url) => {
			log::info!(target: "auth", "redirecting to {}", crate::config::OAUTH_PROVIDER);
			let _ = gloo_utils::window().location().replace(&url);
		}
		Err(err) => log::error!(target: "auth", "Failed to build sign in url: {err}"),
	});
	html! { <div class="auth-status">{"Redirecting to Google..."}</div> }
}

#[function_component]
fn Logout() -> Html {
	let backend = use_backend();
	let status = use_store_value::<Status>();
	let navigator = use_navigator();
	use_effect_with((), move |_| {
		let session = status.session().cloned();
		wasm_bindgen_futures::spawn_local(async move {
			crate::auth::sign_out(&*backend, session.as_ref()).await;
			Status::clear();
			log::info!(target: "auth", "signed out");
			if let Some(navigator) = navigator {
				navigator.replace(&crate::Route::Home);
			}
		});
	});
	html! { <div class="auth-status">{"Signing out..."}</div> }
}

async fn finish_oauth(backend: &Backend, fragment: &str) -> anyhow::Result<()> {
	let session = session_from_fragment(fragment)?;
	let (session, user) = crate::auth::complete_session(&**backend, session, crate::util::unix_seconds()).await?;
	Status::establish(session, user);
	Ok(())
}

/// Where the provider sends the user back to. The tokens arrive in the url fragment.
#[function_component]
fn Callback() -> Html {
	let backend = use_backend();
	let navigator = use_navigator();
	let error = use_state(|| None::<String>);
	{
		let error = error.clone();
		use_effect_with((), move |_| {
			let location = gloo_utils::window().location();
			let fragment = location.hash().unwrap_or_default();
			// the tokens must not linger in the address bar or history
			if let Ok(history) = gloo_utils::window().history() {
				let path = location.pathname().unwrap_or_default();
				let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
			}
			wasm_bindgen_futures::spawn_local(async move {
				match finish_oauth(&backend, &fragment).await {
					Ok(()) => {
						if let Some(navigator) = navigator {
							navigator.replace(&crate::Route::Home);
						}
					}
					Err(err) => {
						log::error!(target: "auth", "OAuth callback failed: {err:?}");
						error.set(Some(err.to_string()));
					}
				}
			});
		});
	}
	match &*error {
		None => html! { <div class="auth-status">{"Signing you in..."}</div> },
		Some(message) => html! {
			<div class="auth-status alert alert-danger">
				<p>{"Sign in failed: "}{message}</p>
				<Link<crate::Route> to={crate::Route::SignIn}>{"Back to sign in"}</Link<crate::Route>>
			</div>
		},
	}
}
