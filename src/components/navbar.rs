use crate::{
	api,
	components::{user::use_user, Avatar, Identification},
	data::User,
	Route,
};
use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component]
pub fn Navbar() -> Html {
	let user = use_user();
	let drawer_open = use_state_eq(|| false);
	let route = use_route::<Route>();

	// close the drawer after navigating
	{
		let drawer_open = drawer_open.clone();
		use_effect_with(route, move |_| drawer_open.set(false));
	}

	let toggle_drawer = {
		let drawer_open = drawer_open.clone();
		Callback::from(move |_: MouseEvent| drawer_open.set(!*drawer_open))
	};

	let links = html! {<>
		<Link<Route> to={Route::Home} classes="nav-link">{"Home"}</Link<Route>>
		<Link<Route> to={Route::Explore} classes="nav-link">{"Explore"}</Link<Route>>
		if user.is_some() {
			<Link<Route> to={Route::Upload} classes="nav-link">{"Upload"}</Link<Route>>
			<Link<Route> to={Route::DeveloperPanel} classes="nav-link">{"Dashboard"}</Link<Route>>
		}
	</>};

	html! {
		<nav class="navbar navbar-expand-lg bg-body-tertiary px-3">
			<div class="d-flex align-items-center">
				<Link<Route> to={Route::Home} classes="navbar-brand">{"MielteCity"}</Link<Route>>
				<button class="navbar-toggler d-lg-none" aria-label="menu" onclick={toggle_drawer}>
					{match *drawer_open { true => "✕", false => "☰" }}
				</button>
			</div>
			<div class="navbar-nav me-auto d-none d-lg-flex">{links.clone()}</div>
			<div class="d-flex align-items-center">
				{match &user {
					Some(user) => html! { <UserDropdown user={user.clone()} /> },
					None => html! {
						<Link<Route> to={Route::SignIn} classes="btn btn-primary">{"Sign In"}</Link<Route>>
					},
				}}
			</div>
			if *drawer_open {
				<div class="navbar-nav w-100 d-lg-none">{links}</div>
			}
		</nav>
	}
}

#[derive(Debug, Clone, PartialEq, Properties)]
struct UserDropdownProps {
	user: User,
}

#[function_component]
fn UserDropdown(UserDropdownProps { user }: &UserDropdownProps) -> Html {
	let is_open = use_state_eq(|| false);
	let node = use_node_ref();

	// any click outside of the menu closes it
	{
		let is_open = is_open.clone();
		let node = node.clone();
		use_effect_with(*is_open, move |open| {
			let listener = open.then(|| {
				EventListener::new(&gloo_utils::document(), "mousedown", move |event| {
					let target = event.target().and_then(|target| target.dyn_into::<web_sys::Node>().ok());
					let inside = match (node.get(), target) {
						(Some(menu), Some(target)) => menu.contains(Some(&target)),
						_ => false,
					};
					if !inside {
						is_open.set(false);
					}
				})
			});
			move || drop(listener)
		});
	}

	let toggle = {
		let is_open = is_open.clone();
		Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
	};
	let close = {
		let is_open = is_open.clone();
		Callback::from(move |_: MouseEvent| is_open.set(false))
	};

	html! {
		<div class="dropdown" ref={node}>
			<button class="btn p-0 border-0" onclick={toggle}>
				<Avatar user={user.clone()} />
			</button>
			if *is_open {
				<div class="dropdown-menu dropdown-menu-end show" onclick={close}>
					<Identification />
					<Link<Route> to={Route::DeveloperPanel} classes="dropdown-item">{"Dashboard"}</Link<Route>>
					<Link<api::auth::Route> to={api::auth::Route::Logout} classes="dropdown-item">{"Sign Out"}</Link<api::auth::Route>>
				</div>
			}
		</div>
	}
}
