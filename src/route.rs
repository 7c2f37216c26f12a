use crate::auth::Status;
use yew::prelude::*;
use yew_router::{components::Redirect, Routable};
use yewdux::prelude::*;

pub trait Route {
	fn html(self) -> Html;

	fn switch() -> Html
	where
		Self: Routable + 'static,
	{
		html! { <yew_router::Switch<Self> render={Self::html} /> }
	}
}

#[derive(Properties, PartialEq)]
pub struct RequireSessionProps {
	pub children: Html,
}

/// Renders its children for signed in users and sends everyone else to the sign in page.
/// Nothing is decided while the stored session is still being checked.
#[function_component]
pub fn RequireSession(props: &RequireSessionProps) -> Html {
	let status = use_store_value::<Status>();
	match &*status {
		Status::Initializing => html! {},
		Status::Anonymous => html! { <Redirect<crate::Route> to={crate::Route::SignIn} /> },
		Status::Successful { .. } => props.children.clone(),
	}
}
