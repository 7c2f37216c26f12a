use crate::{auth::Status, data::User};
use yew::prelude::*;
use yewdux::prelude::*;

#[hook]
pub fn use_user() -> Option<User> {
	let status = use_store_value::<Status>();
	status.user().cloned()
}

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct AvatarProps {
	pub user: User,
	#[prop_or_default]
	pub class: Classes,
}

#[function_component]
pub fn Avatar(props: &AvatarProps) -> Html {
	html! {
		<img class={classes!("rounded-circle", props.class.clone())} src={props.user.avatar.clone()} alt={props.user.name.clone()} />
	}
}

/// Name and email of the signed in user, as shown in the account menu.
#[function_component]
pub fn Identification() -> Html {
	let Some(user) = use_user() else {
		return html! {};
	};
	html! {
		<div class="dropdown-header">
			<p class="fw-semibold mb-0">{&user.name}</p>
			<p class="small text-muted mb-0">{&user.email}</p>
		</div>
	}
}
