use crate::auth::Status;
use yew::prelude::*;
use yewdux::prelude::*;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct AuthSwitchProps {
	#[prop_or_default]
	pub identified: Option<Html>,
	#[prop_or_default]
	pub anonymous: Option<Html>,
}

/// Picks between two renderings depending on whether someone is signed in.
/// Renders nothing while the stored session is still being checked.
#[function_component]
pub fn AuthSwitch(props: &AuthSwitchProps) -> Html {
	let status = use_store_value::<Status>();
	let empty = || html! {};
	match &*status {
		Status::Initializing => empty(),
		Status::Anonymous => props.anonymous.clone().unwrap_or_else(empty),
		Status::Successful { .. } => props.identified.clone().unwrap_or_else(empty),
	}
}
