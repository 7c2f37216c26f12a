use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct ConfirmModalProps {
	pub title: AttrValue,
	pub message: AttrValue,
	#[prop_or(AttrValue::from("Confirm"))]
	pub confirm_label: AttrValue,
	#[prop_or_default]
	pub is_busy: bool,
	pub on_confirm: Callback<()>,
	pub on_cancel: Callback<()>,
}

#[function_component]
pub fn ConfirmModal(props: &ConfirmModalProps) -> Html {
	let on_cancel = {
		let on_cancel = props.on_cancel.clone();
		let is_busy = props.is_busy;
		Callback::from(move |_: MouseEvent| {
			if !is_busy {
				on_cancel.emit(());
			}
		})
	};
	html! {
		<div class="modal d-block">
			<div class="modal-backdrop show" onclick={on_cancel.clone()}></div>
			<div class="modal-dialog modal-dialog-centered">
				<div class="modal-content">
					<div class="modal-header">
						<h5 class="modal-title">{&props.title}</h5>
					</div>
					<div class="modal-body">
						<p>{&props.message}</p>
					</div>
					<div class="modal-footer">
						<button class="btn btn-outline-secondary" onclick={on_cancel} disabled={props.is_busy}>{"Cancel"}</button>
						<button
							class="btn btn-danger"
							onclick={props.on_confirm.reform(|_: MouseEvent| ())}
							disabled={props.is_busy}
						>
							{match props.is_busy {
								true => "Working...",
								false => props.confirm_label.as_str(),
							}}
						</button>
					</div>
				</div>
			</div>
		</div>
	}
}
