use gloo_timers::callback::Timeout;
use std::{cell::RefCell, rc::Rc};
use yew::prelude::*;

pub static TOAST_MILLIS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
	Success,
	Error,
}

impl ToastKind {
	pub fn class(&self) -> &'static str {
		match self {
			Self::Success => "toast show align-items-center text-bg-success",
			Self::Error => "toast show align-items-center text-bg-danger",
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
	pub kind: ToastKind,
	pub message: String,
}

/// Shows one message at a time; a new message replaces the old one and restarts the timer.
#[derive(Clone)]
pub struct ToastHandle {
	state: UseStateHandle<Option<Toast>>,
	timeout: Rc<RefCell<Option<Timeout>>>,
}

impl ToastHandle {
	pub fn current(&self) -> Option<&Toast> {
		self.state.as_ref()
	}

	pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
		self.state.set(Some(Toast {
			kind,
			message: message.into(),
		}));
		let state = self.state.clone();
		// dropping the previous timeout cancels it
		*self.timeout.borrow_mut() = Some(Timeout::new(TOAST_MILLIS, move || state.set(None)));
	}

	pub fn dismiss(&self) {
		self.timeout.borrow_mut().take();
		self.state.set(None);
	}
}

#[hook]
pub fn use_toast() -> ToastHandle {
	let state = use_state(|| None);
	let timeout = use_mut_ref(|| None);
	ToastHandle { state, timeout }
}

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct ToastViewProps {
	pub toast: Option<Toast>,
	pub on_dismiss: Callback<()>,
}

#[function_component]
pub fn ToastView(props: &ToastViewProps) -> Html {
	let Some(toast) = &props.toast else {
		return html! {};
	};
	let class = toast.kind.class();
	html! {
		<div class="toast-container position-fixed bottom-0 end-0 p-3">
			<div {class} role="status">
				<div class="d-flex">
					<div class="toast-body">{&toast.message}</div>
					<button
						class="btn-close btn-close-white me-2 m-auto"
						aria-label="Close"
						onclick={props.on_dismiss.reform(|_: MouseEvent| ())}
					></button>
				</div>
			</div>
		</div>
	}
}
