use crate::{
	backend::use_backend,
	components::{toast::use_toast, user::use_user, AuthSwitch, ToastKind, ToastView},
	data::Category,
	upload::{publish, Attachment, Step, UploadForm, SQL_COPIED},
	Route,
};
use std::{rc::Rc, str::FromStr};
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;
use yew_hooks::use_clipboard;
use yew_router::prelude::*;

/// Reads a picked file fully into memory.
async fn read_attachment(file: web_sys::File) -> Result<Attachment, wasm_bindgen::JsValue> {
	let buffer = JsFuture::from(file.array_buffer()).await?;
	let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
	let content_type = match file.type_() {
		kind if kind.is_empty() => "application/octet-stream".to_owned(),
		kind => kind,
	};
	Ok(Attachment {
		name: file.name(),
		content_type,
		bytes: Rc::new(bytes),
	})
}

#[derive(Clone, Copy, PartialEq)]
enum Slot {
	Cover,
	Archive,
}

#[function_component]
pub fn Upload() -> Html {
	html! {
		<AuthSwitch
			identified={html! { <UploadWizard /> }}
			anonymous={html! {
				<section class="gate">
					<h1>{"Developers Only"}</h1>
					<p>{"Sign in to publish your projects on MielteCity."}</p>
					<Link<Route> to={Route::SignIn} classes="btn btn-primary">{"Sign In"}</Link<Route>>
				</section>
			}}
		/>
	}
}

#[function_component]
fn UploadWizard() -> Html {
	let user = use_user();
	let backend = use_backend();
	let form = use_state(UploadForm::default);
	let clipboard = use_clipboard();
	let toast = use_toast();

	let update = {
		let form = form.clone();
		move |apply: fn(&mut UploadForm, String)| {
			let form = form.clone();
			Callback::from(move |event: InputEvent| {
				let value = match (
					event.target_dyn_into::<web_sys::HtmlInputElement>(),
					event.target_dyn_into::<web_sys::HtmlTextAreaElement>(),
				) {
					(Some(input), _) => input.value(),
					(_, Some(area)) => area.value(),
					_ => return,
				};
				let mut next = (*form).clone();
				apply(&mut next, value);
				form.set(next);
			})
		}
	};
	let on_title = update(|form, value| form.details.title = value);
	let on_description = update(|form, value| form.details.description = value);
	let on_category = {
		let form = form.clone();
		Callback::from(move |event: Event| {
			let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() else {
				return;
			};
			let Ok(category) = Category::from_str(&select.value()) else {
				return;
			};
			let mut next = (*form).clone();
			next.details.category = category;
			form.set(next);
		})
	};

	let on_file = {
		let form = form.clone();
		move |slot: Slot| {
			let form = form.clone();
			Callback::from(move |event: Event| {
				let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() else {
					return;
				};
				let Some(file) = input.files().and_then(|files| files.get(0)) else {
					return;
				};
				let form = form.clone();
				crate::util::spawn_local("upload", async move {
					let attachment = read_attachment(file).await?;
					let mut next = (*form).clone();
					match slot {
						Slot::Cover => next.cover = Some(attachment),
						Slot::Archive => next.archive = Some(attachment),
					}
					form.set(next);
					Ok(()) as Result<(), wasm_bindgen::JsValue>
				});
			})
		}
	};

	let next_step = {
		let form = form.clone();
		Callback::from(move |_: MouseEvent| {
			let mut next = (*form).clone();
			if next.continue_to_files() {
				form.set(next);
			}
		})
	};
	let previous_step = {
		let form = form.clone();
		Callback::from(move |_: MouseEvent| {
			let mut next = (*form).clone();
			if next.back_to_details() {
				form.set(next);
			}
		})
	};
	let start_over = {
		let form = form.clone();
		Callback::from(move |_: MouseEvent| {
			let mut next = (*form).clone();
			next.start_over();
			form.set(next);
		})
	};
	let on_publish = {
		let form = form.clone();
		Callback::from(move |_: MouseEvent| {
			let mut next = (*form).clone();
			let submission = next.begin_publish(user.as_ref());
			form.set(next.clone());
			let Ok(submission) = submission else {
				return;
			};
			let form = form.clone();
			let backend = backend.clone();
			wasm_bindgen_futures::spawn_local(async move {
				let result = publish(&*backend, &submission).await;
				next.finish_publish(&result);
				form.set(next);
			});
		})
	};

	let copy_sql = {
		let toast = toast.clone();
		Callback::from(move |sql: &'static str| {
			clipboard.write_text(sql.to_owned());
			toast.show(ToastKind::Success, SQL_COPIED);
		})
	};
	let dismiss_toast = {
		let toast = toast.clone();
		Callback::from(move |_: ()| toast.dismiss())
	};

	let steps = [Step::Details, Step::Files, Step::Published].map(|step| {
		let class = classes!("badge", "rounded-pill", match step.number() <= form.step.number() {
			true => "text-bg-primary",
			false => "text-bg-secondary",
		});
		html! { <span {class}>{step.number()}</span> }
	});

	let body = match form.step {
		Step::Details => html! {
			<div class="details">
				<label for="title">{"Project Title"}</label>
				<input
					id="title" class="form-control" type="text"
					placeholder="e.g. Modern Dashboard UI"
					value={form.details.title.clone()} oninput={on_title}
				/>
				<label for="description">{"Description"}</label>
				<textarea
					id="description" class="form-control" rows="5"
					placeholder="What does it do and what is it built with?"
					value={form.details.description.clone()} oninput={on_description}
				/>
				<label for="category">{"Category"}</label>
				<select id="category" class="form-select" onchange={on_category}>
					{for Category::all().iter().map(|category| html! {
						<option value={category.as_str()} selected={category == form.details.category}>
							{category.to_string()}
						</option>
					})}
				</select>
				<button class="btn btn-primary" onclick={next_step} disabled={!form.can_continue()}>{"Next Step"}</button>
			</div>
		},
		Step::Files => html! {
			<div class="files">
				<label for="cover">{"Cover Image"}</label>
				<input id="cover" type="file" accept="image/*" onchange={on_file(Slot::Cover)} />
				if let Some(cover) = &form.cover {
					<p class="file-info">{format!("{} ({})", cover.name, cover.size_kb())}</p>
				}
				<label for="archive">{"Source Code (.zip)"}</label>
				<input id="archive" type="file" accept=".zip,application/zip" onchange={on_file(Slot::Archive)} />
				if let Some(archive) = &form.archive {
					<p class="file-info">{format!("{} ({})", archive.name, archive.size_mb())}</p>
				}
				if let Some(failure) = &form.error {
					<div class="alert alert-danger">
						<p>{&failure.message}</p>
						if let Some(sql) = failure.policy_fix() {
							<p>{"The database refused the upload. The project owner needs to run these policies in the SQL editor:"}</p>
							<pre><code>{sql}</code></pre>
							<button class="btn btn-sm btn-outline-light" onclick={copy_sql.reform(move |_: MouseEvent| sql)}>
								{"Copy SQL"}
							</button>
						}
					</div>
				}
				<div class="actions">
					<button class="btn btn-outline-secondary" onclick={previous_step} disabled={form.is_uploading}>{"Back"}</button>
					<button class="btn btn-primary" onclick={on_publish} disabled={!form.can_publish()}>
						{match form.is_uploading { true => "Uploading...", false => "Publish Project" }}
					</button>
				</div>
			</div>
		},
		Step::Published => html! {
			<div class="published">
				<h2>{"Project Published!"}</h2>
				<p>{format!("\"{}\" is now live on MielteCity.", form.details.title)}</p>
				<div class="actions">
					<Link<Route> to={Route::Explore} classes="btn btn-primary">{"View in Explore"}</Link<Route>>
					<button class="btn btn-outline-secondary" onclick={start_over}>{"Upload another"}</button>
				</div>
			</div>
		},
	};

	html! {
		<section class="upload">
			<h1>{"Publish Your Project"}</h1>
			<div class="d-flex gap-2 mb-4">{for steps}</div>
			{body}
			<ToastView toast={toast.current().cloned()} on_dismiss={dismiss_toast} />
		</section>
	}
}
