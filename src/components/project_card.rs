use crate::data::Project;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct ProjectCardProps {
	pub project: Project,
	pub on_select: Callback<Project>,
}

#[function_component]
pub fn ProjectCard(props: &ProjectCardProps) -> Html {
	let project = &props.project;
	let onclick = {
		let project = project.clone();
		props.on_select.reform(move |_: MouseEvent| project.clone())
	};
	html! {
		<div class="card h-100">
			<div class="position-relative">
				<img class="card-img-top" src={project.cover_image.clone()} alt={project.title.clone()} loading="lazy" />
				<span class="badge text-bg-primary position-absolute top-0 start-0 m-2">{project.category.to_string()}</span>
			</div>
			<div class="card-body">
				<h5 class="card-title">
					{&project.title}
					if project.is_verified {
						<span class="verified" title="Verified">{"✓"}</span>
					}
				</h5>
				<p class="description">{&project.description}</p>
				<div class="tags">
					{for project.tags.iter().map(|tag| html! { <span class="badge text-bg-light">{tag}</span> })}
				</div>
				<div class="developer">
					<img class="rounded-circle me-1" width="24" height="24" src={project.developer.avatar.clone()} alt={project.developer.name.clone()} />
					<span>{&project.developer.name}</span>
				</div>
			</div>
			<div class="card-footer d-flex justify-content-between align-items-center">
				<span class="downloads">{format!("{} downloads", project.download_count)}</span>
				<span class="size">{&project.file_size}</span>
				<button class="btn btn-primary" {onclick}>{"Get Code"}</button>
			</div>
		</div>
	}
}
