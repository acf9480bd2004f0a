use shared::collection::{CollectionStatus, ResourceApi};
use shared::models::{Blog, BlogDraft};
use shared::resource::Resource;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};

use crate::api;
use crate::components::{ErrorAlert, Loading, TextField, setter, use_resource_panel};
use crate::routes::MainRoute;

const EXCERPT_CHARS: usize = 160;

#[function_component(BlogsPage)]
pub fn blogs_page() -> Html {
    let panel = use_resource_panel::<Blog>();
    let state = panel.state();

    let list = match &state.status {
        CollectionStatus::Idle | CollectionStatus::Loading => html! { <Loading /> },
        CollectionStatus::Errored(message) => html! { <ErrorAlert message={message.clone()} /> },
        CollectionStatus::Ready(blogs) if blogs.is_empty() => html! {
            <p class="text-base-content/70">{"No blog posts yet."}</p>
        },
        CollectionStatus::Ready(blogs) => blogs
            .iter()
            .map(|blog| {
                let on_delete = {
                    let panel = panel.clone();
                    let id = blog.id();
                    Callback::from(move |_: MouseEvent| {
                        if let Some(id) = id {
                            panel.remove(id);
                        }
                    })
                };
                html! {
                    <article class="card bg-base-200 shadow-sm">
                        <div class="card-body">
                            <h2 class="card-title">{&blog.title}</h2>
                            <span class="badge badge-outline">{&blog.category}</span>
                            <p>{blog.excerpt(EXCERPT_CHARS)}</p>
                            <div class="card-actions justify-end">
                                if let Some(id) = blog.id() {
                                    <Link<MainRoute> to={MainRoute::EditBlog { id }} classes="btn btn-ghost btn-sm">
                                        <i class="fa-solid fa-pen"></i>{" Edit"}
                                    </Link<MainRoute>>
                                }
                                <button class="btn btn-ghost btn-sm text-error" onclick={on_delete}>
                                    <i class="fa-solid fa-trash"></i>{" Delete"}
                                </button>
                            </div>
                        </div>
                    </article>
                }
            })
            .collect::<Html>(),
    };

    let dismiss = {
        let panel = panel.clone();
        Callback::from(move |()| panel.dismiss_error())
    };

    html! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Blog"}</h1>
                <Link<MainRoute> to={MainRoute::NewBlog} classes="btn btn-primary btn-sm">
                    <i class="fa-solid fa-plus"></i>{" New post"}
                </Link<MainRoute>>
            </div>
            if let Some(message) = &state.last_error {
                <ErrorAlert message={message.clone()} on_dismiss={dismiss} />
            }
            <div class="grid gap-4">{list}</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BlogFormPageProps {
    /// Post being edited; absent for a new post.
    #[prop_or_default]
    pub id: Option<i64>,
}

#[function_component(BlogFormPage)]
pub fn blog_form_page(props: &BlogFormPageProps) -> Html {
    let draft = use_state(BlogDraft::default);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let navigator = use_navigator();

    {
        let draft = draft.clone();
        let error = error.clone();
        use_effect_with(props.id, move |id| {
            if let Some(id) = *id {
                spawn_local(async move {
                    match ResourceApi::<Blog>::new(api::client()).get(id).await {
                        Ok(blog) => draft.set(blog.to_draft()),
                        Err(err) => error.set(Some(err.to_string())),
                    }
                });
            }
            || ()
        });
    }

    let onsubmit = {
        let draft = draft.clone();
        let error = error.clone();
        let saving = saving.clone();
        let id = props.id;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let submitted = (*draft).clone();
            let error = error.clone();
            let saving = saving.clone();
            let navigator = navigator.clone();
            saving.set(true);
            error.set(None);
            spawn_local(async move {
                let blogs = ResourceApi::<Blog>::new(api::client());
                let result = match id {
                    Some(id) => blogs.update(id, &submitted).await,
                    None => blogs.create(&submitted).await,
                };
                saving.set(false);
                match result {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&MainRoute::Blogs);
                        }
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let title = if props.id.is_some() { "Edit post" } else { "New post" };

    html! {
        <form class="card bg-base-100 border border-base-300 max-w-2xl mx-auto" {onsubmit}>
            <div class="card-body gap-2">
                <h1 class="card-title text-2xl">{title}</h1>
                if let Some(message) = &*error {
                    <ErrorAlert message={message.clone()} />
                }
                <TextField id="title" label="Title" required=true value={draft.title.clone()}
                    on_change={setter(&draft, |d: &mut BlogDraft, v| d.title = v)} />
                <TextField id="category" label="Category" required=true value={draft.category.clone()}
                    on_change={setter(&draft, |d: &mut BlogDraft, v| d.category = v)} />
                <TextField id="content" label="Content" multiline=true required=true value={draft.content.clone()}
                    on_change={setter(&draft, |d: &mut BlogDraft, v| d.content = v)} />
                <div class="card-actions justify-end mt-2">
                    <Link<MainRoute> to={MainRoute::Blogs} classes="btn btn-ghost">{"Cancel"}</Link<MainRoute>>
                    <button type="submit" class="btn btn-primary" disabled={*saving}>
                        {if *saving { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </div>
        </form>
    }
}
