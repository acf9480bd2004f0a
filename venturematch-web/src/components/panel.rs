use std::marker::PhantomData;

use shared::collection::CollectionStatus;
use shared::resource::Resource;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::components::{ErrorAlert, Loading, use_resource_panel};
use crate::routes::MainRoute;

/// How a resource shows up in its panel.
pub trait PanelView: Resource {
    /// Inputs of a draft; every edit emits the whole updated draft.
    fn form(draft: &Self::Draft, on_change: &Callback<Self::Draft>) -> Html;

    /// Body of one list entry, under its label.
    fn row(&self) -> Html;

    /// Where the label links to, if the record has a detail page.
    fn detail_route(_id: i64) -> Option<MainRoute> {
        None
    }
}

/// Callback that writes one text field of `draft` through `on_change`.
pub fn draft_field<D: Clone + 'static>(
    draft: &D,
    on_change: &Callback<D>,
    apply: fn(&mut D, String),
) -> Callback<String> {
    let draft = draft.clone();
    on_change.reform(move |value: String| {
        let mut next = draft.clone();
        apply(&mut next, value);
        next
    })
}

#[derive(Properties, PartialEq)]
pub struct ResourcePanelProps<R: PanelView> {
    pub title: AttrValue,
    #[prop_or_default]
    pub resource: PhantomData<R>,
}

/// List, inline create/edit form and delete buttons for one resource.
#[function_component(ResourcePanel)]
pub fn resource_panel<R: PanelView>(props: &ResourcePanelProps<R>) -> Html {
    let panel = use_resource_panel::<R>();
    let draft = use_state(R::Draft::default);
    let editing = use_state(|| None::<i64>);
    let state = panel.state();

    let reset = {
        let draft = draft.clone();
        let editing = editing.clone();
        Callback::from(move |()| {
            draft.set(R::Draft::default());
            editing.set(None);
        })
    };

    let onsubmit = {
        let panel = panel.clone();
        let draft = draft.clone();
        let editing = editing.clone();
        let reset = reset.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            match *editing {
                Some(id) => panel.update(id, (*draft).clone(), reset.clone()),
                None => panel.create((*draft).clone(), reset.clone()),
            }
        })
    };

    let on_draft_change = {
        let draft = draft.clone();
        Callback::from(move |next: R::Draft| draft.set(next))
    };

    let on_cancel = {
        let reset = reset.clone();
        Callback::from(move |_: MouseEvent| reset.emit(()))
    };

    let dismiss = {
        let panel = panel.clone();
        Callback::from(move |()| panel.dismiss_error())
    };

    let render_item = |item: &R| {
        let id = item.id();
        let on_edit = {
            let draft = draft.clone();
            let editing = editing.clone();
            let filled = item.to_draft();
            Callback::from(move |_: MouseEvent| {
                draft.set(filled.clone());
                editing.set(id);
            })
        };
        let on_delete = {
            let panel = panel.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(id) = id {
                    panel.remove(id);
                }
            })
        };
        let title = match id.and_then(R::detail_route) {
            Some(route) => html! {
                <Link<MainRoute> to={route} classes="link link-hover font-semibold">{item.label()}</Link<MainRoute>>
            },
            _ => html! { <span class="font-semibold">{item.label()}</span> },
        };

        html! {
            <li class="card bg-base-200 shadow-sm">
                <div class="card-body p-4">
                    <div class="flex items-start justify-between gap-4">
                        <div class="space-y-1">
                            {title}
                            {item.row()}
                        </div>
                        <div class="flex gap-2">
                            <button class="btn btn-ghost btn-sm" onclick={on_edit} disabled={id.is_none()}>
                                <i class="fa-solid fa-pen"></i>
                            </button>
                            <button class="btn btn-ghost btn-sm text-error" onclick={on_delete} disabled={id.is_none()}>
                                <i class="fa-solid fa-trash"></i>
                            </button>
                        </div>
                    </div>
                </div>
            </li>
        }
    };

    let list = match &state.status {
        CollectionStatus::Idle | CollectionStatus::Loading => html! { <Loading /> },
        CollectionStatus::Errored(message) => html! { <ErrorAlert message={message.clone()} /> },
        CollectionStatus::Ready(items) if items.is_empty() => html! {
            <p class="text-base-content/70">{format!("No {} yet.", R::NAME)}</p>
        },
        CollectionStatus::Ready(items) => html! {
            <ul class="space-y-3">{ for items.iter().map(render_item) }</ul>
        },
    };

    let heading = if editing.is_some() {
        format!("Edit {}", R::NAME)
    } else {
        format!("Add {}", R::NAME)
    };

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{props.title.clone()}</h1>
            if let Some(message) = &state.last_error {
                <ErrorAlert message={message.clone()} on_dismiss={dismiss} />
            }
            <form class="card bg-base-100 border border-base-300" {onsubmit}>
                <div class="card-body gap-2">
                    <h2 class="card-title capitalize">{heading}</h2>
                    {R::form(&draft, &on_draft_change)}
                    <div class="card-actions justify-end mt-2">
                        if editing.is_some() {
                            <button type="button" class="btn btn-ghost" onclick={on_cancel}>{"Cancel"}</button>
                        }
                        <button type="submit" class="btn btn-primary" disabled={state.in_flight}>
                            {if editing.is_some() { "Save" } else { "Add" }}
                        </button>
                    </div>
                </div>
            </form>
            {list}
        </div>
    }
}
