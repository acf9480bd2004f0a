//! List and form pages shared by the entrepreneur and investor directories.

use std::marker::PhantomData;

use shared::collection::{CollectionStatus, ResourceApi};
use shared::models::{EntrepreneurDraft, InvestorDraft};
use shared::resource::Resource;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, Routable, use_navigator};

use crate::api;
use crate::components::{
    CheckboxField, ErrorAlert, ImageInput, Loading, TextField, draft_field, use_resource_panel,
};

/// Fields every profile draft carries.
pub trait ProfileDraft: Clone + Default + PartialEq + 'static {
    fn first_name(&mut self) -> &mut String;
    fn last_name(&mut self) -> &mut String;
    fn email(&mut self) -> &mut String;
    fn password(&mut self) -> &mut String;
    fn bio(&mut self) -> &mut String;
    fn phone_number(&mut self) -> &mut String;
    fn phone_visibility(&mut self) -> &mut bool;
    fn profile_picture(&mut self) -> &mut String;
}

macro_rules! profile_draft {
    ($($draft:ty),+) => {$(
        impl ProfileDraft for $draft {
            fn first_name(&mut self) -> &mut String {
                &mut self.first_name
            }
            fn last_name(&mut self) -> &mut String {
                &mut self.last_name
            }
            fn email(&mut self) -> &mut String {
                &mut self.email
            }
            fn password(&mut self) -> &mut String {
                &mut self.password
            }
            fn bio(&mut self) -> &mut String {
                &mut self.bio
            }
            fn phone_number(&mut self) -> &mut String {
                &mut self.phone_number
            }
            fn phone_visibility(&mut self) -> &mut bool {
                &mut self.phone_visibility
            }
            fn profile_picture(&mut self) -> &mut String {
                &mut self.profile_picture
            }
        }
    )+};
}

profile_draft!(EntrepreneurDraft, InvestorDraft);

/// A profile directory: its routes and how one entry is summarised.
pub trait ProfileView: Resource<Draft: ProfileDraft> {
    type Route: Routable + Clone + PartialEq + 'static;

    const TITLE: &'static str;

    fn list_route() -> Self::Route;
    fn create_route() -> Self::Route;
    fn detail_route(id: i64) -> Self::Route;
    fn edit_route(id: i64) -> Self::Route;

    fn picture(&self) -> Option<&str>;
    fn summary(&self) -> Option<&str>;

    /// Inputs beyond the common profile fields.
    fn extra_fields(_draft: &Self::Draft, _on_change: &Callback<Self::Draft>) -> Html {
        html! {}
    }
}

/// Round picture, or initials when there is none.
pub fn avatar(name: &str, picture: Option<&str>) -> Html {
    match picture.filter(|url| !url.is_empty()) {
        Some(url) => html! {
            <div class="avatar">
                <div class="w-16 rounded-full"><img src={url.to_string()} alt={name.to_string()} /></div>
            </div>
        },
        None => {
            let initials: String = name
                .split_whitespace()
                .filter_map(|part| part.chars().next())
                .take(2)
                .collect();
            html! {
                <div class="avatar placeholder">
                    <div class="bg-neutral text-neutral-content w-16 rounded-full">
                        <span class="text-xl">{initials}</span>
                    </div>
                </div>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ProfileListPageProps<P: ProfileView> {
    #[prop_or_default]
    pub profile: PhantomData<P>,
}

#[function_component(ProfileListPage)]
pub fn profile_list_page<P: ProfileView>(_props: &ProfileListPageProps<P>) -> Html {
    let panel = use_resource_panel::<P>();
    let state = panel.state();

    let cards = match &state.status {
        CollectionStatus::Idle | CollectionStatus::Loading => html! { <Loading /> },
        CollectionStatus::Errored(message) => html! { <ErrorAlert message={message.clone()} /> },
        CollectionStatus::Ready(profiles) if profiles.is_empty() => html! {
            <p class="text-base-content/70">{format!("No {} profiles yet.", P::NAME)}</p>
        },
        CollectionStatus::Ready(profiles) => html! {
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                { for profiles.iter().map(|profile| {
                    let id = profile.id();
                    let on_delete = {
                        let panel = panel.clone();
                        Callback::from(move |_: MouseEvent| {
                            if let Some(id) = id {
                                panel.remove(id);
                            }
                        })
                    };
                    let name = profile.label();
                    html! {
                        <div class="card bg-base-200 shadow-sm">
                            <div class="card-body items-center text-center">
                                {avatar(&name, profile.picture())}
                                <h2 class="card-title">{name.clone()}</h2>
                                if let Some(summary) = profile.summary() {
                                    <p class="text-sm line-clamp-3">{summary}</p>
                                }
                                <div class="card-actions">
                                    if let Some(id) = id {
                                        <Link<P::Route> to={P::detail_route(id)} classes="btn btn-primary btn-sm">
                                            {"View"}
                                        </Link<P::Route>>
                                        <Link<P::Route> to={P::edit_route(id)} classes="btn btn-ghost btn-sm">
                                            <i class="fa-solid fa-pen"></i>
                                        </Link<P::Route>>
                                        <button class="btn btn-ghost btn-sm text-error" onclick={on_delete}>
                                            <i class="fa-solid fa-trash"></i>
                                        </button>
                                    }
                                </div>
                            </div>
                        </div>
                    }
                }) }
            </div>
        },
    };

    let dismiss = {
        let panel = panel.clone();
        Callback::from(move |()| panel.dismiss_error())
    };

    html! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{P::TITLE}</h1>
                <Link<P::Route> to={P::create_route()} classes="btn btn-primary btn-sm">
                    <i class="fa-solid fa-plus"></i>{format!(" New {}", P::NAME)}
                </Link<P::Route>>
            </div>
            if let Some(message) = &state.last_error {
                <ErrorAlert message={message.clone()} on_dismiss={dismiss} />
            }
            {cards}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProfileFormPageProps<P: ProfileView> {
    /// Profile being edited; absent when creating one.
    #[prop_or_default]
    pub id: Option<i64>,
    #[prop_or_default]
    pub profile: PhantomData<P>,
}

#[function_component(ProfileFormPage)]
pub fn profile_form_page<P: ProfileView>(props: &ProfileFormPageProps<P>) -> Html {
    let draft = use_state(P::Draft::default);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let navigator = use_navigator();

    {
        let draft = draft.clone();
        let error = error.clone();
        use_effect_with(props.id, move |id| {
            if let Some(id) = *id {
                spawn_local(async move {
                    match ResourceApi::<P>::new(api::client()).get(id).await {
                        Ok(profile) => draft.set(profile.to_draft()),
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
                let profiles = ResourceApi::<P>::new(api::client());
                let result = match id {
                    Some(id) => profiles.update(id, &submitted).await,
                    None => profiles.create(&submitted).await,
                };
                saving.set(false);
                match result {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&id.map_or_else(P::list_route, P::detail_route));
                        }
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_change = {
        let draft = draft.clone();
        Callback::from(move |next: P::Draft| draft.set(next))
    };
    let on_picture = {
        let draft = draft.clone();
        let error = error.clone();
        Callback::from(move |url: String| {
            let mut next = (*draft).clone();
            *next.profile_picture() = url;
            draft.set(next);
            error.set(None);
        })
    };
    let on_picture_error = {
        let error = error.clone();
        Callback::from(move |message: String| error.set(Some(message)))
    };
    let on_visibility = {
        let draft = draft.clone();
        Callback::from(move |visible: bool| {
            let mut next = (*draft).clone();
            *next.phone_visibility() = visible;
            draft.set(next);
        })
    };

    let mut current = (*draft).clone();
    let creating = props.id.is_none();
    let heading = if creating {
        format!("New {}", P::NAME)
    } else {
        format!("Edit {}", P::NAME)
    };
    let cancel_route = props.id.map_or_else(P::list_route, P::detail_route);

    html! {
        <form class="card bg-base-100 border border-base-300 max-w-2xl mx-auto" {onsubmit}>
            <div class="card-body gap-2">
                <h1 class="card-title text-2xl capitalize">{heading}</h1>
                if let Some(message) = &*error {
                    <ErrorAlert message={message.clone()} />
                }
                <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                    <TextField id="first-name" label="First name" required=true
                        value={current.first_name().clone()}
                        on_change={draft_field(&*draft, &on_change, |d, v| *d.first_name() = v)} />
                    <TextField id="last-name" label="Last name" required=true
                        value={current.last_name().clone()}
                        on_change={draft_field(&*draft, &on_change, |d, v| *d.last_name() = v)} />
                </div>
                <TextField id="email" label="Email" kind="email" required=true
                    value={current.email().clone()}
                    on_change={draft_field(&*draft, &on_change, |d, v| *d.email() = v)} />
                if creating {
                    <TextField id="password" label="Password" kind="password" required=true
                        value={current.password().clone()}
                        on_change={draft_field(&*draft, &on_change, |d, v| *d.password() = v)} />
                }
                <TextField id="bio" label="Bio" multiline=true
                    value={current.bio().clone()}
                    on_change={draft_field(&*draft, &on_change, |d, v| *d.bio() = v)} />
                <TextField id="phone" label="Phone number" kind="tel"
                    value={current.phone_number().clone()}
                    on_change={draft_field(&*draft, &on_change, |d, v| *d.phone_number() = v)} />
                <CheckboxField id="phone-visibility" label="Show my phone number"
                    checked={*current.phone_visibility()} on_change={on_visibility} />
                {P::extra_fields(&draft, &on_change)}
                <ImageInput id="profile-picture" on_loaded={on_picture} on_error={on_picture_error} />
                if !current.profile_picture().is_empty() {
                    <img class="w-24 h-24 rounded-full object-cover" src={current.profile_picture().clone()} alt="Profile preview" />
                }
                <div class="card-actions justify-end mt-2">
                    <Link<P::Route> to={cancel_route} classes="btn btn-ghost">{"Cancel"}</Link<P::Route>>
                    <button type="submit" class="btn btn-primary" disabled={*saving}>
                        {if *saving { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </div>
        </form>
    }
}
