//! Yew binding of the shared panel state machine.
//!
//! [`use_resource_panel`] fetches the collection on mount and hands back a
//! [`PanelHandle`] whose mutations re-fetch on success and surface failures
//! as `last_error`, the same loop `RemoteCollection` runs outside the browser.

use std::fmt;
use std::rc::Rc;

use shared::collection::{PanelAction, PanelResult, PanelState, RemoveOutcome, ResourceApi};
use shared::resource::Resource;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, BrowserConfirm};

/// [`PanelState`] as a Yew reducer.
#[derive(Debug, PartialEq)]
pub struct PanelReducer<R>(PanelState<R>);

impl<R> Default for PanelReducer<R> {
    fn default() -> Self {
        Self(PanelState::default())
    }
}

impl<R: Resource> Reducible for PanelReducer<R> {
    type Action = PanelAction<R>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self(self.0.clone().reduce(action)))
    }
}

/// Access to one resource panel from inside a component.
pub struct PanelHandle<R: Resource> {
    state: UseReducerHandle<PanelReducer<R>>,
    api: ResourceApi<R>,
}

impl<R: Resource> Clone for PanelHandle<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            api: self.api.clone(),
        }
    }
}

impl<R: Resource> PartialEq for PanelHandle<R> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.api == other.api
    }
}

impl<R: Resource> fmt::Debug for PanelHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelHandle")
            .field("resource", &R::NAME)
            .field("state", self.state())
            .finish()
    }
}

impl<R: Resource> PanelHandle<R> {
    pub fn state(&self) -> &PanelState<R> {
        &self.state.0
    }

    pub fn api(&self) -> &ResourceApi<R> {
        &self.api
    }

    /// Re-fetches the list.
    pub fn refresh(&self) {
        let this = self.clone();
        spawn_local(async move { this.reload().await });
    }

    /// Posts `draft`; `on_saved` fires after the list has been re-fetched.
    pub fn create(&self, draft: R::Draft, on_saved: Callback<()>) {
        let this = self.clone();
        self.state.dispatch(PanelAction::MutationStarted);
        spawn_local(async move {
            let result = this.api.create(&draft).await;
            this.settle(result, on_saved).await;
        });
    }

    /// Puts `draft` over record `id`.
    pub fn update(&self, id: i64, draft: R::Draft, on_saved: Callback<()>) {
        let this = self.clone();
        self.state.dispatch(PanelAction::MutationStarted);
        spawn_local(async move {
            let result = this.api.update(id, &draft).await;
            this.settle(result, on_saved).await;
        });
    }

    /// Deletes record `id` once the browser confirm dialog agrees.
    pub fn remove(&self, id: i64) {
        let this = self.clone();
        self.state.dispatch(PanelAction::MutationStarted);
        spawn_local(async move {
            match this.api.remove(id, &BrowserConfirm).await {
                Ok(RemoveOutcome::Cancelled) => {
                    this.state.dispatch(PanelAction::MutationCancelled);
                }
                result => this.settle(result.map(|_| ()), Callback::noop()).await,
            }
        });
    }

    pub fn dismiss_error(&self) {
        self.state.dispatch(PanelAction::DismissError);
    }

    async fn reload(&self) {
        self.state.dispatch(PanelAction::ListStarted);
        match self.api.list().await {
            Ok(items) => self.state.dispatch(PanelAction::ListLoaded(items)),
            Err(err) => self.state.dispatch(PanelAction::ListFailed(err.to_string())),
        }
    }

    async fn settle(&self, result: PanelResult<()>, on_saved: Callback<()>) {
        match result {
            Ok(()) => {
                self.reload().await;
                on_saved.emit(());
            }
            Err(err) => {
                log::warn!("{} request failed: {err}", R::NAME);
                self.state.dispatch(PanelAction::MutationFailed(err.to_string()));
            }
        }
    }
}

/// Binds a panel for `R` to the calling component and fetches it on mount.
#[hook]
pub fn use_resource_panel<R: Resource>() -> PanelHandle<R> {
    let state = use_reducer(PanelReducer::<R>::default);
    let resource_api = use_memo((), |_| ResourceApi::<R>::new(api::client()));
    let handle = PanelHandle {
        state,
        api: (*resource_api).clone(),
    };

    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            handle.refresh();
            || ()
        });
    }

    handle
}
