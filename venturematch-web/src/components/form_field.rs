use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Callback that writes one field of a form held in `state`.
pub fn setter<D: Clone + 'static, V: 'static>(
    state: &UseStateHandle<D>,
    apply: fn(&mut D, V),
) -> Callback<V> {
    let state = state.clone();
    Callback::from(move |value: V| {
        let mut next = (*state).clone();
        apply(&mut next, value);
        state.set(next);
    })
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub kind: AttrValue,
    #[prop_or_default]
    pub required: bool,
    /// Renders a `<textarea>` instead of an `<input>`.
    #[prop_or_default]
    pub multiline: bool,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let on_change = props.on_change.clone();
    let oninput = Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            on_change.emit(input.value());
        } else if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
            on_change.emit(area.value());
        }
    });

    html! {
        <div class="form-control">
            <label class="label" for={props.id.clone()}>
                <span class="label-text">{props.label.clone()}</span>
            </label>
            if props.multiline {
                <textarea
                    id={props.id.clone()}
                    class="textarea textarea-bordered"
                    required={props.required}
                    value={props.value.clone()}
                    {oninput}
                />
            } else {
                <input
                    id={props.id.clone()}
                    class="input input-bordered"
                    type={props.kind.clone()}
                    required={props.required}
                    value={props.value.clone()}
                    {oninput}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CheckboxFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub checked: bool,
    pub on_change: Callback<bool>,
}

#[function_component(CheckboxField)]
pub fn checkbox_field(props: &CheckboxFieldProps) -> Html {
    let on_change = props.on_change.clone();
    let onchange = Callback::from(move |event: Event| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            on_change.emit(input.checked());
        }
    });

    html! {
        <div class="form-control">
            <label class="label cursor-pointer justify-start gap-3" for={props.id.clone()}>
                <input id={props.id.clone()} type="checkbox" class="checkbox" checked={props.checked} {onchange} />
                <span class="label-text">{props.label.clone()}</span>
            </label>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorAlertProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(ErrorAlert)]
pub fn error_alert(props: &ErrorAlertProps) -> Html {
    let dismiss = props.on_dismiss.clone().map(|callback| {
        let onclick = Callback::from(move |_: MouseEvent| callback.emit(()));
        html! { <button class="btn btn-ghost btn-xs" {onclick}>{"✕"}</button> }
    });

    html! {
        <div class="alert alert-error">
            <span>{props.message.clone()}</span>
            {dismiss}
        </div>
    }
}
