use js_sys::Uint8Array;
use shared::models::{check_image_size, image_data_url};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ImageInputProps {
    pub id: AttrValue,
    /// Receives the picture as a `data:` URL.
    pub on_loaded: Callback<String>,
    pub on_error: Callback<String>,
}

/// Profile picture picker.
#[function_component(ImageInput)]
pub fn image_input(props: &ImageInputProps) -> Html {
    let on_loaded = props.on_loaded.clone();
    let on_error = props.on_error.clone();
    let onchange = Callback::from(move |event: Event| {
        let Some(file) = event
            .target_dyn_into::<HtmlInputElement>()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        if let Err(message) = check_image_size(file.size() as u64) {
            on_error.emit(message.to_string());
            return;
        }
        let on_loaded = on_loaded.clone();
        let on_error = on_error.clone();
        spawn_local(async move {
            match read_data_url(&file).await {
                Ok(url) => on_loaded.emit(url),
                Err(message) => on_error.emit(message),
            }
        });
    });

    html! {
        <div class="form-control">
            <label class="label" for={props.id.clone()}>
                <span class="label-text">{"Profile picture"}</span>
            </label>
            <input id={props.id.clone()} type="file" accept="image/*" class="file-input file-input-bordered" {onchange} />
        </div>
    }
}

async fn read_data_url(file: &File) -> Result<String, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| format!("Could not read image: {err:?}"))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(image_data_url(&file.type_(), &bytes))
}
