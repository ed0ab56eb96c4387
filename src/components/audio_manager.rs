//! Audio Manager - the native audio element behind the player.
//! Commands go straight to the element; only starting playback is asynchronous.

#[cfg(not(target_arch = "wasm32"))]
use dioxus::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use serde::Deserialize;

use crate::playback::PlayOutcome;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

pub const AUDIO_ELEMENT_ID: &str = "player";

/// Position and duration as the element reports them; duration is NaN before
/// metadata has loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaClock {
    pub position: f64,
    pub duration: f64,
}

impl Default for MediaClock {
    fn default() -> Self {
        Self {
            position: 0.0,
            duration: f64::NAN,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn audio_element() -> Option<HtmlAudioElement> {
    window()?
        .document()?
        .get_element_by_id(AUDIO_ELEMENT_ID)?
        .dyn_into::<HtmlAudioElement>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
fn describe_js_error(err: &wasm_bindgen::JsValue) -> String {
    js_sys::Reflect::get(err, &"name".into())
        .ok()
        .and_then(|name| name.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

#[cfg(target_arch = "wasm32")]
pub fn set_source(source: &str) {
    if let Some(audio) = audio_element() {
        audio.set_src(source);
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn request_play() -> PlayOutcome {
    let Some(audio) = audio_element() else {
        return PlayOutcome::Rejected("audio element missing".to_string());
    };
    match audio.play() {
        Ok(promise) => match wasm_bindgen_futures::JsFuture::from(promise).await {
            Ok(_) => PlayOutcome::Started,
            Err(err) => PlayOutcome::Rejected(describe_js_error(&err)),
        },
        Err(err) => PlayOutcome::Rejected(describe_js_error(&err)),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn pause() {
    if let Some(audio) = audio_element() {
        let _ = audio.pause();
    }
}

#[cfg(target_arch = "wasm32")]
pub fn set_position(seconds: f64) {
    if let Some(audio) = audio_element() {
        audio.set_current_time(seconds);
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn media_clock() -> MediaClock {
    audio_element()
        .map(|audio| MediaClock {
            position: audio.current_time(),
            duration: audio.duration(),
        })
        .unwrap_or_default()
}

// Desktop webview: the element lives in the page, so commands are sent as scripts.

#[cfg(not(target_arch = "wasm32"))]
fn audio_script(body: &str) -> String {
    format!(
        r#"return (function () {{
            const audio = document.getElementById("{AUDIO_ELEMENT_ID}");
            if (!audio) return null;
            {body}
        }})();"#
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_source(source: &str) {
    let quoted = serde_json::to_string(source).unwrap_or_else(|_| "\"\"".to_string());
    let _ = document::eval(&audio_script(&format!("audio.src = {quoted}; return true;")));
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn request_play() -> PlayOutcome {
    let eval = document::eval(&format!(
        r#"return (async function () {{
            const audio = document.getElementById("{AUDIO_ELEMENT_ID}");
            if (!audio) return "audio element missing";
            try {{
                await audio.play();
                return null;
            }} catch (err) {{
                return String((err && err.name) || err);
            }}
        }})();"#
    ));
    match eval.join::<Option<String>>().await {
        Ok(None) => PlayOutcome::Started,
        Ok(Some(reason)) => PlayOutcome::Rejected(reason),
        Err(err) => PlayOutcome::Rejected(err.to_string()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn pause() {
    let _ = document::eval(&audio_script("audio.pause(); return true;"));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_position(seconds: f64) {
    if seconds.is_finite() {
        let _ = document::eval(&audio_script(&format!(
            "audio.currentTime = {seconds}; return true;"
        )));
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn media_clock() -> MediaClock {
    #[derive(Deserialize)]
    struct RawClock {
        position: f64,
        duration: Option<f64>,
    }

    let eval = document::eval(&audio_script(
        "return { position: audio.currentTime, \
         duration: Number.isFinite(audio.duration) ? audio.duration : null };",
    ));
    match eval.join::<Option<RawClock>>().await {
        Ok(Some(raw)) => MediaClock {
            position: raw.position,
            duration: raw.duration.unwrap_or(f64::NAN),
        },
        _ => MediaClock::default(),
    }
}
