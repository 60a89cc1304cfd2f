//! Single-preview playback: starting one clip stops whichever was playing.

/// Something that can silence a preview identified by `H`.
pub trait PreviewSink<H> {
    /// Pause and rewind to the start.
    fn stop(&self, handle: &H);
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewController<H> {
    current: Option<H>,
}

impl<H> Default for PreviewController<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H: PartialEq> PreviewController<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&H> {
        self.current.as_ref()
    }

    /// Marks `handle` as the active preview, stopping the previous one first.
    /// Returns `false` when `handle` was already active; nothing is touched then.
    pub fn play(&mut self, handle: H, sink: &impl PreviewSink<H>) -> bool {
        if self.current.as_ref() == Some(&handle) {
            return false;
        }
        if let Some(previous) = self.current.take() {
            sink.stop(&previous);
        }
        self.current = Some(handle);
        true
    }

    pub fn stop_all(&mut self, sink: &impl PreviewSink<H>) {
        if let Some(previous) = self.current.take() {
            sink.stop(&previous);
        }
    }

    /// Stops `handle` if it is the active preview. Returns whether it was.
    pub fn stop_if(&mut self, handle: &H, sink: &impl PreviewSink<H>) -> bool {
        if self.current.as_ref() != Some(handle) {
            return false;
        }
        self.stop_all(sink);
        true
    }
}

/// Stops `<audio>` elements by DOM id.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomPreviewSink;

/// Element id for a preview; keeps only characters safe in an id selector.
pub fn preview_element_id(prefix: &str, key: &str) -> String {
    let key: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("preview-{prefix}-{key}")
}

#[cfg(target_arch = "wasm32")]
impl PreviewSink<String> for DomPreviewSink {
    fn stop(&self, element_id: &String) {
        use wasm_bindgen::JsCast;

        let Some(audio) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(element_id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlAudioElement>().ok())
        else {
            return;
        };
        let _ = audio.pause();
        audio.set_current_time(0.0);
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreviewSink<String> for DomPreviewSink {
    fn stop(&self, element_id: &String) {
        let script = format!(
            "const el = document.getElementById({}); if (el) {{ el.pause(); el.currentTime = 0; }}",
            serde_json::Value::from(element_id.as_str())
        );
        let _ = dioxus::document::eval(&script);
    }
}
