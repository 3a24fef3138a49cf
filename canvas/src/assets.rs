//! Icon asset table and the browser-side icon loader.
//!
//! The tool to asset mapping is closed: every [`IconKind`] has exactly one
//! PNG under `assets/img/annotations/`. Loading is asynchronous; an icon that
//! has not loaded (or failed to load) is simply not ready and gets skipped by
//! the renderer.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use crate::doc::IconKind;

/// Site-relative path of an icon's image.
#[must_use]
pub fn icon_path(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Arrow => "assets/img/annotations/arrow.png",
        IconKind::Circle => "assets/img/annotations/circle.png",
        IconKind::Crash => "assets/img/annotations/crash.png",
        IconKind::Warning => "assets/img/annotations/warning.png",
        IconKind::Injury => "assets/img/annotations/injury.png",
        IconKind::Cross => "assets/img/annotations/cross.png",
    }
}

/// `{base_url}/assets/img/annotations/{tool}.png`.
#[must_use]
pub fn icon_url(base_url: &str, kind: IconKind) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), icon_path(kind))
}

#[cfg(feature = "web")]
pub use web::IconAtlas;

#[cfg(feature = "web")]
mod web {
    use std::collections::HashMap;

    use web_sys::HtmlImageElement;

    use crate::config::EditorConfig;
    use crate::doc::IconKind;

    /// Browser images for every icon, loaded once per editor.
    #[derive(Debug, Default)]
    pub struct IconAtlas {
        images: HashMap<IconKind, HtmlImageElement>,
    }

    impl IconAtlas {
        /// Start loading every icon. `on_load` is invoked as each finishes so
        /// the host can redraw; failures are left unready and never reported.
        #[must_use]
        pub fn load(config: &EditorConfig, on_load: Option<&js_sys::Function>) -> Self {
            let mut images = HashMap::new();
            for kind in IconKind::ALL {
                match HtmlImageElement::new() {
                    Ok(img) => {
                        img.set_onload(on_load);
                        img.set_src(&config.icon_url(kind));
                        images.insert(kind, img);
                    }
                    Err(e) => log::debug!("icon {} not created: {e:?}", kind.name()),
                }
            }
            Self { images }
        }

        /// The icon image if it has finished loading successfully.
        #[must_use]
        pub fn ready(&self, kind: IconKind) -> Option<&HtmlImageElement> {
            self.images.get(&kind).filter(|img| img.complete() && img.natural_width() > 0)
        }
    }
}
