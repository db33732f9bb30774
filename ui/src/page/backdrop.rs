//! Background image behind the aquarium selector.
//!
//! Each selection clears the current backdrop and then probes the new image.
//! Only a successful probe for the latest selection is applied, so a slow
//! load for an earlier choice can never overwrite a newer one.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackdropState {
    generation: u64,
    applied: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTicket {
    pub generation: u64,
    pub url: String,
}

impl BackdropState {
    /// Clear the backdrop for a new selection. Returns a ticket when there is
    /// an image worth probing.
    pub fn begin(&mut self, url: Option<&str>) -> Option<ProbeTicket> {
        self.generation += 1;
        self.applied = None;
        let url = url.map(str::trim).filter(|u| !u.is_empty())?;
        Some(ProbeTicket {
            generation: self.generation,
            url: url.to_string(),
        })
    }

    /// Apply a finished probe. Returns whether the backdrop changed.
    pub fn resolve(&mut self, ticket: &ProbeTicket, loaded: bool) -> bool {
        if !loaded || ticket.generation != self.generation {
            return false;
        }
        self.applied = Some(ticket.url.clone());
        true
    }

    pub fn applied(&self) -> Option<&str> {
        self.applied.as_deref()
    }

    /// Inline style for the selector and its preview.
    pub fn style(&self) -> String {
        match &self.applied {
            Some(url) => format!(
                "background-image: url(\"{}\"); background-size: cover; background-position: center;",
                css_escape(url)
            ),
            None => String::new(),
        }
    }
}

fn css_escape(url: &str) -> String {
    url.replace('\\', "%5C")
        .replace('"', "%22")
        .replace('\n', "")
}

/// Load `url` off-screen and report whether it decoded.
#[cfg(target_arch = "wasm32")]
pub async fn probe_image(url: &str) -> bool {
    let Ok(img) = web_sys::HtmlImageElement::new() else {
        return false;
    };
    img.set_src(url);
    match wasm_bindgen_futures::JsFuture::from(img.decode()).await {
        Ok(_) => true,
        Err(_) => {
            tracing::debug!(%url, "aquarium image failed to load");
            false
        }
    }
}

/// Without a browser there is nothing to load.
#[cfg(not(target_arch = "wasm32"))]
pub async fn probe_image(_url: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clears_before_probe() {
        let mut state = BackdropState::default();
        let first = state.begin(Some("/img/1.png")).unwrap();
        assert!(state.resolve(&first, true));
        assert_eq!(state.applied(), Some("/img/1.png"));

        let _ = state.begin(Some("/img/2.png"));
        assert_eq!(state.applied(), None);
        assert!(state.style().is_empty());
    }

    #[test]
    fn failed_probe_leaves_backdrop_cleared() {
        let mut state = BackdropState::default();
        let ticket = state.begin(Some("/img/broken.png")).unwrap();
        assert!(!state.resolve(&ticket, false));
        assert_eq!(state.applied(), None);
    }

    #[test]
    fn stale_probe_is_discarded() {
        let mut state = BackdropState::default();
        let slow = state.begin(Some("/img/1.png")).unwrap();
        let fast = state.begin(Some("/img/2.png")).unwrap();
        assert!(state.resolve(&fast, true));
        assert!(!state.resolve(&slow, true));
        assert_eq!(state.applied(), Some("/img/2.png"));
    }

    #[test]
    fn missing_image_yields_no_ticket() {
        let mut state = BackdropState::default();
        assert_eq!(state.begin(None), None);
        assert_eq!(state.begin(Some("  ")), None);
    }

    #[test]
    fn style_quotes_the_url() {
        let mut state = BackdropState::default();
        let ticket = state.begin(Some("/img/a\"b.png")).unwrap();
        state.resolve(&ticket, true);
        assert!(state.style().contains("url(\"/img/a%22b.png\")"));
    }
}
