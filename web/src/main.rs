use dioxus::prelude::*;
use tracing::{info, Level};

use ui::{BootConfig, Dashboard};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("logger already initialized: {err}");
    }

    let boot = BootConfig::read_from_document();
    info!(
        aquarium_id = ?boot.aquarium_id,
        aquariums = boot.aquariums.len(),
        "starting reefboard"
    );

    LaunchBuilder::new().with_context(boot).launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    // Views subscribe to this to re-render after a language switch.
    use_context_provider(|| Signal::new("en-US".to_string()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Dashboard {}
    }
}
