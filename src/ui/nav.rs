//! Navigation bar behaviour: mobile drawer, scroll shadow, active links.

use crate::api::User;
use crate::core::events::UiEvent;

/// Scroll offset past which the bar gets a shadow.
pub const SHADOW_THRESHOLD: f32 = 30.0;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NavState {
    pub drawer_open: bool,
    pub shadow: bool,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    /// Escape closes the drawer; scrolling toggles the shadow.
    pub fn handle_event(&mut self, event: &UiEvent) {
        match event {
            UiEvent::Key(key) if key == "Escape" => self.close_drawer(),
            UiEvent::Scroll { y } => self.shadow = *y > SHADOW_THRESHOLD,
            _ => {}
        }
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// For each link href, whether it points at the page at `path`.
pub fn active_links(path: &str, hrefs: &[&str]) -> Vec<bool> {
    let page = match last_segment(path) {
        "" => "index.html",
        page => page,
    };
    hrefs
        .iter()
        .map(|href| {
            let target = last_segment(href);
            !target.is_empty() && target != "#" && page.contains(target)
        })
        .collect()
}

/// Label for the login link: the user's first name once signed in.
pub fn login_label(user: Option<&User>) -> Option<String> {
    user.map(|u| u.first_name().to_string())
}

/// Relative prefix from a page at `path` back to the site root.
pub fn asset_prefix(path: &str) -> &'static str {
    match path.matches('/').count() {
        0 | 1 => "",
        2 => "../",
        _ => "../../",
    }
}
