use folio_protocol::HostCommand;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_TITLE: &str = "Project";

/// Contents of the project detail overlay, taken from the trigger's data
/// attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub title: String,
    pub summary: String,
    /// Section the overlay's confirm link points at.
    pub target: String,
}

impl ProjectDetails {
    /// Missing title falls back to "Project"; missing summary and target
    /// become empty.
    pub fn from_attributes(
        title: Option<String>,
        summary: Option<String>,
        target: Option<String>,
    ) -> Self {
        Self {
            title: title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            summary: summary.unwrap_or_default(),
            target: target.unwrap_or_default(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailOverlay {
    #[default]
    Closed,
    Open(ProjectDetails),
}

impl DetailOverlay {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn open(&mut self, details: ProjectDetails) -> Vec<HostCommand> {
        debug!(title = %details.title, target = %details.target, "overlay opened");
        let commands = vec![
            HostCommand::SetOverlayContent {
                title: details.title.clone(),
                summary: details.summary.clone(),
                href: details.href(),
            },
            HostCommand::ShowOverlay,
            HostCommand::FocusOverlayConfirm,
        ];
        *self = Self::Open(details);
        commands
    }

    /// Always hides, whatever the current state.
    pub fn close(&mut self) -> Vec<HostCommand> {
        *self = Self::Closed;
        vec![HostCommand::HideOverlay]
    }

    /// Click inside the overlay element. Only a click on the backdrop itself
    /// (not on the dialog content) closes it.
    pub fn backdrop_clicked(&mut self, on_backdrop: bool) -> Vec<HostCommand> {
        if on_backdrop { self.close() } else { Vec::new() }
    }

    pub fn key_pressed(&mut self, key: &str) -> Vec<HostCommand> {
        if key == "Escape" { self.close() } else { Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ProjectDetails {
        ProjectDetails::from_attributes(
            Some("Ray tracer".into()),
            Some("A small path tracer.".into()),
            Some("ray-tracer".into()),
        )
    }

    #[test]
    fn open_fills_and_focuses() {
        let mut overlay = DetailOverlay::default();
        let commands = overlay.open(details());
        assert_eq!(
            commands,
            vec![
                HostCommand::SetOverlayContent {
                    title: "Ray tracer".into(),
                    summary: "A small path tracer.".into(),
                    href: "#ray-tracer".into(),
                },
                HostCommand::ShowOverlay,
                HostCommand::FocusOverlayConfirm,
            ]
        );
        assert!(overlay.is_open());
    }

    #[test]
    fn missing_attributes_fall_back() {
        let details = ProjectDetails::from_attributes(None, None, None);
        assert_eq!(details.title, "Project");
        assert_eq!(details.summary, "");
        assert_eq!(details.href(), "#");
    }

    #[test]
    fn escape_and_backdrop_close() {
        let mut overlay = DetailOverlay::default();
        overlay.open(details());
        assert!(overlay.key_pressed("Enter").is_empty());
        assert_eq!(overlay.key_pressed("Escape"), vec![HostCommand::HideOverlay]);
        assert!(!overlay.is_open());

        overlay.open(details());
        assert!(overlay.backdrop_clicked(false).is_empty());
        assert!(overlay.is_open());
        assert_eq!(overlay.backdrop_clicked(true), vec![HostCommand::HideOverlay]);
    }

    #[test]
    fn closing_twice_is_fine() {
        let mut overlay = DetailOverlay::default();
        assert_eq!(overlay.close(), vec![HostCommand::HideOverlay]);
        assert_eq!(overlay.close(), vec![HostCommand::HideOverlay]);
        assert_eq!(overlay, DetailOverlay::Closed);
    }
}
