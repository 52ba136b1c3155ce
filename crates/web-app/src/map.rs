use mapfit_domain::{Kind, Position};

/// Interface to the external mapping widget.
///
/// The shell implements this on top of the actual map library; the core
/// only issues commands and never observes widget state.
pub trait Map {
    fn add_marker(&self, position: Position, label: &str, style: MarkerStyle);
    fn focus_on(&self, position: Position, zoom: u8);
    fn remove_all_markers(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Running,
    Cycling,
}

impl MarkerStyle {
    /// CSS class applied to the marker popup.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            MarkerStyle::Running => "running-popup",
            MarkerStyle::Cycling => "cycling-popup",
        }
    }
}

impl From<Kind> for MarkerStyle {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Running => MarkerStyle::Running,
            Kind::Cycling => MarkerStyle::Cycling,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::running(Kind::Running, "running-popup")]
    #[case::cycling(Kind::Cycling, "cycling-popup")]
    fn test_marker_style(#[case] kind: Kind, #[case] expected: &str) {
        assert_eq!(MarkerStyle::from(kind).class(), expected);
    }
}
