//! Per-child layout requests.

/// Requested size along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Dimension {
    /// Exactly this many pixels. Zero is a valid request.
    Exact(f32),
    /// As large as the content wants to be.
    #[default]
    WrapContent,
    /// As large as the parent allows.
    MatchParent,
}

impl Dimension {
    /// The explicit size, if any.
    pub fn exact(self) -> Option<f32> {
        match self {
            Dimension::Exact(px) => Some(px),
            Dimension::WrapContent | Dimension::MatchParent => None,
        }
    }
}

/// Layout request a child carries into its container.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutParams {
    pub height: Dimension,
}

impl LayoutParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, height: Dimension) -> Self {
        self.height = height;
        self
    }

    pub fn exact_height(height: f32) -> Self {
        Self::new().height(Dimension::Exact(height))
    }
}

/// Whether a view is drawn and whether it takes up space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Takes up space but is not drawn.
    Invisible,
    /// Neither drawn nor measured.
    Gone,
}

impl Visibility {
    pub fn is_gone(self) -> bool {
        self == Visibility::Gone
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}
