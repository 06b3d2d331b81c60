//! Contract violations reported by the row binding path.

/// A collaborator broke the binding contract. Not transient: the caller gets
/// it immediately and nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowError {
    /// The wrapped adapter produced no item view for a row.
    MissingItemView { position: usize },
    /// The wrapped adapter produced no header view for a row that starts a
    /// group.
    MissingHeaderView { position: usize },
}

impl RowError {
    pub fn position(&self) -> usize {
        match self {
            RowError::MissingItemView { position } | RowError::MissingHeaderView { position } => {
                *position
            }
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::MissingItemView { position } => {
                write!(f, "adapter returned no item view for row {position}")
            }
            RowError::MissingHeaderView { position } => {
                write!(f, "adapter returned no header view for row {position}")
            }
        }
    }
}

impl std::error::Error for RowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_row() {
        assert_eq!(
            RowError::MissingHeaderView { position: 3 }.to_string(),
            "adapter returned no header view for row 3"
        );
        assert_eq!(RowError::MissingItemView { position: 7 }.position(), 7);
    }
}
