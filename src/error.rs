use thiserror::Error;

/// Reasons a pattern fails to compile. Positions are byte offsets into the
/// pattern text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("parse error at {position}: expected {expected}")]
    Parse { position: usize, expected: String },
    #[error("unsupported feature at {position}: {feature}")]
    Unsupported { position: usize, feature: String },
}

impl CompileError {
    pub(crate) fn parse(position: usize, expected: impl Into<String>) -> Self {
        Self::Parse {
            position,
            expected: expected.into(),
        }
    }

    pub fn position(&self) -> usize {
        match self {
            Self::Parse { position, .. } | Self::Unsupported { position, .. } => *position,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
