#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationErrorKind {
    MissingVariable,
    ShapeMismatch,
}

impl EvaluationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationErrorKind::MissingVariable => "MissingVariable",
            EvaluationErrorKind::ShapeMismatch => "ShapeMismatch",
        }
    }
}

/// Failure while turning an input tree into a wire value.
///
/// `path` locates the failing node inside the tree (`review.stars`, `ids[2]`).
/// It is filled in while the error travels back up through the enclosing
/// lists and maps, so it stays `None` for a failure at the root.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("variable `{name}` was not provided{}", at_path(.path))]
    MissingVariable { name: String, path: Option<String> },
    #[error("{message}{}", at_path(.path))]
    ShapeMismatch { message: String, path: Option<String> },
}

impl EvaluationError {
    pub fn missing_variable(name: impl Into<String>) -> Self {
        EvaluationError::MissingVariable {
            name: name.into(),
            path: None,
        }
    }

    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        EvaluationError::ShapeMismatch {
            message: message.into(),
            path: None,
        }
    }

    pub fn kind(&self) -> EvaluationErrorKind {
        match self {
            EvaluationError::MissingVariable { .. } => EvaluationErrorKind::MissingVariable,
            EvaluationError::ShapeMismatch { .. } => EvaluationErrorKind::ShapeMismatch,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            EvaluationError::MissingVariable { path, .. } | EvaluationError::ShapeMismatch { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Prefix the path with the map key the failing node was found under.
    pub fn with_segment(mut self, key: &str) -> Self {
        let path = self.path_mut();
        *path = Some(match path.take() {
            None => key.to_string(),
            Some(rest) if rest.starts_with('[') => format!("{key}{rest}"),
            Some(rest) => format!("{key}.{rest}"),
        });
        self
    }

    /// Prefix the path with the list index the failing node was found at.
    pub fn with_index(mut self, index: usize) -> Self {
        let path = self.path_mut();
        *path = Some(match path.take() {
            None => format!("[{index}]"),
            Some(rest) if rest.starts_with('[') => format!("[{index}]{rest}"),
            Some(rest) => format!("[{index}].{rest}"),
        });
        self
    }

    fn path_mut(&mut self) -> &mut Option<String> {
        match self {
            EvaluationError::MissingVariable { path, .. } | EvaluationError::ShapeMismatch { path, .. } => path,
        }
    }
}

fn at_path(path: &Option<String>) -> String {
    match path {
        Some(path) => format!(" (path: {path})"),
        None => String::new(),
    }
}

/// Failure while reading a typed result out of a response object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("missing field `{path}`")]
    MissingField { path: String },
    #[error("field `{}` has the wrong shape: {message}", display_path(.path))]
    WrongShape { path: String, message: String },
    #[error("unknown __typename `{typename}` at `{}`", display_path(.path))]
    UnknownTypename { typename: String, path: String },
}

impl DecodeError {
    pub fn path(&self) -> &str {
        match self {
            DecodeError::MissingField { path }
            | DecodeError::WrongShape { path, .. }
            | DecodeError::UnknownTypename { path, .. } => path,
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}
