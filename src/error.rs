use crate::path::PathId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("node shape `{found}` matches no renderer variant")]
    InvalidElementNode { found: String },

    #[error("component `{component}` has no render implementation")]
    MissingRenderMethod { component: String },

    #[error("no node tagged `{path}` in the document")]
    PathNotFound { path: PathId },

    #[error("renderer tree has not been mounted")]
    NotMounted,
}

pub type Result<T> = std::result::Result<T, RenderError>;
