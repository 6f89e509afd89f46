use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum CatchErr {
    #[error("[Exhausted] No more elements remain in the sequence")]
    NoMoreElements,

    #[error("[Element Failed] Element `{original}` at index `{index}` failed, error: {error}")]
    ElementFailed { index: usize, original: String, error: String },
}

impl CatchErr {
    pub(crate) fn element_failed(index: usize, original: &impl std::fmt::Debug, error: &impl std::fmt::Display) -> Self {
        CatchErr::ElementFailed { index, original: format!("{original:?}"), error: error.to_string() }
    }
}
