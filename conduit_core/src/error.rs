use miette::Diagnostic;
use thiserror::Error;

/// Errors of the typed lookups on the mediator and proxy registries.
#[derive(Error, Debug, Diagnostic)]
pub enum RegistryError {
    #[error("\"{name}\" is registered, but is not a {expected_type}.")]
    #[diagnostic(help(
        "check that the same name isn't shared by two different types"
    ))]
    TypeMismatch {
        name: String,
        expected_type: &'static str,
    },
}

/// Errors raised when a weak handle outlives its [`Facade`](crate::Facade).
#[derive(Error, Debug, Diagnostic)]
pub enum FacadeError {
    #[error("The facade has already been dropped.")]
    Unavailable,
}
