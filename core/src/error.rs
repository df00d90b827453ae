//! Internal supervisor errors: failures of the plumbing itself, as opposed
//! to [`sv_abi::ErrorKind`], which is what a guest syscall observes
//! (spec.md §7 draws this line explicitly).

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("notification channel i/o error: {0}")]
    Channel(#[from] std::io::Error),
    #[error("notification channel closed")]
    Closed,
}
