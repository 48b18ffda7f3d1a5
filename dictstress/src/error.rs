use crate::checker::Mismatch;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(
        "structural mismatch: capacity {} vs {}, fill/used {:?} vs {:?}",
        .0.reference_capacity,
        .0.candidate_capacity,
        .0.reference_fill_used,
        .0.candidate_fill_used
    )]
    StructuralMismatch(Box<Mismatch>),
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
