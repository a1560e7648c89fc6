use ca_output::OutputError;
use ca_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("grid error: {0}")]
    Grid(String),
}

pub type ExperimentResult<T> = Result<T, ExperimentError>;
