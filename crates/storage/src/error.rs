use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PersistenceError {
    #[snafu(display("chat '{id}' was not found on `{stage}`"))]
    NotFound { stage: &'static str, id: String },
    #[snafu(display("store rejected write for chat '{id}' on `{stage}`: {details}"))]
    WriteRejected {
        stage: &'static str,
        id: String,
        details: String,
    },
    #[snafu(display("id '{raw}' is invalid for {id_type}"))]
    InvalidId {
        stage: &'static str,
        id_type: &'static str,
        raw: String,
    },
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
