use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchlogError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("{path}: Headshot value {value:?} has no parenthesized percentage")]
    HeadshotFormat { path: String, value: String },

    #[error("{path}: Score value {value:?} is not of the form <int>-<int>")]
    RoundScoreFormat { path: String, value: String },

    #[error("metric {metric:?} has non-numeric value {value:?}")]
    MetricNotNumeric { metric: String, value: String },

    #[error("weight table {path}: {source}")]
    WeightTable { path: String, source: csv::Error },

    #[error("output table {path} has no Filename column")]
    MissingFilenameColumn { path: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MatchlogError>;
