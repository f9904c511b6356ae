use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Unsupported call type in trace: {typ}")]
    UnsupportedCallType { typ: String },
    #[error("Unsupported tracer output: only the built-in call tracer can be collected")]
    UnsupportedTracer,
    #[error("Invalid address or selector in labels config: {key}")]
    InvalidLabelKey { key: String },
}

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse fixture file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid call trace in fixture: record {id} follows record {previous_id}")]
    OutOfOrderCall { id: u64, previous_id: u64 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid detail level: expected `default` or `full`, got {value}")]
    InvalidDetailLevel { value: String },
    #[error("Invalid boolean for `{param}`: expected `true` or `false`, got {value}")]
    InvalidFlag { param: String, value: String },
    #[error("Invalid index list for `{param}`: {value}")]
    InvalidIndexList { param: String, value: String },
}
