#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Numbers API request failed: {0}")]
    Network(String),

    #[error("Numbers API request timed out after {0}s")]
    Timeout(u64),

    #[error("Numbers API returned HTTP {0}")]
    Status(u16),

    #[error("Numbers API returned a malformed payload: {0}")]
    MalformedFact(String),
}
