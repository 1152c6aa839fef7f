use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherPushError {
    #[error("{service} http error: {source}")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned status {code}")]
    HttpStatus { service: &'static str, code: u16 },

    #[error("{service} decode error: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}: empty response")]
    EmptyResponse(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WeatherPushError {
    pub fn network(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Network { service, source }
    }

    pub fn decode(service: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Decode { service, source }
    }
}

pub type Result<T> = std::result::Result<T, WeatherPushError>;
