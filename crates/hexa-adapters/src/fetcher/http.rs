//! HTTP downloader built on `ureq`.

use std::io::Read;

use hexa_core::application::FetchError;
use tracing::debug;

use super::Downloader;

/// Blocking GET through a shared `ureq` agent.
///
/// Anything other than `200 OK` is reported as [`FetchError::HttpStatus`].
/// There is no timeout; a stalled server blocks the caller.
#[derive(Clone)]
pub struct HttpDownloader {
    agent: ureq::Agent,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader for HttpDownloader {
    fn open(&self, url: &str) -> Result<Box<dyn Read>, FetchError> {
        match self.agent.get(url).call() {
            Ok(response) => {
                let status = response.status().as_u16();
                if status != 200 {
                    return Err(FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                    });
                }
                debug!(url, "archive download started");
                Ok(Box::new(response.into_body().into_reader()))
            }
            Err(ureq::Error::StatusCode(status)) => Err(FetchError::HttpStatus {
                url: url.to_string(),
                status,
            }),
            Err(e) => Err(FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_url_is_a_transport_error() {
        let err = HttpDownloader::new().open("not a url").err().unwrap();
        assert!(matches!(err, FetchError::Transport { ref url, .. } if url == "not a url"));
        assert!(err.is_transient());
    }
}
