use std::time::Duration;

use crate::ResolveError;

/// A blocking GET that returns the response body
pub trait Transport: Send + Sync {
    fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, ResolveError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, ResolveError> {
        (**self).get(endpoint, query)
    }
}

pub struct StatefulAgent {
    client_id: String,
    agent: ureq::Agent,
}

impl StatefulAgent {
    /// Every request gives up after `timeout`, a stalled server included
    pub fn new(client_id: impl ToString, timeout: Duration) -> Self {
        Self {
            client_id: client_id.to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl std::fmt::Debug for StatefulAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatefulAgent")
            .field("client_id", &self.client_id.chars().map(|_| 'x').collect::<String>())
            .finish()
    }
}

impl Transport for StatefulAgent {
    fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, ResolveError> {
        log::trace!("GET {} {:?}", endpoint, query);

        let resp = query
            .iter()
            .fold(self.agent.get(endpoint), |req, (k, v)| req.query(k, v))
            .set("Client-ID", &self.client_id)
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => ResolveError::Status {
                    endpoint: endpoint.to_string(),
                    status,
                },
                ureq::Error::Transport(transport) => ResolveError::Http {
                    endpoint: endpoint.to_string(),
                    source: Box::new(transport),
                },
            })?;

        resp.into_string().map_err(|err| ResolveError::Http {
            endpoint: endpoint.to_string(),
            source: Box::new(err),
        })
    }
}
