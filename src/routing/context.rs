use std::net::SocketAddr;

use crate::config::AppState;
use crate::ingress::RequestDescriptor;

/// Everything a handler may read while serving one request
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub request: &'a RequestDescriptor,
    pub state: &'a AppState,
    pub peer_addr: Option<SocketAddr>,
}

impl<'a> RequestContext<'a> {
    pub const fn new(request: &'a RequestDescriptor, state: &'a AppState) -> Self {
        Self {
            request,
            state,
            peer_addr: None,
        }
    }

    #[must_use]
    pub const fn with_peer(mut self, peer_addr: SocketAddr) -> Self {
        self.peer_addr = Some(peer_addr);
        self
    }
}
