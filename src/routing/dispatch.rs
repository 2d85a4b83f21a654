//! Dispatch stage
//!
//! Resolves the route for a request and runs its handler. This is the
//! terminal error stage: an unmatched request becomes a 404 envelope and a
//! handler error or panic becomes a 500 envelope, so one failing request
//! never takes the server down.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::context::RequestContext;
use super::table::RouteTable;
use crate::api::{ApiError, Reply};
use crate::logger;

pub fn dispatch(table: &RouteTable, ctx: &RequestContext<'_>) -> Reply {
    let request = ctx.request;

    let Some(route) = table.find(&request.method, &request.path) else {
        return ApiError::NotFound {
            method: request.method.to_string(),
            path: request.path.clone(),
        }
        .into_reply();
    };

    tracing::debug!(route = route.name, peer = ?ctx.peer_addr, "dispatching");

    match panic::catch_unwind(AssertUnwindSafe(|| (route.handler)(ctx))) {
        Ok(Ok(reply)) => reply,
        Ok(Err(err)) => {
            if let ApiError::HandlerFault(cause) = &err {
                logger::log_handler_fault(request.method.as_str(), &request.path, cause);
            }
            err.into_reply()
        }
        Err(payload) => {
            let cause = panic_message(payload.as_ref());
            logger::log_handler_fault(request.method.as_str(), &request.path, &cause);
            ApiError::HandlerFault(cause).into_reply()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic with non-string payload".to_string()
    }
}
