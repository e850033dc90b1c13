//! Generic CRUD operation dispatch
//!
//! Every resource definition is a thin wiring of [`ResourceOperationConfig`]
//! values into these four dispatchers. A dispatcher builds the operation URL
//! from current state, issues the configured HTTP method through the control
//! plane client, translates the JSON response back into state, and wraps any
//! failure into diagnostics. There is no retry and no rollback: the first
//! failure ends the operation.

use meshguard_client::Client;
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::diag::Diagnostics;
use crate::state::{ResourceState, StateError, ReadFromState, WriteToState};

/// Builds the request URL for one operation from current state.
pub type UrlBuilder = fn(&ResourceState, &Client) -> String;

/// Policy hook applied to API errors before they become diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorHandler {
    /// Treat HTTP 404 as "resource gone": clear the ID and succeed, so the
    /// host sees drift instead of an error when something was deleted
    /// out-of-band.
    IgnoreNotFound,
}

/// One CRUD operation against the control plane
pub struct ResourceOperationConfig {
    /// Log and diagnostic label, e.g. `"RepositoryCreate"`
    pub name: &'static str,
    pub method: Method,
    pub url: UrlBuilder,
    pub error_handler: Option<RequestErrorHandler>,
}

/// Create response carrying only the new resource ID
#[derive(Debug, Deserialize)]
pub struct CreatedId {
    pub id: String,
}

impl WriteToState for CreatedId {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        state.set_id(&self.id);
        Ok(())
    }
}

/// Response payload for operations whose body carries nothing of interest
#[derive(Debug, Deserialize)]
pub struct Ignored {}

impl WriteToState for Ignored {
    fn write_to_state(&self, _state: &mut ResourceState) -> Result<(), StateError> {
        Ok(())
    }
}

fn write_response<Resp: WriteToState>(
    operation: &str,
    body: &[u8],
    state: &mut ResourceState,
) -> Result<(), Diagnostics> {
    // Empty bodies are legal for update/delete-style operations.
    if body.is_empty() {
        return Ok(());
    }
    let response: Resp = serde_json::from_slice(body)
        .map_err(|e| Diagnostics::operation_error(operation, &e))?;
    response
        .write_to_state(state)
        .map_err(|e| Diagnostics::operation_error(operation, &e))
}

/// Create the resource, then refresh state with the paired read.
///
/// `Req` is read from state and sent as the request body, `CResp` absorbs
/// the create response (usually [`CreatedId`]), and `RResp` is the payload
/// type of the follow-up read.
pub async fn create_resource<Req, CResp, RResp>(
    client: &Client,
    state: &mut ResourceState,
    create: &ResourceOperationConfig,
    read: &ResourceOperationConfig,
) -> Diagnostics
where
    Req: ReadFromState,
    CResp: WriteToState,
    RResp: WriteToState,
{
    let payload = match Req::read_from_state(state) {
        Ok(p) => p,
        Err(e) => return Diagnostics::operation_error(create.name, &e),
    };

    let url = (create.url)(state, client);
    debug!(operation = create.name, method = %create.method, %url, "dispatching create");

    let body = match client
        .do_request(create.method.clone(), &url, Some(&payload))
        .await
    {
        Ok(b) => b,
        Err(e) => return Diagnostics::operation_error(create.name, &e),
    };

    if let Err(diags) = write_response::<CResp>(create.name, &body, state) {
        return diags;
    }

    // Read-after-write refresh so computed attributes land in state.
    read_resource::<RResp>(client, state, read).await
}

/// Refresh state from the API.
pub async fn read_resource<Resp>(
    client: &Client,
    state: &mut ResourceState,
    config: &ResourceOperationConfig,
) -> Diagnostics
where
    Resp: WriteToState,
{
    let url = (config.url)(state, client);
    debug!(operation = config.name, method = %config.method, %url, "dispatching read");

    let body = match client
        .do_request(config.method.clone(), &url, None::<&()>)
        .await
    {
        Ok(b) => b,
        Err(e) => {
            if config.error_handler == Some(RequestErrorHandler::IgnoreNotFound)
                && e.is_not_found()
            {
                debug!(operation = config.name, %url, "resource gone, clearing id");
                state.clear_id();
                return Diagnostics::new();
            }
            return Diagnostics::operation_error(config.name, &e);
        }
    };

    match write_response::<Resp>(config.name, &body, state) {
        Ok(()) => Diagnostics::new(),
        Err(diags) => diags,
    }
}

/// Push the desired state to the API, then refresh with the paired read.
pub async fn update_resource<Req, UResp, RResp>(
    client: &Client,
    state: &mut ResourceState,
    update: &ResourceOperationConfig,
    read: &ResourceOperationConfig,
) -> Diagnostics
where
    Req: ReadFromState,
    UResp: WriteToState,
    RResp: WriteToState,
{
    let payload = match Req::read_from_state(state) {
        Ok(p) => p,
        Err(e) => return Diagnostics::operation_error(update.name, &e),
    };

    let url = (update.url)(state, client);
    debug!(operation = update.name, method = %update.method, %url, "dispatching update");

    let body = match client
        .do_request(update.method.clone(), &url, Some(&payload))
        .await
    {
        Ok(b) => b,
        Err(e) => return Diagnostics::operation_error(update.name, &e),
    };

    if let Err(diags) = write_response::<UResp>(update.name, &body, state) {
        return diags;
    }

    read_resource::<RResp>(client, state, read).await
}

/// Delete the resource. One request, no body; success is empty diagnostics
/// and the host removes the resource from state.
pub async fn delete_resource(
    client: &Client,
    state: &ResourceState,
    config: &ResourceOperationConfig,
) -> Diagnostics {
    let url = (config.url)(state, client);
    debug!(operation = config.name, method = %config.method, %url, "dispatching delete");

    match client
        .do_request(config.method.clone(), &url, None::<&()>)
        .await
    {
        Ok(_) => Diagnostics::new(),
        Err(e) => Diagnostics::operation_error(config.name, &e),
    }
}
