//! Before/after hook boundary of the request pipeline

use crate::request::context::RequestContext;

/// Callbacks a request pipeline invokes around handler logic
///
/// `before` runs ahead of the handler, `after` once the handler has returned,
/// whatever it returned.
pub trait RequestHook: Send + Sync {
    fn before(&self, ctx: &mut RequestContext);

    fn after(&self, ctx: &mut RequestContext);
}

/// Run `handler` for one request with every hook attached
///
/// Before-hooks run in slice order, after-hooks in reverse order so the
/// first hook to set up is the last to tear down. The handler's return value
/// is passed through untouched.
///
/// # Example
///
/// ```rust
/// use reqevents::request::{handle_request, RequestContext, RequestHook};
///
/// let mut ctx = RequestContext::new();
/// let hooks: Vec<&dyn RequestHook> = Vec::new();
/// let status = handle_request(&hooks, &mut ctx, |_ctx| 200);
/// assert_eq!(status, 200);
/// ```
pub fn handle_request<R>(
    hooks: &[&dyn RequestHook],
    ctx: &mut RequestContext,
    handler: impl FnOnce(&mut RequestContext) -> R,
) -> R {
    for hook in hooks {
        hook.before(ctx);
    }

    let result = handler(ctx);

    for hook in hooks.iter().rev() {
        hook.after(ctx);
    }

    log::trace!("request {} completed", ctx.request_id());
    result
}
