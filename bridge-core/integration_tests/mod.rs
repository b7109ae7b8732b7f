// Public API tests exercising a bridge end to end over the in-process
// memory transport, from an external consumer's perspective.

mod helpers;

mod callbacks;
mod invocation;
mod lifecycle;
mod modal;
mod readiness;
mod unsupported;
