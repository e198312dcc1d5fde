// Command relay: error taxonomy, channel guard, message model, formatting and
// the dispatcher that ties them together.

pub mod channel_guard;
pub mod dispatcher;
pub mod relay_error;
pub mod relay_formatting;
pub mod relay_message;

#[cfg(test)]
pub mod test_support;

pub use channel_guard::ChannelGuard;
pub use dispatcher::{
    dispatch, CommandRoute, Invocation, Responder, ResponderError, ResponsePolicy, ResponseTiming,
};
pub use relay_error::RelayError;
pub use relay_message::{Accent, RelayMessage};
