// The per-invocation state machine shared by every relay command:
//
//   Received -> ChannelChecked -> Fetching -> (Success | FetchFailed)
//            -> (Formatting -> Sent | Reported)
//
// The chat platform is hidden behind `Responder`, so the whole flow runs in
// tests with a recording fake.

use std::future::Future;

use async_trait::async_trait;

use super::channel_guard::ChannelGuard;
use super::relay_error::{FailureKind, RelayError};
use super::relay_message::{RelayMessage, Render};

pub type ResponderError = Box<dyn std::error::Error + Send + Sync>;

/// Generic notice for a fetch that succeeded but came back empty without the
/// service naming a more specific reason.
const NO_RESULTS_NOTICE: &str = "No results found.";

/// Whether the invocation is acknowledged before the upstream fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseTiming {
    /// Acknowledge first so slow upstream calls don't run into the platform's
    /// interaction timeout.
    DeferFirst,
    /// Answer directly with the first result or notice.
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsePolicy {
    pub timing: ResponseTiming,
    pub ephemeral: bool,
    /// Maximum number of result messages per invocation. `None` sends every result.
    pub cap: Option<usize>,
}

impl ResponsePolicy {
    pub fn uncapped(self) -> Self {
        Self { cap: None, ..self }
    }
}

/// Static description of one command: its name, where it may run and how it answers.
#[derive(Debug, Clone, Copy)]
pub struct CommandRoute {
    pub name: &'static str,
    pub guard: ChannelGuard,
    pub policy: ResponsePolicy,
}

/// One user-triggered execution of a command.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub channel_id: u64,
    pub user_id: u64,
    pub user_name: String,
    pub parameters: Vec<(&'static str, String)>,
}

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Rejected,
    Reported(FailureKind),
    Sent(usize),
}

/// Outbound side of an invocation. Implemented by the Discord layer.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Defer the response (shows the "thinking..." state).
    async fn acknowledge(&self, ephemeral: bool) -> Result<(), ResponderError>;
    /// Send a plain text notice.
    async fn notify(&self, text: String, ephemeral: bool) -> Result<(), ResponderError>;
    /// Send one rendered result.
    async fn deliver(&self, message: RelayMessage, ephemeral: bool) -> Result<(), ResponderError>;
}

/// Run one invocation through the channel guard, the fetch and the formatter.
///
/// `fetch` is only called once the channel check passed. Errors returned here
/// come from the responder itself; every `RelayError` is reported to the user
/// and ends in `Ok`.
pub async fn dispatch<R, T, F, Fut>(
    route: &CommandRoute,
    invocation: &Invocation,
    responder: &R,
    fetch: F,
) -> Result<DispatchOutcome, ResponderError>
where
    R: Responder + ?Sized,
    T: Render,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, RelayError>>,
{
    tracing::debug!(
        command = route.name,
        user_id = invocation.user_id,
        user = %invocation.user_name,
        channel_id = invocation.channel_id,
        parameters = ?invocation.parameters,
        "Received invocation"
    );

    if let Err(rejection) = route.guard.check(invocation.channel_id) {
        tracing::debug!(
            command = route.name,
            channel_id = invocation.channel_id,
            allowed_channel = route.guard.allowed_channel(),
            "Rejected invocation from the wrong channel"
        );
        responder.notify(rejection.notice(), true).await?;
        return Ok(DispatchOutcome::Rejected);
    }

    let policy = route.policy;
    if policy.timing == ResponseTiming::DeferFirst {
        responder.acknowledge(policy.ephemeral).await?;
    }

    tracing::debug!(command = route.name, "Fetching upstream data");
    let items = match fetch().await {
        Ok(items) if items.is_empty() => {
            Err(RelayError::EmptyResult(NO_RESULTS_NOTICE.to_string()))
        }
        other => other,
    };

    let items = match items {
        Ok(items) => items,
        Err(failure) => {
            tracing::warn!(
                command = route.name,
                kind = ?failure.kind(),
                notice = %failure,
                "Invocation ended without results"
            );
            responder.notify(failure.notice(), policy.ephemeral).await?;
            return Ok(DispatchOutcome::Reported(failure.kind()));
        }
    };

    let mut sent = 0;
    let limit = policy.cap.unwrap_or(items.len());
    for item in items.iter().take(limit) {
        responder.deliver(item.render(), policy.ephemeral).await?;
        sent += 1;
    }

    tracing::info!(command = route.name, sent, "Invocation answered");
    Ok(DispatchOutcome::Sent(sent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::relay::relay_message::Accent;
    use crate::core::relay::test_support::{RecordingResponder, Sent};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Item(&'static str);

    impl Render for Item {
        fn render(&self) -> RelayMessage {
            RelayMessage::new(self.0, Accent::Gold)
        }
    }

    fn route(timing: ResponseTiming) -> CommandRoute {
        CommandRoute {
            name: "test_command",
            guard: ChannelGuard::new(100, "Testing"),
            policy: ResponsePolicy {
                timing,
                ephemeral: true,
                cap: Some(5),
            },
        }
    }

    fn invocation(channel_id: u64) -> Invocation {
        Invocation {
            channel_id,
            user_id: 1,
            user_name: "tester".to_string(),
            parameters: Vec::new(),
        }
    }

    #[tokio::test]
    async fn wrong_channel_rejects_once_without_fetching() {
        let responder = RecordingResponder::default();
        let counter = AtomicUsize::new(0);
        let fetches = &counter;

        let outcome = dispatch(
            &route(ResponseTiming::DeferFirst),
            &invocation(999),
            &responder,
            move || async move {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(vec![Item("never")])
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome, DispatchOutcome::Rejected);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(
            responder.sent(),
            vec![Sent::Notice {
                text: "This command can only be used in the Testing channel.".to_string(),
                ephemeral: true,
            }]
        );
    }

    #[tokio::test]
    async fn defers_then_sends_capped_results() {
        let responder = RecordingResponder::default();
        let items: Vec<Item> = ["a", "b", "c", "d", "e", "f", "g"]
            .into_iter()
            .map(Item)
            .collect();

        let outcome = dispatch(
            &route(ResponseTiming::DeferFirst),
            &invocation(100),
            &responder,
            move || async move { Ok(items) },
        )
        .await
        .unwrap();

        assert_eq!(outcome, DispatchOutcome::Sent(5));
        let sent = responder.sent();
        assert_eq!(sent.len(), 6);
        assert_eq!(sent[0], Sent::Ack { ephemeral: true });
        assert_eq!(
            sent[5],
            Sent::Message {
                title: "e".to_string(),
                ephemeral: true
            }
        );
    }

    #[tokio::test]
    async fn uncapped_policy_sends_every_result() {
        let responder = RecordingResponder::default();
        let mut uncapped = route(ResponseTiming::Immediate);
        uncapped.policy = uncapped.policy.uncapped();
        let items: Vec<Item> = ["a", "b", "c", "d", "e", "f", "g"]
            .into_iter()
            .map(Item)
            .collect();

        let outcome = dispatch(&uncapped, &invocation(100), &responder, move || async move {
            Ok(items)
        })
        .await
        .unwrap();

        assert_eq!(outcome, DispatchOutcome::Sent(7));
        assert_eq!(responder.sent().len(), 7);
    }

    #[tokio::test]
    async fn immediate_timing_skips_acknowledgement() {
        let responder = RecordingResponder::default();

        dispatch(
            &route(ResponseTiming::Immediate),
            &invocation(100),
            &responder,
            || async { Ok(vec![Item("only")]) },
        )
        .await
        .unwrap();

        assert_eq!(
            responder.sent(),
            vec![Sent::Message {
                title: "only".to_string(),
                ephemeral: true
            }]
        );
    }

    #[tokio::test]
    async fn fetch_failure_reports_exactly_one_notice() {
        let responder = RecordingResponder::default();

        let outcome = dispatch(
            &route(ResponseTiming::Immediate),
            &invocation(100),
            &responder,
            || async move {
                Err::<Vec<Item>, _>(RelayError::UpstreamUnavailable {
                    service: "Codeforces",
                    resource: "problems",
                })
            },
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Reported(FailureKind::UpstreamUnavailable)
        );
        assert_eq!(
            responder.sent(),
            vec![Sent::Notice {
                text: "Failed to fetch problems from Codeforces API. Please try again later."
                    .to_string(),
                ephemeral: true,
            }]
        );
    }

    #[tokio::test]
    async fn empty_success_becomes_no_results_notice() {
        let responder = RecordingResponder::default();

        let outcome = dispatch(
            &route(ResponseTiming::Immediate),
            &invocation(100),
            &responder,
            || async { Ok(Vec::<Item>::new()) },
        )
        .await
        .unwrap();

        assert_eq!(outcome, DispatchOutcome::Reported(FailureKind::EmptyResult));
        assert_eq!(responder.sent().len(), 1);
    }
}
