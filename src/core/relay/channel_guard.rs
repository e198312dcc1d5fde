use super::relay_error::RelayError;

/// Restricts a command to a single configured channel.
///
/// One guard is built per command from the startup config and checked before
/// anything else happens in the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelGuard {
    allowed_channel: u64,
    channel_label: &'static str,
}

impl ChannelGuard {
    pub fn new(allowed_channel: u64, channel_label: &'static str) -> Self {
        Self {
            allowed_channel,
            channel_label,
        }
    }

    pub fn allowed_channel(&self) -> u64 {
        self.allowed_channel
    }

    pub fn check(&self, channel_id: u64) -> Result<(), RelayError> {
        if channel_id == self.allowed_channel {
            Ok(())
        } else {
            Err(RelayError::WrongChannel {
                channel_label: self.channel_label,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_only_the_configured_channel() {
        let guard = ChannelGuard::new(42, "Kaggle");
        assert!(guard.check(42).is_ok());
        assert_eq!(
            guard.check(7),
            Err(RelayError::WrongChannel {
                channel_label: "Kaggle"
            })
        );
    }
}
