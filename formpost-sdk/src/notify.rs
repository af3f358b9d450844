use tokio::sync::mpsc;

/// Receives user facing failure messages, at most one per submit.
pub trait Notifier: Send + Sync {
	fn notify(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
	fn notify(&self, message: &str) {
		(**self).notify(message)
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
	fn notify(&self, message: &str) {
		log::error!("{message}");
	}
}

/// Forwards messages to a channel, e.g. a toast queue drained by a UI.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
	sender: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
	pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
		let (sender, receiver) = mpsc::unbounded_channel();
		(Self { sender }, receiver)
	}
}

impl Notifier for ChannelNotifier {
	fn notify(&self, message: &str) {
		if self.sender.send(message.to_owned()).is_err() {
			log::warn!("notification dropped, receiver closed: {message}");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn channel_notifier_forwards() {
		let (notifier, mut rx) = ChannelNotifier::new();
		notifier.notify("upload failed");
		assert_eq!(rx.try_recv().unwrap(), "upload failed");
		assert!(rx.try_recv().is_err());
	}

	#[test]
	fn channel_notifier_survives_closed_receiver() {
		let (notifier, rx) = ChannelNotifier::new();
		drop(rx);
		notifier.notify("nobody listens");
	}
}
