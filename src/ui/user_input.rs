use futures::Stream;
use termion::{event::Key, input::TermRead};
use tokio::sync::mpsc::unbounded_channel;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Keys from stdin as a stream. termion reads block, so they happen on a
/// blocking thread and get forwarded over a channel.
pub fn user_input() -> impl Stream<Item = Key> + Unpin {
  let (key_tx, key_rx) = unbounded_channel();

  tokio::task::spawn_blocking(move || {
    for key in std::io::stdin().keys().filter_map(Result::ok) {
      if key_tx.send(key).is_err() { return; }
    }
  });

  UnboundedReceiverStream::new(key_rx)
}
