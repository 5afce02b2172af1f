use super::{
    ingress::{Mailbox, Message},
    Config, Oracle,
};
use crate::{Error, Ledger, Reporter};
use commonware_runtime::{Handle, Metrics, Spawner};
use futures::{channel::mpsc, StreamExt};
use tracing::debug;

/// Serializes access to an [Oracle] behind a [Mailbox].
///
/// Messages are processed one at a time, in the order they are received, so concurrent callers
/// never observe a partially applied submission.
pub struct Actor<E: Spawner + Metrics, L: Ledger, R: Reporter> {
    context: E,
    oracle: Oracle<L, R>,
    mailbox: mpsc::Receiver<Message>,
}

impl<E: Spawner + Metrics, L: Ledger, R: Reporter> Actor<E, L, R> {
    /// Create a new [Actor] and the [Mailbox] used to reach it.
    pub fn new(context: E, cfg: Config<L, R>) -> Result<(Self, Mailbox), Error> {
        let (sender, mailbox) = mpsc::channel(cfg.mailbox_size);
        let oracle = Oracle::new(context.with_label("oracle"), cfg)?;
        Ok((
            Self {
                context,
                oracle,
                mailbox,
            },
            Mailbox::new(sender),
        ))
    }

    /// Start the [Actor].
    ///
    /// The [Actor] runs until every [Mailbox] has been dropped.
    pub fn start(self) -> Handle<()> {
        self.context.clone().spawn(|_| self.run())
    }

    async fn run(mut self) {
        while let Some(message) = self.mailbox.next().await {
            match message {
                Message::SetCheckpoint {
                    submission,
                    response,
                } => {
                    let accepted = self.oracle.set_checkpoint(submission);
                    let _ = response.send(accepted);
                }
                Message::Latest { response } => {
                    let _ = response.send(self.oracle.latest());
                }
                Message::Admins { response } => {
                    let _ = response.send(self.oracle.admins().to_vec());
                }
            }
        }
        debug!("mailbox closed, shutting down");
    }
}
